use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Clinic, DoctorProfile, MedicalScale, RegistrationToken};

/// The fixed set of reads the registration flow may perform with
/// service-role credentials. Nothing here accepts arbitrary queries.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_token(&self, token: &str) -> Result<Option<RegistrationToken>, sqlx::Error>;

    async fn find_doctor(&self, doctor_id: Uuid) -> Result<Option<DoctorProfile>, sqlx::Error>;

    async fn find_clinic(&self, clinic_id: Uuid) -> Result<Option<Clinic>, sqlx::Error>;

    async fn find_scales(&self, ids: &[String]) -> Result<Vec<MedicalScale>, sqlx::Error>;

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn find_token(&self, token: &str) -> Result<Option<RegistrationToken>, sqlx::Error> {
        RegistrationToken::find_by_token(&self.pool, token).await
    }

    async fn find_doctor(&self, doctor_id: Uuid) -> Result<Option<DoctorProfile>, sqlx::Error> {
        DoctorProfile::find_by_id(&self.pool, doctor_id).await
    }

    async fn find_clinic(&self, clinic_id: Uuid) -> Result<Option<Clinic>, sqlx::Error> {
        Clinic::find_by_id(&self.pool, clinic_id).await
    }

    async fn find_scales(&self, ids: &[String]) -> Result<Vec<MedicalScale>, sqlx::Error> {
        MedicalScale::find_by_ids(&self.pool, ids).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
