// In-memory store for handler and service tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};
use uuid::Uuid;

use super::store::RegistrationStore;
use crate::models::{Clinic, DoctorProfile, MedicalScale, RegistrationToken};

#[derive(Default)]
pub struct MemoryStore {
    tokens: Mutex<HashMap<String, RegistrationToken>>,
    doctors: Mutex<HashMap<Uuid, DoctorProfile>>,
    clinics: Mutex<HashMap<Uuid, Clinic>>,
    scales: Mutex<HashMap<String, MedicalScale>>,
    fail_token_lookup: AtomicBool,
    fail_reference_reads: AtomicBool,
    scale_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_token(
        &self,
        token: &str,
        status: &str,
        expires_at: DateTime<Utc>,
        doctor_id: Uuid,
        clinic_id: Uuid,
        selected_scale_ids: &[&str],
    ) -> RegistrationToken {
        let row = RegistrationToken {
            id: Uuid::new_v4(),
            token: token.to_string(),
            doctor_id,
            clinic_id,
            selected_scale_ids: selected_scale_ids.iter().map(|s| s.to_string()).collect(),
            status: status.to_string(),
            expires_at,
            created_at: Utc::now(),
        };
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), row.clone());
        row
    }

    pub fn insert_doctor(&self, id: Uuid, full_name: &str) {
        self.doctors.lock().unwrap().insert(
            id,
            DoctorProfile {
                id,
                full_name: Some(full_name.to_string()),
            },
        );
    }

    pub fn insert_clinic(&self, id: Uuid, name: &str) {
        self.clinics.lock().unwrap().insert(
            id,
            Clinic {
                id,
                name: name.to_string(),
            },
        );
    }

    pub fn insert_scale(&self, id: &str, name: &str, definition: serde_json::Value) {
        self.scales.lock().unwrap().insert(
            id.to_string(),
            MedicalScale {
                id: id.to_string(),
                name: name.to_string(),
                definition,
            },
        );
    }

    pub fn fail_token_lookup(&self) {
        self.fail_token_lookup.store(true, Ordering::SeqCst);
    }

    pub fn fail_reference_reads(&self) {
        self.fail_reference_reads.store(true, Ordering::SeqCst);
    }

    pub fn scale_lookups(&self) -> usize {
        self.scale_lookups.load(Ordering::SeqCst)
    }

    fn check_reference_reads(&self) -> Result<(), sqlx::Error> {
        if self.fail_reference_reads.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_token(&self, token: &str) -> Result<Option<RegistrationToken>, sqlx::Error> {
        if self.fail_token_lookup.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn find_doctor(&self, doctor_id: Uuid) -> Result<Option<DoctorProfile>, sqlx::Error> {
        self.check_reference_reads()?;
        Ok(self.doctors.lock().unwrap().get(&doctor_id).cloned())
    }

    async fn find_clinic(&self, clinic_id: Uuid) -> Result<Option<Clinic>, sqlx::Error> {
        self.check_reference_reads()?;
        Ok(self.clinics.lock().unwrap().get(&clinic_id).cloned())
    }

    async fn find_scales(&self, ids: &[String]) -> Result<Vec<MedicalScale>, sqlx::Error> {
        self.check_reference_reads()?;
        self.scale_lookups.fetch_add(1, Ordering::SeqCst);
        let scales = self.scales.lock().unwrap();
        Ok(ids.iter().filter_map(|id| scales.get(id).cloned()).collect())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check_reference_reads()
    }
}
