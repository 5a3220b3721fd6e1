use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::RegistrationStore;
use crate::error::{AppError, Result};
use crate::models::MedicalScale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorSummary {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicSummary {
    pub name: String,
}

/// Everything the self-registration form needs to render
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedRegistration {
    pub ok: bool,
    pub token_id: Uuid,
    pub token: String,
    pub doctor: Option<DoctorSummary>,
    pub clinic: Option<ClinicSummary>,
    pub selected_scale_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
    pub status: String,
    pub scales: Vec<MedicalScale>,
}

/// Checks a registration token and gathers the doctor, clinic and scale data
/// linked to it.
///
/// Read-only: the token is never marked as used here, so repeated calls
/// while the token is pending return the same payload.
///
/// 1. Look the token up by exact match (lookup errors count as an invalid token)
/// 2. Reject unless pending and unexpired at `now`
/// 3. Fetch doctor and clinic concurrently; missing rows become `null`
/// 4. Fetch selected scales, if any; unknown ids are omitted
pub async fn validate_token(
    store: &dyn RegistrationStore,
    token: &str,
    now: DateTime<Utc>,
) -> Result<ValidatedRegistration> {
    let row = store
        .find_token(token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Registration token lookup failed");
            AppError::InvalidToken
        })?
        .ok_or_else(|| {
            tracing::info!(reason = "not_found", "Registration token rejected");
            AppError::InvalidToken
        })?;

    if !row.is_redeemable(now) {
        tracing::info!(
            token_id = %row.id,
            status = %row.status,
            expired = row.is_expired(now),
            reason = "not_redeemable",
            "Registration token rejected"
        );
        return Err(AppError::TokenUnavailable);
    }

    let (doctor, clinic) = tokio::try_join!(
        store.find_doctor(row.doctor_id),
        store.find_clinic(row.clinic_id),
    )?;

    let scales = if row.selected_scale_ids.is_empty() {
        Vec::new()
    } else {
        let found = store.find_scales(&row.selected_scale_ids).await?;
        order_by_selection(&row.selected_scale_ids, found)
    };

    tracing::info!(
        token_id = %row.id,
        doctor_found = doctor.is_some(),
        clinic_found = clinic.is_some(),
        scales_requested = row.selected_scale_ids.len(),
        scales_found = scales.len(),
        "Registration token validated"
    );

    Ok(ValidatedRegistration {
        ok: true,
        token_id: row.id,
        token: row.token,
        doctor: doctor.map(|d| DoctorSummary {
            full_name: d.full_name,
        }),
        clinic: clinic.map(|c| ClinicSummary { name: c.name }),
        selected_scale_ids: row.selected_scale_ids,
        expires_at: row.expires_at,
        status: row.status,
        scales,
    })
}

/// Arranges scales in the order the doctor selected them, once each.
fn order_by_selection(selected: &[String], found: Vec<MedicalScale>) -> Vec<MedicalScale> {
    let mut by_id: HashMap<String, MedicalScale> = found
        .into_iter()
        .map(|scale| (scale.id.clone(), scale))
        .collect();

    selected.iter().filter_map(|id| by_id.remove(id)).collect()
}
