use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::api::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
    NotConfigured,
}

/// Result of pinging the service-role database
#[derive(Debug, Serialize)]
pub struct DatabaseProbe {
    pub status: ProbeStatus,
    pub latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ProbeStatus,
    pub checked_at: DateTime<Utc>,
    pub version: &'static str,
    pub database: DatabaseProbe,
}

impl HealthReport {
    fn status_code(&self) -> StatusCode {
        match self.status {
            ProbeStatus::Healthy => StatusCode::OK,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

async fn probe_database(state: &AppState) -> DatabaseProbe {
    let Some(store) = state.store.as_deref() else {
        return DatabaseProbe {
            status: ProbeStatus::NotConfigured,
            latency_ms: 0,
            detail: Some("SERVICE_DATABASE_URL is not set".to_string()),
        };
    };

    let started = Instant::now();
    let outcome = store.ping().await;
    let latency_ms = started.elapsed().as_millis();

    match outcome {
        Ok(()) => DatabaseProbe {
            status: ProbeStatus::Healthy,
            latency_ms,
            detail: None,
        },
        Err(e) => DatabaseProbe {
            status: ProbeStatus::Unhealthy,
            latency_ms,
            detail: Some(e.to_string()),
        },
    }
}

/// Reports whether the registration endpoint can reach its store.
/// A missing or failing database makes the whole service unavailable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = probe_database(&state).await;

    let report = HealthReport {
        status: match database.status {
            ProbeStatus::Healthy => ProbeStatus::Healthy,
            _ => ProbeStatus::Unhealthy,
        },
        checked_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        database,
    };

    tracing::debug!(
        status = ?report.status,
        database = ?report.database.status,
        latency_ms = report.database.latency_ms,
        "Health probe"
    );

    (report.status_code(), Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
