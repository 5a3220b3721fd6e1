use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::models::RegistrationToken;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub expired: u64,
}

/// Background job that marks overdue pending tokens as expired
///
/// Validation never relies on this: expiry is always computed from
/// `expires_at`. The sweep only keeps the stored status honest for the
/// doctor-facing screens that list tokens.
pub async fn expire_stale_tokens(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<SweepStats, sqlx::Error> {
    let expired = RegistrationToken::expire_stale(pool, now).await?;

    if expired > 0 {
        tracing::info!(expired, "Expired stale registration tokens");
    } else {
        tracing::debug!("No stale registration tokens");
    }

    Ok(SweepStats { expired })
}

/// Starts a scheduler that runs the sweep on `schedule` (6-field cron, seconds first)
pub async fn start_scheduler(
    pool: PgPool,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let pool = pool.clone();
        Box::pin(async move {
            if let Err(e) = expire_stale_tokens(&pool, Utc::now()).await {
                tracing::error!(error = %e, "Token expiry sweep failed");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(schedule, "Token expiry sweep scheduled");

    Ok(scheduler)
}
