use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Stored lifecycle state of a registration token.
///
/// `Expired` may also be derived from `expires_at` without ever being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Pending,
    Used,
    Expired,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Pending => "pending",
            TokenStatus::Used => "used",
            TokenStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TokenStatus::Pending),
            "used" => Ok(TokenStatus::Used),
            "expired" => Ok(TokenStatus::Expired),
            other => Err(format!("unknown token status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RegistrationToken {
    pub id: Uuid,
    pub token: String,
    pub doctor_id: Uuid,
    pub clinic_id: Uuid,
    pub selected_scale_ids: Vec<String>,
    pub status: String, // 'pending', 'used', 'expired'
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RegistrationToken {
    /// Finds a token row by exact token match
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM patient_registration_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Flips pending tokens whose expiry has passed to 'expired'
    pub async fn expire_stale(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE patient_registration_tokens
            SET status = 'expired'
            WHERE status = 'pending' AND expires_at < $1
            "#,
        )
        .bind(now)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Parsed status; `None` for values outside the known set
    pub fn status(&self) -> Option<TokenStatus> {
        self.status.parse().ok()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// A token can be redeemed only while pending and unexpired.
    ///
    /// Expiry is computed here rather than trusted from `status`, so a pending
    /// row past its deadline is rejected even if no sweep has run.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.status() == Some(TokenStatus::Pending) && !self.is_expired(now)
    }
}
