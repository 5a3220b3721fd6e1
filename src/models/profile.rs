use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Doctor profile; only the display name is projected.
#[derive(Debug, Clone, FromRow)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
}

impl DoctorProfile {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, full_name FROM profiles WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
