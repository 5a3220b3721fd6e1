use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
}

impl Clinic {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let clinic = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name FROM clinics WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(clinic)
    }
}
