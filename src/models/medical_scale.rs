use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};

/// Clinical assessment instrument (PHQ-9, GAD-7, ...)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MedicalScale {
    pub id: String,
    pub name: String,
    pub definition: JsonValue, // JSONB field
}

impl MedicalScale {
    /// Fetches every scale whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[String]) -> Result<Vec<Self>, sqlx::Error> {
        let scales = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, definition FROM medical_scales
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(scales)
    }
}
