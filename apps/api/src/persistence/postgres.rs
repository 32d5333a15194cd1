use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::resume::{ResumeDocument, ResumeDocumentRow};
use crate::persistence::{ResumeStore, StoreError, StoredResume};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resume_documents (
    id          UUID PRIMARY KEY,
    document    JSONB NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Stores each document as one JSONB row keyed by its id.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        PgResumeStore { pool }
    }

    /// Creates the `resume_documents` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("resume_documents table ready");
        Ok(())
    }
}

impl From<ResumeDocumentRow> for StoredResume {
    fn from(row: ResumeDocumentRow) -> Self {
        StoredResume {
            id: row.id,
            document: row.document.0,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn load(&self, id: Uuid) -> Result<Option<StoredResume>, StoreError> {
        let row = sqlx::query_as::<_, ResumeDocumentRow>(
            "SELECT id, document, updated_at FROM resume_documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(StoredResume::from))
    }

    async fn save(&self, id: Uuid, document: &ResumeDocument) -> Result<StoredResume, StoreError> {
        let row = sqlx::query_as::<_, ResumeDocumentRow>(
            r#"
            INSERT INTO resume_documents (id, document, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE
                SET document = EXCLUDED.document,
                    updated_at = EXCLUDED.updated_at
            RETURNING id, document, updated_at
            "#,
        )
        .bind(id)
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
