//! Document persistence.
//!
//! `ResumeStore` is the seam: Postgres in deployments, memory when no
//! database is configured and in tests. `AppState` carries an
//! `Arc<dyn ResumeStore>` chosen at startup.

pub mod autosave;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::ResumeDocument;

pub use autosave::Autosaver;
pub use postgres::PgResumeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<StoredResume>, StoreError>;

    /// Inserts or replaces the document stored under `id`.
    async fn save(&self, id: Uuid, document: &ResumeDocument) -> Result<StoredResume, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryResumeStore
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryResumeStore {
    documents: RwLock<HashMap<Uuid, StoredResume>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn load(&self, id: Uuid) -> Result<Option<StoredResume>, StoreError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn save(&self, id: Uuid, document: &ResumeDocument) -> Result<StoredResume, StoreError> {
        let stored = StoredResume {
            id,
            document: document.clone(),
            updated_at: Utc::now(),
        };
        self.documents.write().await.insert(id, stored.clone());
        Ok(stored)
    }
}
