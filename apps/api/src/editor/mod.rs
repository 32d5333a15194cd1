// Editing sessions.
// A session owns the live document, its preview recomputation and its
// debounced autosave. Edits never wait on either.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::layout::{LayoutEngine, PreviewSession};
use crate::models::resume::ResumeDocument;
use crate::persistence::{Autosaver, ResumeStore};

pub struct EditorSession {
    pub id: Uuid,
    /// Id the document is persisted under.
    pub document_id: Uuid,
    pub preview: Arc<PreviewSession>,
    autosaver: Autosaver,
    document: RwLock<ResumeDocument>,
}

impl EditorSession {
    fn open(
        document_id: Uuid,
        document: ResumeDocument,
        engine: LayoutEngine,
        store: Arc<dyn ResumeStore>,
        debounce: Duration,
    ) -> Arc<Self> {
        let session = Arc::new(EditorSession {
            id: Uuid::new_v4(),
            document_id,
            preview: PreviewSession::new(engine),
            autosaver: Autosaver::spawn(document_id, store, debounce),
            document: RwLock::new(document.clone()),
        });
        session.preview.schedule_recompute(document);
        session
    }

    pub async fn document(&self) -> ResumeDocument {
        self.document.read().await.clone()
    }

    /// Replaces the document, starts a layout pass and queues an autosave.
    /// Returns the generation of the new pass.
    pub async fn replace_document(&self, document: ResumeDocument) -> u64 {
        // Guard held until scheduled so generations follow write order.
        let mut current = self.document.write().await;
        *current = document.clone();
        self.autosaver.submit(document.clone());
        self.preview.schedule_recompute(document)
    }
}

/// Open sessions by id.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<EditorSession>>>>,
}

impl SessionRegistry {
    pub async fn open(
        &self,
        document_id: Uuid,
        document: ResumeDocument,
        engine: LayoutEngine,
        store: Arc<dyn ResumeStore>,
        debounce: Duration,
    ) -> Arc<EditorSession> {
        let session = EditorSession::open(document_id, document, engine, store, debounce);
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        info!(session_id = %session.id, %document_id, "Editing session opened");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<EditorSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Removes the session. Its autosave flushes once the last handle drops.
    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_some() {
            info!(session_id = %id, "Editing session closed");
        }
        removed.is_some()
    }
}
