//! Debounced autosave.
//!
//! Each editing session owns one `Autosaver`. Submitting a document restarts
//! the quiet period; once it elapses only the newest document is written.
//! Failed writes are logged and dropped; the next edit saves again anyway.
//! Dropping the autosaver flushes whatever is still pending.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::persistence::ResumeStore;

pub struct Autosaver {
    tx: mpsc::UnboundedSender<ResumeDocument>,
    _worker: JoinHandle<()>,
}

impl Autosaver {
    pub fn spawn(id: Uuid, store: Arc<dyn ResumeStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(id, store, debounce, rx));
        Autosaver {
            tx,
            _worker: worker,
        }
    }

    pub fn submit(&self, document: ResumeDocument) {
        if self.tx.send(document).is_err() {
            warn!("Autosave worker is gone, edit not persisted");
        }
    }
}

async fn run(
    id: Uuid,
    store: Arc<dyn ResumeStore>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<ResumeDocument>,
) {
    while let Some(mut latest) = rx.recv().await {
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(document) => latest = document,
                    None => break,
                },
                _ = tokio::time::sleep(debounce) => break,
            }
        }

        match store.save(id, &latest).await {
            Ok(stored) => debug!(%id, updated_at = %stored.updated_at, "Autosave: document saved"),
            Err(e) => warn!(%id, "Autosave: save failed: {e}"),
        }
    }
}
