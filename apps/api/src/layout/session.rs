//! Latest-wins recomputation for one open preview.
//!
//! Every edit schedules a fresh layout pass tagged with a monotonically
//! increasing generation. Scheduling aborts the previous pass's task, and a
//! finished pass is only published if it is still the newest request, so a
//! slow early pass can never overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::layout::pipeline::{DerivedLayout, LayoutEngine};
use crate::models::resume::ResumeDocument;

pub struct PreviewSession {
    engine: LayoutEngine,
    requested: AtomicU64,
    latest: watch::Sender<Option<Arc<DerivedLayout>>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl PreviewSession {
    pub fn new(engine: LayoutEngine) -> Arc<Self> {
        let (latest, _) = watch::channel(None);
        Arc::new(PreviewSession {
            engine,
            requested: AtomicU64::new(0),
            latest,
            pending: Mutex::new(None),
        })
    }

    /// Newest generation handed out by `schedule_recompute`.
    pub fn requested_generation(&self) -> u64 {
        self.requested.load(Ordering::SeqCst)
    }

    /// Starts a layout pass for `document` and returns its generation.
    pub fn schedule_recompute(self: &Arc<Self>, document: ResumeDocument) -> u64 {
        // Held across bump and spawn so handles are replaced in generation order.
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let generation = self.requested.fetch_add(1, Ordering::SeqCst) + 1;

        let session = Arc::clone(self);
        let handle = tokio::spawn(async move {
            match session.engine.compute_deferred(document, generation).await {
                Ok(layout) => {
                    session.apply(layout);
                }
                Err(e) => warn!(generation, "Preview: layout pass failed: {e}"),
            }
        });

        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
        generation
    }

    /// Publishes `layout` if it belongs to the newest request. Returns whether
    /// it was published.
    pub fn apply(&self, layout: DerivedLayout) -> bool {
        let requested = self.requested.load(Ordering::SeqCst);
        let generation = layout.generation;
        let layout = Arc::new(layout);

        let applied = self.latest.send_if_modified(|current| {
            let newer_than_shown = current
                .as_ref()
                .map_or(true, |shown| generation > shown.generation);
            if generation == requested && newer_than_shown {
                *current = Some(Arc::clone(&layout));
                true
            } else {
                false
            }
        });

        if applied {
            debug!(generation, pages = layout.page_count, "Preview: layout published");
        } else {
            debug!(generation, requested, "Preview: stale layout discarded");
        }
        applied
    }

    /// Last published layout, if any pass has finished yet.
    #[cfg(test)]
    pub fn current(&self) -> Option<Arc<DerivedLayout>> {
        self.latest.borrow().clone()
    }

    /// Waits until a layout at least as new as `generation` is published.
    /// Returns `None` only if the session is gone.
    pub async fn layout_at(&self, generation: u64) -> Option<Arc<DerivedLayout>> {
        let mut rx = self.latest.subscribe();
        let layout = rx
            .wait_for(|l| l.as_ref().is_some_and(|l| l.generation >= generation))
            .await
            .ok()?
            .clone();
        layout
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
