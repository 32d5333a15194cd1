//! Axum route handlers for editing sessions.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::EditorSession;
use crate::errors::AppError;
use crate::layout::renderer::{clamp_zoom, render_preview_document};
use crate::layout::{DerivedLayout, RenderedPage};
use crate::models::design::ResolvedDesign;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;
use crate::templates::TemplateId;

/// Upper bound on how long a request waits for a layout pass to publish.
pub const LAYOUT_WAIT: Duration = Duration::from_secs(10);

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenSessionRequest {
    /// Resume a stored document.
    pub document_id: Option<Uuid>,
    /// Start from this document; ignored when `document_id` is set.
    pub document: Option<ResumeDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub document_id: Uuid,
    pub generation: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagesQuery {
    /// Wait for a layout at least this new.
    pub generation: Option<u64>,
    pub zoom: Option<f32>,
}

/// Shared by the session and stateless preview endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub generation: u64,
    pub template: TemplateId,
    pub design: ResolvedDesign,
    pub page_count: usize,
    pub partition: Vec<Vec<String>>,
    pub degraded_blocks: usize,
    pub zoom: f32,
    pub pages: Vec<RenderedPage>,
    /// All pages wrapped for on-screen display at `zoom`.
    pub preview_html: String,
}

impl PreviewResponse {
    pub fn new(layout: &DerivedLayout, zoom: f32) -> Self {
        let zoom = clamp_zoom(zoom);
        PreviewResponse {
            generation: layout.generation,
            template: layout.template,
            design: layout.design.clone(),
            page_count: layout.page_count,
            partition: layout.partition.clone(),
            degraded_blocks: layout.degraded_blocks,
            zoom,
            pages: layout.pages.clone(),
            preview_html: render_preview_document(&layout.pages, zoom),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Opens an editing session, either on a stored document or a new one, and
/// starts the first layout pass.
pub async fn handle_open_session(
    State(state): State<AppState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let (document_id, document) = match request.document_id {
        Some(id) => {
            let stored = state
                .store
                .load(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
            (id, stored.document)
        }
        None => (Uuid::new_v4(), request.document.unwrap_or_default()),
    };

    let session = state
        .sessions
        .open(
            document_id,
            document,
            state.engine.clone(),
            state.store.clone(),
            state.autosave_debounce(),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            document_id,
            generation: session.preview.requested_generation(),
        }),
    ))
}

/// PUT /api/v1/sessions/:id/document
///
/// Replaces the session's document. Returns immediately with the generation
/// of the layout pass it started; the autosave runs after the quiet period.
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(document): Json<ResumeDocument>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let generation = session.replace_document(document).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(SessionResponse {
            session_id,
            document_id: session.document_id,
            generation,
        }),
    ))
}

/// GET /api/v1/sessions/:id/document
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(session.document().await))
}

/// GET /api/v1/sessions/:id/pages
///
/// Returns the session's layout. Waits for the requested generation, or for
/// the newest one when none is named.
pub async fn handle_get_pages(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<PagesQuery>,
) -> Result<Json<PreviewResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let generation = query
        .generation
        .unwrap_or_else(|| session.preview.requested_generation());
    if generation > session.preview.requested_generation() {
        return Err(AppError::Validation(format!(
            "generation {generation} has not been requested"
        )));
    }

    let layout = wait_for_layout(&session, generation).await?;

    let zoom = query.zoom.unwrap_or(state.config.preview_zoom);
    Ok(Json(PreviewResponse::new(&layout, zoom)))
}

/// Waits up to `LAYOUT_WAIT` for a layout at least as new as `generation`.
pub async fn wait_for_layout(
    session: &EditorSession,
    generation: u64,
) -> Result<Arc<DerivedLayout>, AppError> {
    tokio::time::timeout(LAYOUT_WAIT, session.preview.layout_at(generation))
        .await
        .ok()
        .flatten()
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "layout for generation {generation} did not complete"
            ))
        })
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}
