//! Axum route handlers for previews, templates and export.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::handlers::{wait_for_layout, PreviewResponse};
use crate::errors::AppError;
use crate::export::{export_pages, ExportOptions};
use crate::layout::DerivedLayout;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;
use crate::templates::{TemplateId, TemplateSummary};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub document: ResumeDocument,
    pub zoom: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    /// Export the newest layout of an open session.
    pub session_id: Option<Uuid>,
    /// Or lay out and export this document.
    pub document: Option<ResumeDocument>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: TemplateId::ALL.into_iter().map(TemplateId::summary).collect(),
    })
}

/// POST /api/v1/preview
///
/// Lays out a document without opening a session.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let layout = state.engine.compute_deferred(request.document, 0).await?;
    let zoom = request.zoom.unwrap_or(state.config.preview_zoom);
    Ok(Json(PreviewResponse::new(&layout, zoom)))
}

/// POST /api/v1/export
///
/// Exports either the layout of an open session's newest edit or a one-off
/// document.
/// Any export failure is reported as a single generic error.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let layout: Arc<DerivedLayout> = match (request.session_id, request.document) {
        (Some(session_id), _) => {
            let session = state
                .sessions
                .get(session_id)
                .await
                .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
            // Export the newest edit, not whatever layout happens to be shown.
            wait_for_layout(&session, session.preview.requested_generation()).await?
        }
        (None, Some(document)) => Arc::new(state.engine.compute_deferred(document, 0).await?),
        (None, None) => {
            return Err(AppError::Validation(
                "Either sessionId or document is required".to_string(),
            ))
        }
    };

    let title = if layout.title.is_empty() {
        "Resume".to_string()
    } else {
        layout.title.clone()
    };
    let options = ExportOptions {
        title,
        dimensions: state.engine.dimensions(),
        scale: state.config.export_scale,
    };
    let exported = export_pages(state.exporter.as_ref(), &layout.pages, &options).await?;

    Ok((
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.file_name),
            ),
        ],
        exported.body,
    )
        .into_response())
}
