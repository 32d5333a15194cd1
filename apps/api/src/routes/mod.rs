pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::preview::handlers as preview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates & stateless preview
        .route("/api/v1/templates", get(preview::handle_list_templates))
        .route("/api/v1/preview", post(preview::handle_preview))
        // Editing sessions
        .route("/api/v1/sessions", post(editor::handle_open_session))
        .route("/api/v1/sessions/:id", delete(editor::handle_close_session))
        .route(
            "/api/v1/sessions/:id/document",
            get(editor::handle_get_document).put(editor::handle_replace_document),
        )
        .route("/api/v1/sessions/:id/pages", get(editor::handle_get_pages))
        // Export
        .route("/api/v1/export", post(preview::handle_export))
        .with_state(state)
}
