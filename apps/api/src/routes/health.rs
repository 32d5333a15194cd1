use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::templates::TemplateId;

/// GET /health
/// Reports service version, the document store in use and the template count.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = if state.config.database_url.is_some() {
        "postgres"
    } else {
        "memory"
    };
    Json(json!({
        "status": "ok",
        "service": "cv-api",
        "version": env!("CARGO_PKG_VERSION"),
        "store": store,
        "templates": TemplateId::ALL.len(),
    }))
}
