// Paginated preview layout.
// Pipeline: template producer → measurer → paginator → renderer.
// CPU-bound layout passes must run inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod font_metrics;
pub mod markup;
pub mod measurer;
pub mod page;
pub mod paginator;
pub mod pipeline;
pub mod renderer;
pub mod session;
pub mod typesetter;

// Re-export the public API consumed by other modules (handlers, export).
pub use pipeline::{DerivedLayout, LayoutEngine};
pub use renderer::RenderedPage;
pub use session::PreviewSession;
