//! Export facility.
//!
//! Consumes rendered pages, each already a complete canvas of exact page
//! dimensions, and turns them into a downloadable document. Rasterizing
//! backends plug in behind `ExportFacility`; the built-in `PrintHtmlExporter`
//! emits one printable HTML file with one `@page` per canvas.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::markup::{attr, PRINT_TEMPLATE};
use crate::layout::page::PageDimensions;
use crate::layout::renderer::RenderedPage;

pub const EXPORT_FILE_STEM: &str = "my-cv";
pub const MAX_EXPORT_PAGES: usize = 50;

/// Colour functions many rasterizers cannot paint.
const UNSUPPORTED_COLOR_FUNCTIONS: [&str; 5] = ["color-mix(", "oklab(", "oklch(", "lab(", "lch("];
const COLOR_FALLBACK: &str = "rgb(0, 0, 0)";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,

    #[error("{0} pages exceeds the export limit of {MAX_EXPORT_PAGES}")]
    TooManyPages(usize),

    #[error("rasterization failed: {0}")]
    Rasterize(String),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub title: String,
    pub dimensions: PageDimensions,
    /// Device pixel ratio for rasterizing backends.
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub page_count: usize,
    pub body: Bytes,
}

#[async_trait]
pub trait ExportFacility: Send + Sync {
    async fn export(
        &self,
        pages: &[RenderedPage],
        options: &ExportOptions,
    ) -> Result<ExportedDocument, ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PrintHtmlExporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintHtmlExporter;

#[async_trait]
impl ExportFacility for PrintHtmlExporter {
    async fn export(
        &self,
        pages: &[RenderedPage],
        options: &ExportOptions,
    ) -> Result<ExportedDocument, ExportError> {
        if pages.is_empty() {
            return Err(ExportError::Empty);
        }
        if pages.len() > MAX_EXPORT_PAGES {
            return Err(ExportError::TooManyPages(pages.len()));
        }

        let mut replaced = 0usize;
        let mut body = String::new();
        for page in pages {
            let (html, count) = neutralize_unsupported_colors(&page.html);
            replaced += count;
            body.push_str(&html);
        }
        if replaced > 0 {
            warn!(replaced, "Export: replaced unsupported colour functions");
        }

        // Braces are escaped so a title can never look like a placeholder.
        let title = attr(&options.title).replace('{', "&#123;");
        let document = PRINT_TEMPLATE
            .replace("{scale}", &options.scale.to_string())
            .replace("{width_mm}", &options.dimensions.width_mm.to_string())
            .replace("{height_mm}", &options.dimensions.height_mm.to_string())
            .replace("{title}", &title)
            .replace("{pages}", &body);

        Ok(ExportedDocument {
            file_name: format!("{EXPORT_FILE_STEM}.html"),
            content_type: "text/html; charset=utf-8",
            page_count: pages.len(),
            body: Bytes::from(document),
        })
    }
}

/// Replaces every `oklab(…)`, `oklch(…)`, `lab(…)`, `lch(…)` and
/// `color-mix(…)` call with a plain black. Returns the rewritten markup and
/// the number of replacements.
pub fn neutralize_unsupported_colors(html: &str) -> (String, usize) {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut count = 0usize;
    let mut copied_to = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let at_word_start = i == 0 || !(bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'-');
        let matched = at_word_start
            .then(|| {
                UNSUPPORTED_COLOR_FUNCTIONS.iter().find(|name| {
                    bytes.len() >= i + name.len()
                        && bytes[i..i + name.len()].eq_ignore_ascii_case(name.as_bytes())
                })
            })
            .flatten();

        match matched {
            Some(name) => {
                let args_start = i + name.len();
                let Some(close) = bytes[args_start..].iter().position(|b| *b == b')') else {
                    break;
                };
                out.push_str(&html[copied_to..i]);
                out.push_str(COLOR_FALLBACK);
                count += 1;
                i = args_start + close + 1;
                copied_to = i;
            }
            None => i += 1,
        }
    }

    out.push_str(&html[copied_to..]);
    (out, count)
}

/// Runs `facility` and collapses any failure into the single user-facing
/// export error. Nothing else in the session is touched.
pub async fn export_pages(
    facility: &dyn ExportFacility,
    pages: &[RenderedPage],
    options: &ExportOptions,
) -> Result<ExportedDocument, AppError> {
    match facility.export(pages, options).await {
        Ok(document) => {
            info!(
                pages = document.page_count,
                bytes = document.body.len(),
                "Export complete"
            );
            Ok(document)
        }
        Err(e) => Err(AppError::ExportFailed(e.to_string())),
    }
}
