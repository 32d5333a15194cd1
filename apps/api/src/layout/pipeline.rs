//! Produce → measure → paginate → render.
//!
//! The whole pass is a pure function of the document, so it can be recomputed
//! from scratch on every edit. `compute` is CPU-bound; async callers go
//! through `compute_deferred`, which runs it inside `spawn_blocking`.

use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::layout::measurer::{measure, LayoutSurface};
use crate::layout::page::PageDimensions;
use crate::layout::paginator::{paginate, partition_ids};
use crate::layout::renderer::{render, RenderedPage};
use crate::layout::typesetter::Typesetter;
use crate::models::design::ResolvedDesign;
use crate::models::resume::ResumeDocument;
use crate::templates::{self, TemplateId};

/// Everything the preview shows for one document revision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedLayout {
    /// Request generation this layout was computed for.
    pub generation: u64,
    pub template: TemplateId,
    /// Full name of the revision laid out, trimmed. Empty when unset.
    pub title: String,
    pub design: ResolvedDesign,
    pub page_count: usize,
    /// Block ids per page.
    pub partition: Vec<Vec<String>>,
    /// Blocks measured as zero because the surface gave no usable box.
    pub degraded_blocks: usize,
    pub pages: Vec<RenderedPage>,
}

#[derive(Clone)]
pub struct LayoutEngine {
    surface: Arc<dyn LayoutSurface>,
    dimensions: PageDimensions,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        LayoutEngine::new(Arc::new(Typesetter), PageDimensions::A4)
    }
}

impl LayoutEngine {
    pub fn new(surface: Arc<dyn LayoutSurface>, dimensions: PageDimensions) -> Self {
        LayoutEngine {
            surface,
            dimensions,
        }
    }

    pub fn dimensions(&self) -> PageDimensions {
        self.dimensions
    }

    /// Runs the full pass synchronously.
    pub fn compute(&self, document: &ResumeDocument, generation: u64) -> DerivedLayout {
        let template = document.selected_template;
        let (design, blocks) =
            templates::produce(&document.content, &document.design_settings, template);
        let block_count = blocks.len();

        let pass = measure(
            self.surface.as_ref(),
            blocks,
            self.dimensions.content_width_px(),
            &design,
        );
        if pass.degraded > 0 {
            warn!(
                generation,
                degraded = pass.degraded,
                "Layout: some blocks were measured as zero height"
            );
        }

        let paged = paginate(pass.blocks, self.dimensions.printable_height_px());
        let partition = partition_ids(&paged);

        let mut pages = render(&paged, &self.dimensions, &design);
        if pages.is_empty() {
            // Nothing to lay out still shows one blank page.
            pages = render(&[Vec::new()], &self.dimensions, &design);
        }

        debug!(
            generation,
            template = %template,
            blocks = block_count,
            pages = pages.len(),
            "Layout pass complete"
        );

        DerivedLayout {
            generation,
            template,
            title: document.content.personal_info.full_name.trim().to_string(),
            design,
            page_count: pages.len(),
            partition,
            degraded_blocks: pass.degraded,
            pages,
        }
    }

    /// Runs `compute` on the blocking pool.
    pub async fn compute_deferred(
        &self,
        document: ResumeDocument,
        generation: u64,
    ) -> Result<DerivedLayout, AppError> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.compute(&document, generation))
            .await
            .map_err(|e| AppError::Internal(anyhow!("layout task panicked: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::ContentBlock;
    use crate::layout::measurer::LaidOutBox;
    use crate::models::design::DesignSettings;
    use crate::templates::fixtures::make_content;

    /// Reports a fixed height per block id prefix, like a browser would.
    struct ScriptedSurface;

    impl LayoutSurface for ScriptedSurface {
        fn lay_out(
            &self,
            blocks: &[ContentBlock],
            _content_width_px: f32,
            _design: &ResolvedDesign,
        ) -> Vec<LaidOutBox> {
            blocks
                .iter()
                .map(|b| LaidOutBox {
                    block_id: b.id.clone(),
                    height_px: match b.id.as_str() {
                        "header" => 120.0,
                        "summary" => 80.0,
                        id if id.starts_with("exp-") => 150.0,
                        _ => 0.0,
                    },
                })
                .collect()
        }
    }

    /// Reports nothing at all.
    struct BlankSurface;

    impl LayoutSurface for BlankSurface {
        fn lay_out(&self, _: &[ContentBlock], _: f32, _: &ResolvedDesign) -> Vec<LaidOutBox> {
            Vec::new()
        }
    }

    fn make_document(experiences: usize) -> ResumeDocument {
        let mut content = make_content(experiences);
        content.education.clear();
        content.skills.clear();
        ResumeDocument {
            content,
            design_settings: DesignSettings::default(),
            selected_template: TemplateId::Classic,
        }
    }

    #[test]
    fn test_scripted_heights_paginate_as_expected() {
        let dimensions = PageDimensions {
            width_mm: 210.0,
            height_mm: 850.0 / 3.78 + 40.0,
            margin_mm: 20.0,
        };
        let engine = LayoutEngine::new(Arc::new(ScriptedSurface), dimensions);
        let layout = engine.compute(&make_document(5), 1);

        // ~850px printable: header 120 + summary 80 + 4 × 150 = 800, exp-5 overflows.
        assert_eq!(layout.page_count, 2);
        assert_eq!(
            layout.partition[0],
            vec!["header", "summary", "experience-title", "exp-1", "exp-2", "exp-3", "exp-4"]
        );
        assert_eq!(layout.partition[1], vec!["exp-5", "footer"]);
        assert_eq!(layout.pages[1].number, 2);
        assert!(layout.pages[1].html.contains("Page 2"));
    }

    #[test]
    fn test_blank_surface_degrades_every_block() {
        let engine = LayoutEngine::new(Arc::new(BlankSurface), PageDimensions::A4);
        let layout = engine.compute(&make_document(2), 1);
        assert_eq!(layout.page_count, 1);
        assert_eq!(layout.degraded_blocks, layout.partition[0].len());
        assert!(layout.partition[0].iter().all(|id| id.starts_with("unknown-")));
    }

    #[test]
    fn test_long_resume_spans_pages_in_order() {
        let engine = LayoutEngine::default();
        let layout = engine.compute(&make_document(20), 3);
        assert!(layout.page_count > 1);
        assert_eq!(layout.generation, 3);
        let flattened: Vec<&String> = layout.partition.iter().flatten().collect();
        assert_eq!(flattened.first().map(|s| s.as_str()), Some("header"));
        assert_eq!(flattened.last().map(|s| s.as_str()), Some("footer"));
        let printable = PageDimensions::A4.printable_height_px();
        for page in &layout.pages {
            if page.block_ids.len() > 1 {
                assert!(page.content_height_px <= printable);
            }
        }
    }

    #[test]
    fn test_same_document_same_layout() {
        let engine = LayoutEngine::default();
        let doc = make_document(8);
        let a = engine.compute(&doc, 1);
        let b = engine.compute(&doc, 1);
        assert_eq!(a.partition, b.partition);
        assert_eq!(a.pages, b.pages);
    }

    #[tokio::test]
    async fn test_deferred_matches_sync() {
        let engine = LayoutEngine::default();
        let doc = make_document(3);
        let sync = engine.compute(&doc, 9);
        let deferred = engine.compute_deferred(doc, 9).await.unwrap();
        assert_eq!(sync.partition, deferred.partition);
    }
}
