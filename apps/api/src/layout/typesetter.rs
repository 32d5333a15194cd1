//! Headless typesetter: a `LayoutSurface` that lays blocks out arithmetically
//! from static font metrics instead of a browser.
//!
//! The box model here mirrors what `renderer` emits: the same font sizes,
//! line heights, margins, tag padding and gaps, and the trailing section
//! padding after every block. Change one and the other must follow.

use crate::layout::blocks::{ContentBlock, Element, FlowRun, TextRun};
use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::layout::measurer::{LaidOutBox, LayoutSurface};
use crate::layout::page::REM_PX;
use crate::models::design::ResolvedDesign;

/// Bold glyphs set roughly 6% wider than regular ones.
pub const BOLD_WIDTH_FACTOR: f32 = 1.06;
/// Minimum space between the left and right halves of a row.
pub const ROW_GAP_PX: f32 = 8.0;
pub const PILL_PAD_X_PX: f32 = 12.0;
pub const PILL_PAD_Y_PX: f32 = 4.0;
pub const FLOW_GAP_PX: f32 = 8.0;
pub const METER_DOT_PX: f32 = 10.0;
pub const PHOTO_GAP_PX: f32 = 24.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Typesetter;

impl LayoutSurface for Typesetter {
    fn lay_out(
        &self,
        blocks: &[ContentBlock],
        content_width_px: f32,
        design: &ResolvedDesign,
    ) -> Vec<LaidOutBox> {
        blocks
            .iter()
            .map(|block| LaidOutBox {
                block_id: block.id.clone(),
                height_px: block_height(block, content_width_px, design),
            })
            .collect()
    }
}

/// Natural height of a block at `width_px`, including its trailing padding.
pub fn block_height(block: &ContentBlock, width_px: f32, design: &ResolvedDesign) -> f32 {
    stack_height(&block.elements, width_px, design) + design.section_padding_px()
}

fn stack_height(elements: &[Element], width_px: f32, design: &ResolvedDesign) -> f32 {
    elements
        .iter()
        .map(|e| element_height(e, width_px, design))
        .sum()
}

fn element_height(element: &Element, width_px: f32, design: &ResolvedDesign) -> f32 {
    let metrics = get_metrics(design.font);
    match element {
        Element::Text(run) => text_height(run, width_px, metrics, design),

        Element::Row { left, right } => {
            let right_text = right.display_text();
            let right_w = metrics.measure_px(&right_text, glyph_px(right, design));
            let left_width = (width_px - right_w - ROW_GAP_PX).max(0.0);
            let left_lines =
                metrics.wrap_line_count(&left.display_text(), glyph_px(left, design), left_width);
            let left_h = left_lines as f32 * line_px(left, design);
            let right_h = if right_text.trim().is_empty() {
                0.0
            } else {
                line_px(right, design)
            };
            left_h.max(right_h) + left.margin_bottom_rem * REM_PX
        }

        Element::Flow(flow) => flow_height(flow, width_px, metrics, design),

        Element::SkillMeter {
            entries,
            margin_bottom_rem,
        } => {
            if entries.is_empty() {
                return 0.0;
            }
            let row_h = (design.body_px() * design.line_height).max(METER_DOT_PX);
            entries.len() as f32 * row_h + margin_bottom_rem * REM_PX
        }

        Element::Rule {
            thickness_px,
            margin_bottom_rem,
            ..
        } => thickness_px + margin_bottom_rem * REM_PX,

        Element::Photo {
            photo,
            margin_bottom_rem,
        } => photo.height_px + margin_bottom_rem * REM_PX,

        Element::WithPhoto {
            photo,
            body,
            margin_bottom_rem,
        } => {
            let body_width = (width_px - photo.width_px - PHOTO_GAP_PX).max(0.0);
            let body_h = stack_height(body, body_width, design);
            photo.height_px.max(body_h) + margin_bottom_rem * REM_PX
        }
    }
}

/// Font size used for width measurement; bold runs set wider.
fn glyph_px(run: &TextRun, design: &ResolvedDesign) -> f32 {
    let font_px = run.role.font_px(design);
    if run.bold {
        font_px * BOLD_WIDTH_FACTOR
    } else {
        font_px
    }
}

fn line_px(run: &TextRun, design: &ResolvedDesign) -> f32 {
    run.role.font_px(design) * design.line_height
}

fn text_height(
    run: &TextRun,
    width_px: f32,
    metrics: &FontMetricTable,
    design: &ResolvedDesign,
) -> f32 {
    let lines = metrics.wrap_line_count(&run.display_text(), glyph_px(run, design), width_px);
    if lines == 0 {
        return 0.0;
    }
    lines as f32 * line_px(run, design) + run.margin_bottom_rem * REM_PX
}

fn flow_height(
    flow: &FlowRun,
    width_px: f32,
    metrics: &FontMetricTable,
    design: &ResolvedDesign,
) -> f32 {
    let items: Vec<&str> = flow
        .items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return 0.0;
    }

    let font_px = flow.role.font_px(design);
    let (pad_x, pad_y) = if flow.pill {
        (PILL_PAD_X_PX, PILL_PAD_Y_PX)
    } else {
        (0.0, 0.0)
    };

    let mut rows = 1usize;
    let mut current = 0.0_f32;
    let mut first = true;
    for item in items {
        let item_w = metrics.measure_px(item, font_px) + 2.0 * pad_x;
        let gap = if first { 0.0 } else { FLOW_GAP_PX };
        if !first && current + gap + item_w > width_px {
            rows += 1;
            current = item_w;
        } else {
            current += gap + item_w;
            first = false;
        }
    }

    let row_h = font_px * design.line_height + 2.0 * pad_y;
    rows as f32 * row_h + (rows - 1) as f32 * FLOW_GAP_PX + flow.margin_bottom_rem * REM_PX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{PhotoSlot, TextRole, Tone};
    use crate::models::design::DesignSettings;

    fn make_design(scale: f32) -> ResolvedDesign {
        DesignSettings {
            scale: Some(scale),
            ..Default::default()
        }
        .resolve()
    }

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::new(
            "summary",
            vec![Element::Text(TextRun::new(text, TextRole::Body).margin(0.5))],
        )
    }

    #[test]
    fn test_empty_block_is_just_padding() {
        let design = make_design(1.0);
        let block = ContentBlock::new("footer", vec![]);
        assert_eq!(block_height(&block, 600.0, &design), 32.0);
    }

    #[test]
    fn test_single_line_paragraph_height() {
        let design = make_design(1.0);
        // 1 line × 16px × 1.6 + 0.5rem margin + 2rem padding
        let h = block_height(&paragraph("Short"), 600.0, &design);
        assert!((h - (25.6 + 8.0 + 32.0)).abs() < 1e-3, "got {h}");
    }

    #[test]
    fn test_narrower_width_is_taller() {
        let design = make_design(1.0);
        let block = paragraph(&"distributed systems engineer ".repeat(12));
        let wide = block_height(&block, 640.0, &design);
        let narrow = block_height(&block, 240.0, &design);
        assert!(narrow > wide);
    }

    #[test]
    fn test_lay_out_returns_one_box_per_block_in_order() {
        let design = make_design(1.0);
        let blocks = vec![paragraph("a"), ContentBlock::new("footer", vec![])];
        let boxes = Typesetter.lay_out(&blocks, 600.0, &design);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].block_id, "summary");
        assert_eq!(boxes[1].block_id, "footer");
    }

    #[test]
    fn test_flow_wraps_pills_onto_rows() {
        let design = make_design(1.0);
        let flow = FlowRun {
            items: (0..30).map(|i| format!("Skill {i}")).collect(),
            role: TextRole::Detail,
            tone: Tone::Secondary,
            pill: true,
            align: None,
            margin_bottom_rem: 0.0,
        };
        let one_row = FlowRun {
            items: vec!["Rust".to_string()],
            ..flow.clone()
        };
        let metrics = get_metrics(design.font);
        let many = flow_height(&flow, 600.0, metrics, &design);
        let single = flow_height(&one_row, 600.0, metrics, &design);
        assert!(many > single * 2.0);
    }

    #[test]
    fn test_photo_sets_minimum_height() {
        let design = make_design(1.0);
        let element = Element::WithPhoto {
            photo: PhotoSlot {
                url: "https://cdn.example.com/p.jpg".to_string(),
                width_px: 120.0,
                height_px: 150.0,
                round: false,
            },
            body: vec![Element::Text(TextRun::new("Ada", TextRole::Name))],
            margin_bottom_rem: 0.0,
        };
        assert_eq!(element_height(&element, 600.0, &design), 150.0);
    }

    #[test]
    fn test_row_right_side_counts_when_left_empty() {
        let design = make_design(1.0);
        let element = Element::Row {
            left: TextRun::new("", TextRole::Subheading),
            right: TextRun::new("2020 - 2022", TextRole::Detail),
        };
        let h = element_height(&element, 600.0, &design);
        assert!((h - 14.0 * 1.6).abs() < 1e-3, "got {h}");
    }
}
