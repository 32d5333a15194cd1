//! Block measurement.
//!
//! Measuring needs something that can actually lay text out. That capability
//! sits behind `LayoutSurface`: given blocks, a fixed content width and the
//! design, it reports one laid-out box per block it managed to lay out.
//! `measure` pairs boxes back up with blocks and never fails the batch.

use tracing::warn;

use crate::layout::blocks::{fallback_block_id, ContentBlock, MeasuredBlock};
use crate::models::design::ResolvedDesign;

/// Height of one block as laid out on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutBox {
    pub block_id: String,
    pub height_px: f32,
}

/// Something that can lay blocks out at a fixed width with unconstrained
/// height. Boxes are returned in block order.
pub trait LayoutSurface: Send + Sync {
    fn lay_out(
        &self,
        blocks: &[ContentBlock],
        content_width_px: f32,
        design: &ResolvedDesign,
    ) -> Vec<LaidOutBox>;
}

/// Result of one measurement pass.
#[derive(Debug, Clone)]
pub struct MeasurementPass {
    /// Same order and length as the input blocks.
    pub blocks: Vec<MeasuredBlock>,
    /// Blocks that had no usable laid-out box and were measured as zero.
    pub degraded: usize,
}

/// Measures `blocks` on `surface`.
///
/// A block whose box is missing, belongs to another block, or reports a
/// non-finite or negative height is kept with height 0 and the id
/// `unknown-<index>`.
pub fn measure(
    surface: &dyn LayoutSurface,
    blocks: Vec<ContentBlock>,
    content_width_px: f32,
    design: &ResolvedDesign,
) -> MeasurementPass {
    let boxes = surface.lay_out(&blocks, content_width_px, design);
    let mut degraded = 0usize;

    let measured = blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let laid_out = boxes.get(index).filter(|b| {
                b.block_id == block.id && b.height_px.is_finite() && b.height_px >= 0.0
            });
            match laid_out {
                Some(b) => {
                    let height = b.height_px;
                    MeasuredBlock::new(block, height)
                }
                None => {
                    degraded += 1;
                    warn!(
                        block_id = %block.id,
                        index,
                        "Measurement: no usable box for block, measuring as zero height"
                    );
                    MeasuredBlock {
                        id: fallback_block_id(index),
                        height_px: 0.0,
                        elements: block.elements,
                    }
                }
            }
        })
        .collect();

    MeasurementPass {
        blocks: measured,
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that reports fixed heights and can be told to skip blocks.
    struct FixedSurface {
        height: f32,
        skip_index: Option<usize>,
    }

    impl LayoutSurface for FixedSurface {
        fn lay_out(
            &self,
            blocks: &[ContentBlock],
            _content_width_px: f32,
            _design: &ResolvedDesign,
        ) -> Vec<LaidOutBox> {
            blocks
                .iter()
                .enumerate()
                .map(|(i, b)| LaidOutBox {
                    block_id: if Some(i) == self.skip_index {
                        "something-else".to_string()
                    } else {
                        b.id.clone()
                    },
                    height_px: self.height,
                })
                .collect()
        }
    }

    fn make_blocks(ids: &[&str]) -> Vec<ContentBlock> {
        ids.iter().map(|id| ContentBlock::new(*id, vec![])).collect()
    }

    #[test]
    fn test_measure_preserves_order_and_heights() {
        let surface = FixedSurface {
            height: 42.0,
            skip_index: None,
        };
        let pass = measure(
            &surface,
            make_blocks(&["header", "summary", "footer"]),
            600.0,
            &ResolvedDesign::default(),
        );
        let ids: Vec<_> = pass.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["header", "summary", "footer"]);
        assert!(pass.blocks.iter().all(|b| b.height_px == 42.0));
        assert_eq!(pass.degraded, 0);
    }

    #[test]
    fn test_mismatched_box_degrades_to_zero_height() {
        let surface = FixedSurface {
            height: 42.0,
            skip_index: Some(1),
        };
        let pass = measure(
            &surface,
            make_blocks(&["header", "summary", "footer"]),
            600.0,
            &ResolvedDesign::default(),
        );
        assert_eq!(pass.blocks.len(), 3);
        assert_eq!(pass.blocks[1].id, "unknown-1");
        assert_eq!(pass.blocks[1].height_px, 0.0);
        assert_eq!(pass.degraded, 1);
    }

    #[test]
    fn test_missing_boxes_degrade_instead_of_failing() {
        struct EmptySurface;
        impl LayoutSurface for EmptySurface {
            fn lay_out(&self, _: &[ContentBlock], _: f32, _: &ResolvedDesign) -> Vec<LaidOutBox> {
                Vec::new()
            }
        }
        let pass = measure(
            &EmptySurface,
            make_blocks(&["header", "footer"]),
            600.0,
            &ResolvedDesign::default(),
        );
        assert_eq!(pass.degraded, 2);
        assert_eq!(pass.blocks[0].id, "unknown-0");
        assert_eq!(pass.blocks[1].id, "unknown-1");
    }

    #[test]
    fn test_nan_height_degrades() {
        let surface = FixedSurface {
            height: f32::NAN,
            skip_index: None,
        };
        let pass = measure(
            &surface,
            make_blocks(&["header"]),
            600.0,
            &ResolvedDesign::default(),
        );
        assert_eq!(pass.blocks[0].height_px, 0.0);
        assert_eq!(pass.degraded, 1);
    }
}
