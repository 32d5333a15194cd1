//! First-fit pagination.
//!
//! Blocks are taken in order and appended to the current page while the
//! running height stays within the printable height (`<=`, raw floats, no
//! rounding). The first block that would overflow closes the page and opens
//! the next one. A block taller than a whole page is placed alone on its own
//! page and allowed to overflow. There is no lookahead and no rebalancing.

use crate::layout::blocks::MeasuredBlock;

/// Partitions measured blocks into pages.
///
/// Every block lands on exactly one page, in input order. Zero blocks yield
/// zero pages; callers that need something to show render an empty page.
pub fn paginate(measured: Vec<MeasuredBlock>, printable_height_px: f32) -> Vec<Vec<MeasuredBlock>> {
    let mut pages: Vec<Vec<MeasuredBlock>> = Vec::new();
    let mut current: Vec<MeasuredBlock> = Vec::new();
    let mut running = 0.0_f32;

    for block in measured {
        if !current.is_empty() && running + block.height_px > printable_height_px {
            pages.push(std::mem::take(&mut current));
            running = 0.0;
        }
        running += block.height_px;
        current.push(block);
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Summed block height of one page.
pub fn page_height(page: &[MeasuredBlock]) -> f32 {
    page.iter().map(|b| b.height_px).sum()
}

/// Block ids per page, for reporting and debugging.
pub fn partition_ids(pages: &[Vec<MeasuredBlock>]) -> Vec<Vec<String>> {
    pages
        .iter()
        .map(|page| page.iter().map(|b| b.id.clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn make_blocks(heights: &[f32]) -> Vec<MeasuredBlock> {
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| MeasuredBlock::synthetic(format!("b{i}"), *h))
            .collect()
    }

    /// Small deterministic generator so the invariant checks cover many shapes.
    fn pseudo_random_heights(seed: u64, count: usize, max: f32) -> Vec<f32> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (0..count)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) as f32 / (1u64 << 31) as f32) * max
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_pages() {
        assert!(paginate(vec![], 800.0).is_empty());
    }

    #[test]
    fn test_exact_fit_stays_on_one_page() {
        let pages = paginate(make_blocks(&[400.0, 400.0, 257.0]), 1057.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 3);
    }

    #[test]
    fn test_resume_scenario_partition() {
        let mut blocks = vec![
            MeasuredBlock::synthetic("header", 120.0),
            MeasuredBlock::synthetic("summary", 80.0),
        ];
        for i in 1..=5 {
            blocks.push(MeasuredBlock::synthetic(format!("exp-{i}"), 150.0));
        }

        let pages = paginate(blocks, 800.0);
        let ids = partition_ids(&pages);
        assert_eq!(
            ids,
            vec![
                vec!["header", "summary", "exp-1", "exp-2", "exp-3", "exp-4"],
                vec!["exp-5"],
            ]
        );
        assert_eq!(page_height(&pages[0]), 800.0);
        assert_eq!(page_height(&pages[1]), 150.0);
    }

    #[test]
    fn test_oversized_block_alone_on_its_own_page() {
        let pages = paginate(make_blocks(&[100.0, 1500.0, 100.0]), 800.0);
        let ids = partition_ids(&pages);
        assert_eq!(ids, vec![vec!["b0"], vec!["b1"], vec!["b2"]]);
    }

    #[test]
    fn test_oversized_first_block_does_not_leave_empty_page() {
        let pages = paginate(make_blocks(&[2000.0, 10.0]), 800.0);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn test_sub_pixel_overflow_tips_to_next_page() {
        let pages = paginate(make_blocks(&[500.0, 300.0005]), 800.0);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_zero_height_blocks_stay_with_neighbours() {
        let pages = paginate(make_blocks(&[800.0, 0.0, 0.0, 1.0]), 800.0);
        let ids = partition_ids(&pages);
        assert_eq!(ids, vec![vec!["b0", "b1", "b2"], vec!["b3"]]);
    }

    #[test]
    fn test_partition_invariants_hold_for_many_inputs() {
        let printable = 971.46_f32;
        for seed in 0..200u64 {
            let count = (seed % 40) as usize;
            let heights = pseudo_random_heights(seed, count, 1400.0);
            let blocks = make_blocks(&heights);
            let expected: Vec<String> = blocks.iter().map(|b| b.id.clone()).collect();

            let pages = paginate(blocks, printable);

            // order preserved, nothing lost or duplicated
            let flattened: Vec<String> = pages.iter().flatten().map(|b| b.id.clone()).collect();
            assert_eq!(flattened, expected, "seed {seed}");
            let unique: HashSet<&String> = flattened.iter().collect();
            assert_eq!(unique.len(), flattened.len(), "seed {seed}");

            for page in &pages {
                assert!(!page.is_empty(), "seed {seed}: empty page");
                if page.len() > 1 {
                    assert!(page_height(page) <= printable, "seed {seed}: overfull page");
                }
                if page.iter().any(|b| b.height_px > printable) {
                    assert_eq!(page.len(), 1, "seed {seed}: oversized block shares a page");
                }
            }
        }
    }

    #[test]
    fn test_pagination_is_deterministic() {
        let heights = pseudo_random_heights(7, 25, 500.0);
        let a = partition_ids(&paginate(make_blocks(&heights), 900.0));
        let b = partition_ids(&paginate(make_blocks(&heights), 900.0));
        assert_eq!(a, b);
    }
}
