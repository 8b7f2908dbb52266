//! Top-K selection over a score vector.

use data_loader::ItemIndex;
use std::cmp::Ordering;

/// How many items a recommendation holds at most
pub const DEFAULT_TOP_K: usize = 10;

/// An item index together with the score that ranked it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedItem {
    pub index: ItemIndex,
    pub score: f32,
}

/// Ascending score order in which NaN sorts above every number.
fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Best-first order: higher score first, then higher index among equal scores.
fn best_first(a: &RankedItem, b: &RankedItem) -> Ordering {
    compare_scores(b.score, a.score).then_with(|| b.index.cmp(&a.index))
}

/// Select the `k` best-scoring item indices, highest score first.
///
/// Returns fewer than `k` entries when there are fewer scores. The order is
/// total, so the result is the same for the same input.
pub fn top_k(scores: &[f32], k: usize) -> Vec<RankedItem> {
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedItem> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| RankedItem {
            index: i as ItemIndex,
            score,
        })
        .collect();

    if ranked.len() > k {
        ranked.select_nth_unstable_by(k - 1, best_first);
        ranked.truncate(k);
    }
    ranked.sort_by(best_first);
    ranked
}
