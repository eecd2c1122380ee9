use std::collections::BTreeSet;

use crate::core::dimensions::{
    BUDGET_MIDPOINT_SCALE, BUDGET_MIDPOINT_SHARE, BUDGET_OVERLAP_SHARE, LOCATION_FALLBACK,
};

/// Score two values on a bounded numeric scale (0-100)
///
/// Identical values score 100, a difference of `max_diff` or more scores 0,
/// linear in between.
#[inline]
pub fn scaled_difference(a: f64, b: f64, max_diff: f64) -> f64 {
    let diff = (a - b).abs();
    ((1.0 - diff / max_diff) * 100.0).clamp(0.0, 100.0)
}

/// Score two categorical answers by their distance in `ordering` (0-100)
///
/// Equal answers always score 100, including answers outside the ordering.
/// If either answer is not in the ordering the dimension scores `fallback`.
#[inline]
pub fn ordered_closeness(a: &str, b: &str, ordering: &[&str], fallback: f64) -> f64 {
    if a == b {
        return 100.0;
    }

    let index_a = ordering.iter().position(|value| *value == a);
    let index_b = ordering.iter().position(|value| *value == b);

    match (index_a, index_b) {
        (Some(index_a), Some(index_b)) if ordering.len() > 1 => {
            let steps = index_a.abs_diff(index_b) as f64;
            let span = (ordering.len() - 1) as f64;
            ((1.0 - steps / span) * 100.0).clamp(0.0, 100.0)
        }
        _ => fallback,
    }
}

/// Score two budget ranges (0-100)
///
/// Blends interval overlap (overlap / union) with how close the midpoints
/// are. Each range may be given in either order.
pub fn budget_compatibility(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (min_a, max_a) = ordered_pair(a);
    let (min_b, max_b) = ordered_pair(b);

    let overlap = (max_a.min(max_b) - min_a.max(min_b)).max(0.0);
    let union = max_a.max(max_b) - min_a.min(min_b);

    // Two identical single-point budgets have no width to compare
    let overlap_score = if union > 0.0 {
        overlap / union * 100.0
    } else {
        100.0
    };

    let midpoint_gap = ((min_a + max_a) / 2.0 - (min_b + max_b) / 2.0).abs();
    let midpoint_score = ((1.0 - midpoint_gap / BUDGET_MIDPOINT_SCALE) * 100.0).clamp(0.0, 100.0);

    overlap_score * BUDGET_OVERLAP_SHARE + midpoint_score * BUDGET_MIDPOINT_SHARE
}

#[inline]
fn ordered_pair((low, high): (f64, f64)) -> (f64, f64) {
    if low <= high {
        (low, high)
    } else {
        (high, low)
    }
}

/// Score two yes/no answers: 100 when equal, otherwise the mismatch penalty
#[inline]
pub fn boolean_match(a: bool, b: bool, mismatch: f64) -> f64 {
    if a == b {
        100.0
    } else {
        mismatch
    }
}

/// Split free text into a set of lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of the token sets of two strings (0-100)
///
/// Returns the location fallback when either side has no tokens.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return LOCATION_FALLBACK;
    }

    let shared = tokens_a.intersection(&tokens_b).count() as f64;
    let union = tokens_a.union(&tokens_b).count() as f64;

    shared / union * 100.0
}

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
