use crate::core::dimensions::{Dimension, DimensionKind};
use crate::core::similarity::{
    boolean_match, budget_compatibility, ordered_closeness, round2, scaled_difference,
    token_similarity,
};
use crate::models::{MatchDimension, MatchResult, PreferenceProfile};

/// Compute the compatibility of two preference profiles
///
/// Each dimension is scored only when both profiles answered it; unanswered
/// dimensions are left out of the breakdown rather than counted as zero.
/// The aggregate is the weighted mean over the dimensions actually scored:
///
/// score = sum(score_d * weight_d) / sum(weight_d)
///
/// rounded to two decimals, or 0 when nothing could be scored.
pub fn compute_match(a: &PreferenceProfile, b: &PreferenceProfile) -> MatchResult {
    let mut dimensions = Vec::with_capacity(Dimension::ALL.len());
    let mut weighted_score = 0.0;
    let mut total_weight = 0.0;

    for dimension in Dimension::ALL {
        if let Some(score) = score_dimension(dimension, a, b) {
            let entry = MatchDimension::new(dimension, score);
            weighted_score += entry.contribution();
            total_weight += entry.weight;
            dimensions.push(entry);
        }
    }

    let score = if total_weight > 0.0 {
        round2(weighted_score / total_weight)
    } else {
        0.0
    };

    MatchResult { score, dimensions }
}

/// Aggregate score only, for callers that don't need the breakdown
pub fn calculate_similarity(a: &PreferenceProfile, b: &PreferenceProfile) -> f64 {
    compute_match(a, b).score
}

/// Score one dimension, or `None` when either profile is missing the answer
pub fn score_dimension(
    dimension: Dimension,
    a: &PreferenceProfile,
    b: &PreferenceProfile,
) -> Option<f64> {
    match dimension.kind() {
        DimensionKind::ScaledDifference { max_diff } => {
            let (x, y) = match dimension {
                Dimension::Cleanliness => (a.cleanliness_level?, b.cleanliness_level?),
                Dimension::Noise => (a.noise_level?, b.noise_level?),
                _ => return None,
            };
            Some(scaled_difference(x, y, max_diff))
        }
        DimensionKind::OrderedCategory { ordering, fallback } => {
            let x = a.category(dimension)?;
            let y = b.category(dimension)?;
            Some(ordered_closeness(x, y, ordering, fallback))
        }
        DimensionKind::BudgetRange => Some(budget_compatibility(a.budget()?, b.budget()?)),
        DimensionKind::BooleanMatch { mismatch } => {
            let (x, y) = match dimension {
                Dimension::Smoking => (a.smoking?, b.smoking?),
                Dimension::Pets => (a.pets?, b.pets?),
                _ => return None,
            };
            Some(boolean_match(x, y, mismatch))
        }
        DimensionKind::TokenSet => {
            let x = a.preferred_location.as_deref()?;
            let y = b.preferred_location.as_deref()?;
            Some(token_similarity(x, y))
        }
    }
}
