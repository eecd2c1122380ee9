use crate::core::scoring::compute_match;
use crate::models::{CandidatePreferences, PreferenceProfile, RankedMatch};

/// Result of ranking a pool of candidates
#[derive(Debug)]
pub struct RankOutcome {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Ranks candidate roommates for one seeker
///
/// The scorer only compares pairs; the matcher runs it over a pool,
/// drops candidates at or below the minimum score, sorts by score
/// (descending, then user id ascending so ties are stable) and keeps the
/// top `limit`.
#[derive(Debug, Clone)]
pub struct Matcher {
    min_score: f64,
}

impl Matcher {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// Score every candidate against the seeker and keep the best `limit`
    ///
    /// # Arguments
    /// * `seeker_id` - Excluded from the pool if present
    /// * `seeker` - The seeker's preferences
    /// * `candidates` - Stored preference rows of other users
    /// * `limit` - Maximum number of matches to return
    pub fn rank(
        &self,
        seeker_id: Option<&str>,
        seeker: &PreferenceProfile,
        candidates: Vec<CandidatePreferences>,
        limit: usize,
    ) -> RankOutcome {
        let total_candidates = candidates.len();

        let mut matches: Vec<RankedMatch> = candidates
            .into_iter()
            .filter(|candidate| Some(candidate.user_id.as_str()) != seeker_id)
            .filter_map(|candidate| {
                let result = compute_match(seeker, &candidate.preferences);

                if result.score > self.min_score {
                    Some(RankedMatch {
                        user_id: candidate.user_id,
                        score: result.score,
                        breakdown: result.dimensions,
                    })
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates (limit {})",
            matches.len(),
            total_candidates,
            limit
        );

        RankOutcome {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(0.0)
    }
}
