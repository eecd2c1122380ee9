use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::core::dimensions::Dimension;

/// Lifestyle answers supplied by one person
///
/// Every field is optional: a dimension is only scored when both people
/// answered it. Field names follow the stored preference rows, and unknown
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PreferenceProfile {
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default)]
    pub cleanliness_level: Option<f64>,
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default)]
    pub noise_level: Option<f64>,
    #[serde(default)]
    pub sleep_schedule: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub pets: Option<bool>,
    #[serde(default)]
    pub guests_frequency: Option<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub study_style: Option<String>,
    #[serde(default)]
    pub conflict_style: Option<String>,
    #[serde(default)]
    pub routine_flexibility: Option<String>,
    #[serde(default)]
    pub social_energy: Option<String>,
}

impl PreferenceProfile {
    /// Budget as a (min, max) pair, only when both bounds are present
    pub fn budget(&self) -> Option<(f64, f64)> {
        Some((self.budget_min?, self.budget_max?))
    }

    /// Categorical answer for a dimension, if that dimension is categorical
    ///
    /// An empty string is the form's "Select..." placeholder and counts as
    /// unanswered.
    pub fn category(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::SleepSchedule => &self.sleep_schedule,
            Dimension::GuestsFrequency => &self.guests_frequency,
            Dimension::StudyStyle => &self.study_style,
            Dimension::ConflictStyle => &self.conflict_style,
            Dimension::RoutineFlexibility => &self.routine_flexibility,
            Dimension::SocialEnergy => &self.social_energy,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Score for a single compatibility axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDimension {
    pub key: Dimension,
    pub label: String,
    pub score: f64,
    pub weight: f64,
}

impl MatchDimension {
    pub fn new(dimension: Dimension, score: f64) -> Self {
        Self {
            key: dimension,
            label: dimension.label().to_string(),
            score,
            weight: dimension.weight(),
        }
    }

    /// Share this dimension adds to the weighted sum
    #[inline]
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// Aggregate compatibility of two profiles with its per-dimension breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub dimensions: Vec<MatchDimension>,
}

impl MatchResult {
    /// The `n` dimensions contributing most to the score, highest first
    pub fn top_factors(&self, n: usize) -> Vec<MatchDimension> {
        let mut factors = self.dimensions.clone();
        // Stable sort keeps table order for equal contributions
        factors.sort_by(|a, b| {
            b.contribution()
                .partial_cmp(&a.contribution())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        factors.truncate(n);
        factors
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&MatchDimension> {
        self.dimensions.iter().find(|d| d.key == dimension)
    }
}

/// Stored preference row for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePreferences {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub preferences: PreferenceProfile,
}

/// A candidate scored against the seeker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: f64,
    pub breakdown: Vec<MatchDimension>,
}

/// Authenticated user as reported by the auth backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Public user row shown alongside a roommate match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Any other columns of the user row, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User row merged with its compatibility result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommateMatch {
    #[serde(flatten)]
    pub user: UserSummary,
    pub similarity_score: f64,
    pub match_breakdown: Vec<MatchDimension>,
}
