use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CandidatePreferences, PreferenceProfile};

/// Request to score two profiles against each other
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(nested)]
    #[serde(alias = "profile_a", rename = "profileA", default)]
    pub profile_a: PreferenceProfile,
    #[validate(nested)]
    #[serde(alias = "profile_b", rename = "profileB", default)]
    pub profile_b: PreferenceProfile,
}

/// Request to rank a caller-supplied pool of candidates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankMatchesRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[validate(nested)]
    pub profile: PreferenceProfile,
    #[validate(nested)]
    #[serde(default)]
    pub candidates: Vec<RankCandidate>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// One candidate in a rank request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidate {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(nested)]
    #[serde(default)]
    pub preferences: PreferenceProfile,
}

impl From<RankCandidate> for CandidatePreferences {
    fn from(candidate: RankCandidate) -> Self {
        Self {
            user_id: candidate.user_id,
            preferences: candidate.preferences,
        }
    }
}

/// Query string of the roommates endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoommatesQuery {
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub refresh: bool,
}
