use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchDimension, RankedMatch, RoommateMatch};

/// Response for the compare endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub score: f64,
    pub dimensions: Vec<MatchDimension>,
    #[serde(rename = "topFactors")]
    pub top_factors: Vec<MatchDimension>,
}

/// Response for the similarity endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub score: f64,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankMatchesResponse {
    pub matches: Vec<RankedMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the roommates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommatesResponse {
    pub matches: Vec<RoommateMatch>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
