// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AuthUser, CandidatePreferences, MatchDimension, MatchResult, PreferenceProfile, RankedMatch,
    RoommateMatch, UserSummary,
};
pub use requests::{CompareRequest, RankMatchesRequest, RoommatesQuery};
pub use responses::{
    CompareResponse, ErrorResponse, HealthResponse, RankMatchesResponse, RoommatesResponse,
    SimilarityResponse,
};
