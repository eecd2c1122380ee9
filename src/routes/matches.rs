use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{calculate_similarity, compute_match, Matcher};
use crate::models::{
    CandidatePreferences, CompareRequest, CompareResponse, ErrorResponse, HealthResponse,
    RankMatchesRequest, RankMatchesResponse, SimilarityResponse,
};
use crate::services::{MatchCache, SupabaseClient};
use std::sync::Arc;

/// Number of breakdown entries surfaced as top factors
pub const TOP_FACTORS: usize = 3;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: MatchCache,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/compare", web::post().to(compare))
        .route("/matches/similarity", web::post().to(similarity))
        .route("/matches/rank", web::post().to(rank));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}

/// Compare two profiles
///
/// POST /api/v1/matches/compare
///
/// Request body:
/// ```json
/// {
///   "profileA": { "cleanliness_level": 8, "sleep_schedule": "early_bird" },
///   "profileB": { "cleanliness_level": 7, "sleep_schedule": "normal" }
/// }
/// ```
async fn compare(req: web::Json<CompareRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = compute_match(&req.profile_a, &req.profile_b);
    let top_factors = result.top_factors(TOP_FACTORS);

    tracing::debug!(
        "Compared profiles: score={} dimensions={}",
        result.score,
        result.dimensions.len()
    );

    HttpResponse::Ok().json(CompareResponse {
        score: result.score,
        dimensions: result.dimensions,
        top_factors,
    })
}

/// Aggregate score of two profiles
///
/// POST /api/v1/matches/similarity
async fn similarity(req: web::Json<CompareRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    HttpResponse::Ok().json(SimilarityResponse {
        score: calculate_similarity(&req.profile_a, &req.profile_b),
    })
}

/// Rank a caller-supplied pool of candidates
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "profile": { "cleanliness_level": 8 },
///   "candidates": [{ "userId": "string", "preferences": { "cleanliness_level": 7 } }],
///   "limit": 10
/// }
/// ```
async fn rank(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    if req.candidates.len() > state.matching.max_candidates {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Too many candidates",
            format!(
                "At most {} candidates can be ranked per request, got {}",
                state.matching.max_candidates,
                req.candidates.len()
            ),
            400,
        ));
    }

    let limit = state.matching.resolve_limit(req.limit);
    let req = req.into_inner();
    let candidates: Vec<CandidatePreferences> =
        req.candidates.into_iter().map(CandidatePreferences::from).collect();

    let outcome = state
        .matcher
        .rank(req.user_id.as_deref(), &req.profile, candidates, limit);

    tracing::info!(
        "Ranked {} matches (from {} candidates)",
        outcome.matches.len(),
        outcome.total_candidates
    );

    HttpResponse::Ok().json(RankMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
    })
}
