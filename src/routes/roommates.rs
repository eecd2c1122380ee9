use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use std::collections::HashMap;
use crate::models::{ErrorResponse, RoommateMatch, RoommatesQuery, RoommatesResponse};
use crate::routes::matches::AppState;
use crate::services::{CacheKey, SupabaseError};

/// Configure roommate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/roommates", web::get().to(find_roommates));
}

/// Bearer token from the Authorization header
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.split_once(' ') {
        Some(("Bearer", rest)) => rest.trim(),
        _ if value == "Bearer" => "",
        _ => value,
    };

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        "Unauthorized",
        "A valid bearer token is required",
        401,
    ))
}

fn backend_failure(err: SupabaseError) -> HttpResponse {
    match err {
        SupabaseError::Unauthorized => unauthorized(),
        other => {
            tracing::error!("Error fetching matches: {}", other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal server error",
                other.to_string(),
                500,
            ))
        }
    }
}

/// Find the best roommate matches for the signed-in user
///
/// GET /api/v1/roommates?limit=10&refresh=false
///
/// Requires `Authorization: Bearer <access token>`. Returns the user rows of
/// the top matches, each with `similarity_score` and `match_breakdown`.
async fn find_roommates(
    state: web::Data<AppState>,
    query: web::Query<RoommatesQuery>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return unauthorized();
    };

    let user = match state.supabase.get_user(token).await {
        Ok(user) => user,
        Err(e) => return backend_failure(e),
    };

    let limit = state.matching.resolve_limit(query.limit);
    let cache_key = CacheKey::roommates(&user.id, limit);

    if query.refresh {
        state.cache.invalidate(&cache_key).await;
    } else if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Serving cached roommate matches for {}", user.id);
        return HttpResponse::Ok().json(RoommatesResponse {
            matches: cached.to_vec(),
        });
    }

    match build_matches(&state, token, &user.id, limit).await {
        Ok(matches) => {
            tracing::info!("Returning {} roommate matches for user {}", matches.len(), user.id);
            state.cache.insert(cache_key, matches.clone()).await;
            HttpResponse::Ok().json(RoommatesResponse { matches })
        }
        Err(e) => backend_failure(e),
    }
}

async fn build_matches(
    state: &AppState,
    token: &str,
    user_id: &str,
    limit: usize,
) -> Result<Vec<RoommateMatch>, SupabaseError> {
    let Some(seeker) = state.supabase.get_preferences(token, user_id).await? else {
        tracing::debug!("User {} has no saved preferences", user_id);
        return Ok(Vec::new());
    };

    let candidates = state.supabase.list_other_preferences(token, user_id).await?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let outcome = state
        .matcher
        .rank(Some(user_id), &seeker.preferences, candidates, limit);

    tracing::debug!(
        "Scored {} candidates for {}, keeping {}",
        outcome.total_candidates,
        user_id,
        outcome.matches.len()
    );

    if outcome.matches.is_empty() {
        return Ok(Vec::new());
    }

    let top_ids: Vec<String> = outcome.matches.iter().map(|m| m.user_id.clone()).collect();
    let mut users_by_id: HashMap<String, _> = state
        .supabase
        .get_users(token, &top_ids)
        .await?
        .into_iter()
        .map(|user| (user.id.clone(), user))
        .collect();

    // Ranked users without a public row are dropped
    Ok(outcome
        .matches
        .into_iter()
        .filter_map(|ranked| {
            users_by_id.remove(&ranked.user_id).map(|user| RoommateMatch {
                user,
                similarity_score: ranked.score,
                match_breakdown: ranked.breakdown,
            })
        })
        .collect())
}
