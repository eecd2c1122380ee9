// Integration tests for Roommate Algo

use actix_web::{test, web, App};
use mockito::{Matcher as UrlMatcher, Mock, Server, ServerGuard};
use roommate_algo::config::MatchingSettings;
use roommate_algo::core::{Dimension, Matcher};
use roommate_algo::models::{CandidatePreferences, PreferenceProfile};
use roommate_algo::routes::{self, matches::AppState};
use roommate_algo::services::{MatchCache, SupabaseClient, SupabaseTables};
use serde_json::{json, Value};
use std::sync::Arc;

fn candidate(id: &str, cleanliness: f64, sleep: &str, smoking: bool) -> CandidatePreferences {
    CandidatePreferences {
        user_id: id.to_string(),
        preferences: PreferenceProfile {
            cleanliness_level: Some(cleanliness),
            sleep_schedule: Some(sleep.to_string()),
            smoking: Some(smoking),
            ..Default::default()
        },
    }
}

fn app_state(base_url: &str, cache: MatchCache) -> AppState {
    app_state_with(base_url, cache, MatchingSettings::default())
}

fn app_state_with(base_url: &str, cache: MatchCache, matching: MatchingSettings) -> AppState {
    let supabase = SupabaseClient::new(
        base_url.to_string(),
        "anon-key".to_string(),
        5,
        SupabaseTables::default(),
    )
    .unwrap();

    AppState {
        supabase: Arc::new(supabase),
        cache,
        matcher: Matcher::default(),
        matching,
    }
}

#[::core::prelude::v1::test]
fn test_integration_end_to_end_ranking() {
    let matcher = Matcher::default();
    let seeker = PreferenceProfile {
        cleanliness_level: Some(8.0),
        sleep_schedule: Some("early_bird".to_string()),
        smoking: Some(false),
        ..Default::default()
    };

    let candidates = vec![
        candidate("1", 8.0, "early_bird", false),  // Near identical
        candidate("2", 7.0, "normal", false),      // Close
        candidate("3", 2.0, "night_owl", true),    // Opposite habits
        candidate("4", 9.0, "early_bird", true),   // Smoker
        CandidatePreferences {
            user_id: "5".to_string(),
            preferences: PreferenceProfile::default(), // Nothing to compare
        },
    ];

    let result = matcher.rank(Some("me"), &seeker, candidates, 10);

    assert_eq!(result.total_candidates, 5);
    assert_eq!(result.matches.len(), 4, "empty profile should be dropped");
    assert_eq!(result.matches[0].user_id, "1");
    assert_eq!(result.matches[0].score, 100.0);
    assert_eq!(result.matches.last().unwrap().user_id, "3");

    for i in 1..result.matches.len() {
        assert!(
            result.matches[i - 1].score >= result.matches[i].score,
            "Matches not sorted by score"
        );
    }
}

#[::core::prelude::v1::test]
fn test_ranking_breakdown_is_explainable() {
    let matcher = Matcher::default();
    let seeker = PreferenceProfile {
        cleanliness_level: Some(8.0),
        ..Default::default()
    };

    let result = matcher.rank(None, &seeker, vec![candidate("1", 6.0, "normal", false)], 10);
    let breakdown = &result.matches[0].breakdown;

    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].key, Dimension::Cleanliness);
    assert_eq!(result.matches[0].score, 80.0);
}

#[actix_web::test]
async fn test_compare_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9", MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/compare")
        .set_json(json!({
            "profileA": { "cleanliness_level": 8, "noise_level": 3, "smoking": false, "pets": true },
            "profileB": { "cleanliness_level": 7, "noise_level": 4, "smoking": true, "pets": true }
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["dimensions"].as_array().unwrap().len(), 4);
    assert_eq!(body["topFactors"].as_array().unwrap().len(), 3);
    assert_eq!(body["topFactors"][0]["key"], "cleanliness");

    let score = body["score"].as_f64().unwrap();
    assert!(score > 0.0 && score < 100.0);
}

#[actix_web::test]
async fn test_similarity_endpoint_rejects_out_of_range_levels() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9", MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/similarity")
        .set_json(json!({
            "profileA": { "cleanliness_level": 14 },
            "profileB": { "cleanliness_level": 7 }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/similarity")
        .set_json(json!({
            "profileA": { "cleanliness_level": 5 },
            "profileB": { "cleanliness_level": 5 }
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["score"], 100.0);
}

#[actix_web::test]
async fn test_rank_endpoint_limits_and_sorts() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9", MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let candidates: Vec<Value> = (0..8)
        .map(|i| json!({ "userId": format!("user-{}", i), "preferences": { "noise_level": i } }))
        .collect();

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({
            "userId": "me",
            "profile": { "noise_level": 2 },
            "candidates": candidates,
            "limit": 3
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    let matches = body["matches"].as_array().unwrap();

    assert_eq!(body["totalCandidates"], 8);
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0]["userId"], "user-2");
    assert_eq!(matches[0]["score"], 100.0);
}

/// Mocks auth, preferences and users; returns the candidate pool mock,
/// which must be hit exactly `candidate_fetches` times
async fn mock_roommate_backend(server: &mut ServerGuard, candidate_fetches: usize) -> Mock {
    server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer good-token")
        .match_header("apikey", "anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "me", "email": "me@campus.edu"}"#)
        .create_async()
        .await;

    server
        .mock("GET", "/rest/v1/preferences")
        .match_query(UrlMatcher::UrlEncoded("user_id".into(), "eq.me".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{ "id": 1, "user_id": "me", "cleanliness_level": 8, "smoking": false }]).to_string(),
        )
        .create_async()
        .await;

    let candidates = server
        .mock("GET", "/rest/v1/preferences")
        .match_query(UrlMatcher::UrlEncoded("user_id".into(), "neq.me".into()))
        .expect(candidate_fetches)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "id": 2, "user_id": "alex", "cleanliness_level": 7, "smoking": false },
                { "id": 3, "user_id": "blair", "cleanliness_level": 2, "smoking": true },
                { "id": 4, "user_id": "casey", "cleanliness_level": 8, "smoking": false },
                { "id": 5, "user_id": "ghost", "cleanliness_level": 8, "smoking": false }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    server
        .mock("GET", "/rest/v1/users")
        .match_query(UrlMatcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "id": "alex", "full_name": "Alex", "major": "Physics" },
                { "id": "blair", "full_name": "Blair" },
                { "id": "casey", "full_name": "Casey", "bio": "Early riser" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    candidates
}

#[actix_web::test]
async fn test_roommates_endpoint_ranks_and_merges_users() {
    let mut server = Server::new_async().await;
    mock_roommate_backend(&mut server, 1).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    let matches = body["matches"].as_array().unwrap();

    // "ghost" ranks but has no user row
    let ids: Vec<&str> = matches.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["casey", "alex", "blair"]);

    assert_eq!(matches[0]["similarity_score"], 100.0);
    assert_eq!(matches[0]["bio"], "Early riser");
    assert_eq!(matches[1]["major"], "Physics");
    assert_eq!(matches[1]["match_breakdown"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_roommates_endpoint_requires_token() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_body(r#"{"msg": "invalid JWT"}"#)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/roommates").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates")
        .insert_header(("Authorization", "Bearer expired"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_roommates_without_saved_preferences() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "newbie"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/preferences")
        .match_query(UrlMatcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates")
        .insert_header(("Authorization", "Bearer token"))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "matches": [] }));
}

#[actix_web::test]
async fn test_roommates_backend_failure_is_500() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "me"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/preferences")
        .match_query(UrlMatcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates")
        .insert_header(("Authorization", "Bearer token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn test_roommates_served_from_cache() {
    let mut server = Server::new_async().await;
    let candidates = mock_roommate_backend(&mut server, 1).await;

    let cache = MatchCache::new(100, 60, true);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), cache.clone())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates?limit=3")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    // casey, ghost, alex ranked; ghost has no user row
    assert_eq!(first["matches"].as_array().unwrap().len(), 2);

    let cached = cache.get("roommates:me:3").await.expect("matches should be cached");
    assert_eq!(cached.len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates?limit=3")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first, second);

    // the second response never reached the backend
    candidates.assert_async().await;
}

#[actix_web::test]
async fn test_roommates_refresh_bypasses_cache() {
    let mut server = Server::new_async().await;
    let candidates = mock_roommate_backend(&mut server, 2).await;

    let cache = MatchCache::new(100, 60, true);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url(), cache.clone())))
            .configure(routes::configure_routes),
    )
    .await;

    for uri in ["/api/v1/roommates?limit=3", "/api/v1/roommates?limit=3&refresh=true"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", "Bearer good-token"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    }

    // refreshed result is cached again
    assert!(cache.get("roommates:me:3").await.is_some());
    candidates.assert_async().await;
}

#[actix_web::test]
async fn test_rank_endpoint_rejects_too_many_candidates() {
    let matching = MatchingSettings {
        max_candidates: 2,
        ..Default::default()
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state_with(
                "http://127.0.0.1:9",
                MatchCache::disabled(),
                matching,
            )))
            .configure(routes::configure_routes),
    )
    .await;

    let candidates: Vec<Value> = (0..3)
        .map(|i| json!({ "userId": format!("user-{}", i), "preferences": { "noise_level": i } }))
        .collect();

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({ "profile": { "noise_level": 2 }, "candidates": candidates }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Too many candidates");
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn test_rank_endpoint_rejects_empty_candidate_id() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9", MatchCache::disabled())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({
            "profile": { "noise_level": 2 },
            "candidates": [
                { "userId": "user-1", "preferences": { "noise_level": 3 } },
                { "userId": "", "preferences": { "noise_level": 2 } }
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_malformed_payloads_get_json_errors() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9", MatchCache::disabled())))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/compare")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"profileA": {"cleanliness_level": 8"#)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));

    let req = test::TestRequest::get()
        .uri("/api/v1/roommates?limit=lots")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_query");
}
