use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use roommate_algo::config::{LoggingSettings, Settings};
use roommate_algo::core::Matcher;
use roommate_algo::routes::{self, handle_json_payload_error, handle_query_payload_error, matches::AppState};
use roommate_algo::services::{MatchCache, SupabaseClient, SupabaseTables};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// RUST_LOG wins over the configured level when set
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting roommate matching service...");
    info!("Configuration loaded successfully");

    let tables = SupabaseTables {
        preferences: settings.supabase.preferences_table.clone(),
        users: settings.supabase.users_table.clone(),
    };

    let supabase = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.anon_key.clone(),
        settings.supabase.timeout_secs.unwrap_or(30),
        tables,
    )
    .map_err(|e| {
        error!("Failed to create Supabase client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Supabase client initialized for {}", settings.supabase.url);

    let cache = MatchCache::new(
        settings.cache.max_entries,
        settings.cache.ttl_secs,
        settings.cache.enabled,
    );

    info!(
        "Match cache {} ({} entries, TTL: {}s)",
        if settings.cache.enabled { "enabled" } else { "disabled" },
        settings.cache.max_entries,
        settings.cache.ttl_secs
    );

    let matcher = Matcher::new(settings.matching.min_score);

    let app_state = AppState {
        supabase: Arc::new(supabase),
        cache,
        matcher,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
