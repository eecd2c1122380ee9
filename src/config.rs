use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_preferences_table")]
    pub preferences_table: String,
    #[serde(default = "default_users_table")]
    pub users_table: String,
}

fn default_preferences_table() -> String { "preferences".to_string() }
fn default_users_table() -> String { "users".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Candidates must score strictly above this to be returned
    #[serde(default)]
    pub min_score: f64,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: 0.0,
            max_candidates: default_max_candidates(),
        }
    }
}

impl MatchingSettings {
    /// Resolve a requested limit against the configured default and cap
    pub fn resolve_limit(&self, requested: Option<u16>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1)) as usize
    }
}

fn default_limit() -> u16 { 10 }
fn default_max_limit() -> u16 { 50 }
fn default_max_candidates() -> usize { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_cache_enabled() -> bool { true }
fn default_cache_ttl() -> u64 { 30 }
fn default_cache_entries() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json`, `pretty` or `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROOMMATE__)
    /// 5. Supabase URL and key from the variables the web app already uses
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROOMMATE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ROOMMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_supabase_env(settings)?.try_deserialize()
    }
}

/// Override Supabase settings from SUPABASE_* or NEXT_PUBLIC_SUPABASE_* variables
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
        .ok();
    let anon_key = env::var("SUPABASE_ANON_KEY")
        .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_ANON_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(anon_key) = anon_key {
        builder = builder.set_override("supabase.anon_key", anon_key)?;
    }

    builder.build()
}
