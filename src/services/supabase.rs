use crate::models::{AuthUser, CandidatePreferences, UserSummary};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid or expired access token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase REST client
///
/// Every call is made on behalf of the signed-in user: the user's access
/// token is forwarded so row level security applies, and only the public
/// anon key is needed. Handles:
/// - Resolving the user behind an access token
/// - Fetching preference rows
/// - Fetching public user rows
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub preferences: String,
    pub users: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            preferences: "preferences".to_string(),
            users: "users".to_string(),
        }
    }
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        anon_key: String,
        timeout_secs: u64,
        tables: SupabaseTables,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client,
            tables,
        })
    }

    /// Resolve the user an access token belongs to
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self.get(&url, access_token).await?;
        let response = check_status(response, "Failed to fetch user").await?;

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse user: {}", e)))
    }

    /// Fetch the preference row of a user, if they saved one
    pub async fn get_preferences(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Option<CandidatePreferences>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&user_id={}&limit=1",
            self.base_url,
            self.tables.preferences,
            urlencoding::encode(&format!("eq.{}", user_id))
        );

        tracing::debug!("Fetching preferences from: {}", url);

        let mut rows: Vec<CandidatePreferences> = self.get_rows(&url, access_token, "preferences").await?;

        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    /// Fetch the preference rows of every user except `user_id`, in one request
    pub async fn list_other_preferences(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<CandidatePreferences>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&user_id={}",
            self.base_url,
            self.tables.preferences,
            urlencoding::encode(&format!("neq.{}", user_id))
        );

        self.get_rows(&url, access_token, "candidate preferences").await
    }

    /// Fetch the public user rows for a set of ids, in one request
    pub async fn get_users(
        &self,
        access_token: &str,
        ids: &[String],
    ) -> Result<Vec<UserSummary>, SupabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = ids
            .iter()
            .map(|id| format!("\"{}\"", id.replace('"', "")))
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}/rest/v1/{}?select=*&id={}",
            self.base_url,
            self.tables.users,
            urlencoding::encode(&format!("in.({})", id_list))
        );

        self.get_rows(&url, access_token, "users").await
    }

    async fn get(&self, url: &str, access_token: &str) -> Result<Response, SupabaseError> {
        Ok(self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?)
    }

    async fn get_rows<T>(&self, url: &str, access_token: &str, what: &str) -> Result<Vec<T>, SupabaseError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let response = self.get(url, access_token).await?;
        let response = check_status(response, &format!("Failed to fetch {}", what)).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }
}

async fn check_status(response: Response, context: &str) -> Result<Response, SupabaseError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SupabaseError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{}: {} {}", context, status, body);
        return Err(SupabaseError::ApiError(format!("{}: {}", context, status)));
    }

    Ok(response)
}
