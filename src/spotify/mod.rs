//! # Spotify Integration Module
//!
//! Thin client for the handful of Spotify Web API endpoints a lookup needs.
//! Every call is a plain authenticated GET; the `Authorization` header value
//! is handed in by the caller for each request, so one [`SpotifyClient`] can
//! serve every session.
//!
//! ## Failure policy
//!
//! Upstream failures are never propagated as errors past this module, with
//! the exception of the token exchange:
//!
//! - [`SpotifyClient::search_track`] distinguishes a rejected request from an
//!   empty or malformed result ([`SearchOutcome`])
//! - [`SpotifyClient::fetch_artist`] yields `None`
//! - [`SpotifyClient::fetch_track_image`] yields an empty string
//! - [`SpotifyClient::fetch_recommendations`] yields an empty list
//!
//! A payload carrying an `error` key is treated like a failed response even
//! when the status code is 2xx.
//!
//! ## Endpoints
//!
//! - `GET /search` - Track search by `track:` and `artist:` filters
//! - `GET /artists/{id}` - Artist details
//! - `GET /tracks/{id}` - Track details (album art only)
//! - `GET /recommendations` - Seeded recommendations
//! - `POST /api/token` - Client-credentials token exchange

mod artists;
mod auth;
mod search;
mod tracks;

pub use search::SearchOutcome;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Spotify API error: {0}")]
    Api(String),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.spotify_api_url, &config.spotify_token_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Issues an authenticated GET and returns the decoded JSON payload.
    ///
    /// Non-2xx responses and payloads containing an `error` key are mapped
    /// to errors so callers only ever see usable payloads.
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: &str,
    ) -> Result<Value, SpotifyError> {
        let url = self.endpoint(path);
        debug!(target: "spotify", %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SpotifyError::HttpStatus { status, body });
        }

        let payload: Value = serde_json::from_str(&body)?;
        if let Some(error) = payload.get("error") {
            return Err(SpotifyError::Api(error.to_string()));
        }

        Ok(payload)
    }
}
