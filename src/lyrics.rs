//! Best-effort lyrics lookup against the lyrics.ovh API.
//!
//! A lookup never fails from the caller's point of view: the client reports
//! what happened as a [`LyricsOutcome`] and [`lyrics_or_fallback`] turns that
//! into the text that is shown and cached.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, instrument};

use crate::{config::Config, types::LyricsResponse};

/// Shown when the lyrics API has no entry for the track or no artist could
/// be resolved.
pub const NO_LYRICS: &str = "No lyrics available";

/// Shown when the lyrics request timed out or failed outright.
pub const NO_LYRICS_FAILED: &str = "No lyrics available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsOutcome {
    Found(String),
    /// Non-2xx response.
    NotFound,
    TimedOut,
    /// Transport error or a body without a `lyrics` field.
    Failed,
}

/// Selects the text stored for a lookup.
pub fn lyrics_or_fallback(outcome: LyricsOutcome) -> String {
    match outcome {
        LyricsOutcome::Found(lyrics) => lyrics,
        LyricsOutcome::NotFound => NO_LYRICS.to_string(),
        LyricsOutcome::TimedOut | LyricsOutcome::Failed => NO_LYRICS_FAILED.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LyricsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl LyricsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.lyrics_api_url, config.lyrics_timeout)
    }

    #[instrument(skip(self), fields(artist = artist_name, title = track_name))]
    pub async fn fetch_lyrics(&self, artist_name: &str, track_name: &str) -> LyricsOutcome {
        let Some(url) = self.lyrics_url(artist_name, track_name) else {
            debug!(target: "lyrics", base_url = %self.base_url, "invalid lyrics base URL");
            return LyricsOutcome::Failed;
        };

        debug!(target: "lyrics", url = %url, "fetching lyrics");

        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return LyricsOutcome::TimedOut,
            Err(e) => {
                debug!(target: "lyrics", error = %e, "lyrics request failed");
                return LyricsOutcome::Failed;
            }
        };

        if !response.status().is_success() {
            debug!(target: "lyrics", status = %response.status(), "no lyrics");
            return LyricsOutcome::NotFound;
        }

        match response.json::<LyricsResponse>().await {
            Ok(LyricsResponse {
                lyrics: Some(lyrics),
            }) => LyricsOutcome::Found(lyrics),
            Ok(_) => LyricsOutcome::Failed,
            Err(e) if e.is_timeout() => LyricsOutcome::TimedOut,
            Err(e) => {
                debug!(target: "lyrics", error = %e, "unreadable lyrics body");
                LyricsOutcome::Failed
            }
        }
    }

    fn lyrics_url(&self, artist_name: &str, track_name: &str) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["v1", artist_name, track_name]);
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_selection() {
        assert_eq!(
            lyrics_or_fallback(LyricsOutcome::Found("la la".to_string())),
            "la la"
        );
        assert_eq!(lyrics_or_fallback(LyricsOutcome::NotFound), NO_LYRICS);
        assert_eq!(lyrics_or_fallback(LyricsOutcome::TimedOut), NO_LYRICS_FAILED);
        assert_eq!(lyrics_or_fallback(LyricsOutcome::Failed), NO_LYRICS_FAILED);
    }

    #[test]
    fn test_lyrics_url_encodes_segments() {
        let client = LyricsClient::new("https://api.lyrics.ovh/", Duration::from_secs(1));
        let url = client.lyrics_url("AC/DC", "T.N.T.").unwrap();
        assert_eq!(url.as_str(), "https://api.lyrics.ovh/v1/AC%2FDC/T.N.T.");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = LyricsClient::new("not a url", Duration::from_secs(1));
        assert!(client.lyrics_url("a", "b").is_none());
    }
}
