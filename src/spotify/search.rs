use tracing::{debug, warn};

use super::{SpotifyClient, SpotifyError};
use crate::types::{RawTrack, SearchResponse};

/// Result of a track search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// First matching track.
    Found(Box<RawTrack>),
    /// The request went through but produced nothing usable: an `error`
    /// payload, no `tracks` field, zero matches or an undecodable body.
    Empty,
    /// Transport failure or non-2xx response.
    Rejected,
}

impl SpotifyClient {
    /// Searches for a single track matching both `track` and `artist`.
    pub async fn search_track(&self, artist: &str, track: &str, auth: &str) -> SearchOutcome {
        let query = [
            ("q", format!("track:{track} artist:{artist}")),
            ("type", "track".to_string()),
            ("limit", "1".to_string()),
        ];

        let payload = match self.get_json("search", &query, auth).await {
            Ok(payload) => payload,
            Err(SpotifyError::Api(message)) => {
                debug!(target: "spotify", %message, "search returned an error payload");
                return SearchOutcome::Empty;
            }
            Err(SpotifyError::Deserialization(e)) => {
                debug!(target: "spotify", error = %e, "search returned an unreadable body");
                return SearchOutcome::Empty;
            }
            Err(e) => {
                warn!(target: "spotify", error = %e, "search request failed");
                return SearchOutcome::Rejected;
            }
        };

        let response: SearchResponse = match serde_json::from_value(payload) {
            Ok(response) => response,
            Err(e) => {
                debug!(target: "spotify", error = %e, "unexpected search payload");
                return SearchOutcome::Empty;
            }
        };

        match response.tracks {
            Some(page) if page.total > 0 => page
                .items
                .into_iter()
                .next()
                .map(|item| SearchOutcome::Found(Box::new(item)))
                .unwrap_or(SearchOutcome::Empty),
            _ => SearchOutcome::Empty,
        }
    }
}
