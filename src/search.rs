//! Cache-first track lookup.
//!
//! [`SearchService::search`] ties the pieces together:
//!
//! ```text
//! cache lookup ──hit──────────────────────────────────────────▶ present
//!      │ miss
//!      ▼
//! Spotify search ──rejected──▶ "invalid request"
//!      │         ──empty─────▶ "no results"
//!      ▼
//! artists + recommendations ─▶ lyrics ─▶ cache write ─▶ present
//! ```
//!
//! Apart from the two search failures every upstream problem degrades to an
//! omitted artist, an empty image, no recommendations or placeholder lyrics.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::Config,
    lyrics::{LyricsClient, NO_LYRICS, lyrics_or_fallback},
    management::{CacheStore, CachedResult},
    model::{Artist, ArtistView, Recommendation, RecommendationView, Track, TrackView},
    spotify::{SearchOutcome, SpotifyClient},
};

pub const INVALID_REQUEST_MESSAGE: &str = "Sorry! Invalid request. Please try again later.";
pub const NO_RESULTS_MESSAGE: &str = "No result. Please try another search.";

/// Artist and track name as entered by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub track: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Spotify,
}

/// Presentation of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub source: Source,
    pub track: TrackView,
    pub artists: Vec<ArtistView>,
    pub recommendations: Vec<RecommendationView>,
}

impl SearchResult {
    fn present(
        source: Source,
        track: &Track,
        artists: &[Artist],
        recommendations: &[Recommendation],
    ) -> Self {
        Self {
            source,
            track: track.present(),
            artists: artists.iter().map(Artist::present).collect(),
            recommendations: recommendations.iter().map(Recommendation::present).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    /// Spotify rejected the search (transport, auth or server failure).
    InvalidRequest,
    /// The search went through but matched nothing usable.
    NoResults,
}

impl SearchFailure {
    pub fn message(&self) -> &'static str {
        match self {
            SearchFailure::InvalidRequest => INVALID_REQUEST_MESSAGE,
            SearchFailure::NoResults => NO_RESULTS_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Found(Box<SearchResult>),
    Failed(SearchFailure),
}

#[derive(Debug, Clone)]
pub struct SearchService {
    spotify: SpotifyClient,
    lyrics: LyricsClient,
    store: CacheStore,
    recommendation_limit: u32,
}

impl SearchService {
    pub fn new(
        spotify: SpotifyClient,
        lyrics: LyricsClient,
        store: CacheStore,
        recommendation_limit: u32,
    ) -> Self {
        Self {
            spotify,
            lyrics,
            store,
            recommendation_limit,
        }
    }

    pub fn from_config(config: &Config, store: CacheStore) -> Self {
        Self::new(
            SpotifyClient::from_config(config),
            LyricsClient::from_config(config),
            store,
            config.recommendation_limit,
        )
    }

    pub fn spotify(&self) -> &SpotifyClient {
        &self.spotify
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Looks up `track` by `artist`, from the cache if possible.
    ///
    /// `auth` is the `Authorization` header value of the caller's session.
    pub async fn search(&self, auth: &str, artist: &str, track: &str) -> SearchResponse {
        match self.store.lookup(artist, track).await {
            Ok(Some(CachedResult {
                track: cached,
                artists,
                recommendations,
            })) => {
                info!(artist, track, "from database");
                return SearchResponse::Found(Box::new(SearchResult::present(
                    Source::Cache,
                    &cached,
                    &artists,
                    &recommendations,
                )));
            }
            Ok(None) => {}
            Err(e) => warn!(artist, track, error = %e, "cache lookup failed, treating as miss"),
        }

        info!(artist, track, "from spotify api");
        let item = match self.spotify.search_track(artist, track, auth).await {
            SearchOutcome::Found(item) => item,
            SearchOutcome::Empty => return SearchResponse::Failed(SearchFailure::NoResults),
            SearchOutcome::Rejected => {
                return SearchResponse::Failed(SearchFailure::InvalidRequest);
            }
        };

        let current = Track::from_payload(&item);
        let mut artists = Vec::new();
        let mut recommendations = Vec::new();

        for credited in &item.artists {
            let Some(detail) = self.spotify.fetch_artist(&credited.id, auth).await else {
                continue;
            };
            let artist = Artist::from_payload(&detail);

            let recommended = self
                .spotify
                .fetch_recommendations(
                    &credited.id,
                    current.id(),
                    artist.genres(),
                    auth,
                    self.recommendation_limit,
                )
                .await;
            for raw in &recommended {
                let img_src = self.spotify.fetch_track_image(&raw.id, auth).await;
                recommendations.push(Recommendation::from_payload(raw, img_src));
            }

            artists.push(artist);
        }

        let lyrics = match artists.first() {
            Some(primary) => {
                lyrics_or_fallback(self.lyrics.fetch_lyrics(primary.name(), current.name()).await)
            }
            None => NO_LYRICS.to_string(),
        };
        let current = current.with_lyrics(lyrics);

        let result = SearchResult::present(Source::Spotify, &current, &artists, &recommendations);

        if let Err(e) = self.store.store(&current, &artists, &recommendations).await {
            warn!(track_id = current.id(), error = %e, "failed to cache lookup");
        }

        SearchResponse::Found(Box::new(result))
    }
}
