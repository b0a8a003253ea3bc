use tracing::debug;

use super::SpotifyClient;
use crate::{
    model::pick_image,
    types::{RawTrack, RecommendationsResponse, TrackAlbumResponse},
};

impl SpotifyClient {
    /// Returns the album art URL of a track, or an empty string when the
    /// track cannot be fetched or its album has fewer than three images.
    pub async fn fetch_track_image(&self, track_id: &str, auth: &str) -> String {
        let payload = match self.get_json(&format!("tracks/{track_id}"), &[], auth).await {
            Ok(payload) => payload,
            Err(e) => {
                debug!(target: "spotify", track_id, error = %e, "track lookup failed");
                return String::new();
            }
        };

        match serde_json::from_value::<TrackAlbumResponse>(payload) {
            Ok(TrackAlbumResponse { album: Some(album) }) => pick_image(&album.images),
            Ok(_) => String::new(),
            Err(e) => {
                debug!(target: "spotify", track_id, error = %e, "unexpected track payload");
                String::new()
            }
        }
    }

    /// Fetches up to `limit` tracks recommended for the given seeds.
    ///
    /// Any failure yields an empty list.
    pub async fn fetch_recommendations(
        &self,
        seed_artist: &str,
        seed_track: &str,
        seed_genres: &[String],
        auth: &str,
        limit: u32,
    ) -> Vec<RawTrack> {
        let mut query = vec![("seed_artists", seed_artist.to_string())];
        if !seed_genres.is_empty() {
            query.push(("seed_genres", seed_genres.join(",")));
        }
        query.push(("seed_tracks", seed_track.to_string()));
        query.push(("limit", limit.to_string()));

        let payload = match self.get_json("recommendations", &query, auth).await {
            Ok(payload) => payload,
            Err(e) => {
                debug!(target: "spotify", seed_artist, seed_track, error = %e, "recommendations failed");
                return Vec::new();
            }
        };

        serde_json::from_value::<RecommendationsResponse>(payload)
            .map(|response| response.tracks)
            .inspect_err(|e| {
                debug!(target: "spotify", seed_artist, seed_track, error = %e, "unexpected recommendations payload")
            })
            .unwrap_or_default()
    }
}
