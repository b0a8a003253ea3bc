use tracing::debug;

use super::SpotifyClient;
use crate::types::RawArtist;

impl SpotifyClient {
    /// Retrieves a single artist, or `None` if Spotify has nothing usable.
    pub async fn fetch_artist(&self, artist_id: &str, auth: &str) -> Option<RawArtist> {
        let payload = match self.get_json(&format!("artists/{artist_id}"), &[], auth).await {
            Ok(payload) => payload,
            Err(e) => {
                debug!(target: "spotify", artist_id, error = %e, "artist lookup failed");
                return None;
            }
        };

        serde_json::from_value(payload)
            .inspect_err(|e| debug!(target: "spotify", artist_id, error = %e, "unexpected artist payload"))
            .ok()
    }
}
