//! # Model
//!
//! The three values a lookup produces: [`Track`], [`Artist`] and
//! [`Recommendation`]. Each one can be built from a live Spotify payload
//! (`from_payload`) or from a cached row (`from_row`); both paths converge
//! on the same immutable struct, so callers never need to know where a value
//! came from.
//!
//! Every value has two projections:
//! - `present()` returns a serializable view used by the HTML page and CLI
//! - `to_row()` returns the row struct bound into the SQLite tables

mod artist;
mod recommendation;
mod track;

pub use artist::{Artist, ArtistRow, ArtistView};
pub use recommendation::{Recommendation, RecommendationRow, RecommendationView};
pub use track::{Track, TrackRow, TrackView};

use crate::types::Image;

/// Separator of list columns (`artist.genres`, `recommendation.artists`).
pub const LIST_SEPARATOR: &str = ",";

/// Index of the album/artist image that is shown, the smallest of the
/// three resolutions Spotify returns.
const IMAGE_INDEX: usize = 2;

/// Splits a duration in milliseconds into minutes and zero-padded seconds.
///
/// ```ignore
/// assert_eq!(split_duration(245_000), (4, "05".to_string()));
/// ```
pub fn split_duration(duration_ms: u64) -> (u32, String) {
    let minute = (duration_ms / 60_000) % 60;
    let second = (duration_ms / 1_000) % 60;
    (minute as u32, format!("{second:02}"))
}

/// Picks the displayed image URL, or an empty string if fewer than three
/// resolutions are available.
pub fn pick_image(images: &[Image]) -> String {
    images
        .get(IMAGE_INDEX)
        .map(|image| image.url.clone())
        .unwrap_or_default()
}

pub(crate) fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

pub(crate) fn split_list(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column.split(LIST_SEPARATOR).map(str::to_string).collect()
}
