use serde::Serialize;
use sqlx::FromRow;

use super::{join_list, split_duration, split_list};
use crate::types::RawTrack;

/// A track recommended for a seed track.
///
/// `url` is derived once from the first credited artist and the track name
/// and is stored as-is; a cached recommendation replays the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    id: String,
    name: String,
    minute: u32,
    second: String,
    explicit: bool,
    artists: Vec<String>,
    img_src: String,
    url: String,
}

/// One row of the `recommendation` table, tagged with the seed track id.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecommendationRow {
    pub id: String,
    pub trackid: String,
    pub trackname: String,
    pub minute: u32,
    pub second: String,
    pub ifexplicit: bool,
    pub imgsrc: String,
    pub artists: String,
    pub urltrack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub id: String,
    pub name: String,
    pub minute: u32,
    pub second: String,
    pub explicit: bool,
    pub artists: Vec<String>,
    pub img_src: String,
    pub url: String,
}

/// Relative link that runs a search for `artist` / `track`.
pub fn search_url(artist: &str, track: &str) -> String {
    format!(
        "/search?artist={}&track={}",
        urlencoding::encode(artist),
        urlencoding::encode(track)
    )
}

impl Recommendation {
    /// Builds a recommendation from a `/recommendations` track. The image is
    /// fetched separately through `/tracks/{id}`.
    pub fn from_payload(item: &RawTrack, img_src: impl Into<String>) -> Self {
        let (minute, second) = split_duration(item.duration_ms);
        let artists: Vec<String> = item.artists.iter().map(|a| a.name.clone()).collect();
        let primary = artists.first().map(String::as_str).unwrap_or_default();
        let url = search_url(primary, &item.name);

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            minute,
            second,
            explicit: item.explicit,
            artists,
            img_src: img_src.into(),
            url,
        }
    }

    pub fn from_row(row: RecommendationRow) -> Self {
        Self {
            id: row.id,
            name: row.trackname,
            minute: row.minute,
            second: row.second,
            explicit: row.ifexplicit,
            artists: split_list(&row.artists),
            img_src: row.imgsrc,
            url: row.urltrack,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn present(&self) -> RecommendationView {
        RecommendationView {
            id: self.id.clone(),
            name: self.name.clone(),
            minute: self.minute,
            second: self.second.clone(),
            explicit: self.explicit,
            artists: self.artists.clone(),
            img_src: self.img_src.clone(),
            url: self.url.clone(),
        }
    }

    pub fn to_row(&self, seed_track_id: &str) -> RecommendationRow {
        RecommendationRow {
            id: self.id.clone(),
            trackid: seed_track_id.to_string(),
            trackname: self.name.clone(),
            minute: self.minute,
            second: self.second.clone(),
            ifexplicit: self.explicit,
            imgsrc: self.img_src.clone(),
            artists: join_list(&self.artists),
            urltrack: self.url.clone(),
        }
    }
}
