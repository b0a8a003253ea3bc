use serde::Serialize;
use sqlx::FromRow;

use super::{pick_image, split_duration};
use crate::types::RawTrack;

/// The looked-up track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    id: String,
    name: String,
    popularity: u32,
    minute: u32,
    second: String,
    explicit: bool,
    album: String,
    img_src: String,
    lyrics: String,
}

/// One row of the `track` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TrackRow {
    pub id: String,
    pub trackname: String,
    pub popularity: u32,
    pub minute: u32,
    pub second: String,
    pub ifexplicit: bool,
    pub albumname: String,
    pub imgsrc: String,
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackView {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub minute: u32,
    pub second: String,
    pub explicit: bool,
    pub album: String,
    pub img_src: String,
    pub lyrics: String,
}

impl Track {
    /// Builds a track from the first item of a search response.
    ///
    /// Lyrics start out empty and are filled in with [`Track::with_lyrics`].
    pub fn from_payload(item: &RawTrack) -> Self {
        let (minute, second) = split_duration(item.duration_ms);
        let (album, img_src) = match &item.album {
            Some(album) => (album.name.clone(), pick_image(&album.images)),
            None => (String::new(), String::new()),
        };

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            popularity: item.popularity,
            minute,
            second,
            explicit: item.explicit,
            album,
            img_src,
            lyrics: String::new(),
        }
    }

    pub fn from_row(row: TrackRow) -> Self {
        Self {
            id: row.id,
            name: row.trackname,
            popularity: row.popularity,
            minute: row.minute,
            second: row.second,
            explicit: row.ifexplicit,
            album: row.albumname,
            img_src: row.imgsrc,
            lyrics: row.lyrics,
        }
    }

    pub fn with_lyrics(self, lyrics: impl Into<String>) -> Self {
        Self {
            lyrics: lyrics.into(),
            ..self
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    pub fn present(&self) -> TrackView {
        TrackView {
            id: self.id.clone(),
            name: self.name.clone(),
            popularity: self.popularity,
            minute: self.minute,
            second: self.second.clone(),
            explicit: self.explicit,
            album: self.album.clone(),
            img_src: self.img_src.clone(),
            lyrics: self.lyrics.clone(),
        }
    }

    pub fn to_row(&self) -> TrackRow {
        TrackRow {
            id: self.id.clone(),
            trackname: self.name.clone(),
            popularity: self.popularity,
            minute: self.minute,
            second: self.second.clone(),
            ifexplicit: self.explicit,
            albumname: self.album.clone(),
            imgsrc: self.img_src.clone(),
            lyrics: self.lyrics.clone(),
        }
    }
}
