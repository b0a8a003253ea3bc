use serde::Serialize;
use sqlx::FromRow;

use super::{join_list, pick_image, split_list};
use crate::types::RawArtist;

/// Number of genres kept from a live artist payload.
pub const MAX_GENRES: usize = 3;

/// A credited artist of the looked-up track.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    id: String,
    name: String,
    popularity: u32,
    img_src: String,
    genres: Vec<String>,
}

/// One row of the `artist` table; `genres` is comma-delimited.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ArtistRow {
    pub id: String,
    pub artistname: String,
    pub popularity: u32,
    pub imgsrc: String,
    pub genres: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistView {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub img_src: String,
    pub genres: Vec<String>,
}

impl Artist {
    pub fn from_payload(data: &RawArtist) -> Self {
        Self {
            id: data.id.clone(),
            name: data.name.clone(),
            popularity: data.popularity,
            img_src: pick_image(&data.images),
            genres: data.genres.iter().take(MAX_GENRES).cloned().collect(),
        }
    }

    pub fn from_row(row: ArtistRow) -> Self {
        Self {
            id: row.id,
            name: row.artistname,
            popularity: row.popularity,
            img_src: row.imgsrc,
            genres: split_list(&row.genres),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn present(&self) -> ArtistView {
        ArtistView {
            id: self.id.clone(),
            name: self.name.clone(),
            popularity: self.popularity,
            img_src: self.img_src.clone(),
            genres: self.genres.clone(),
        }
    }

    pub fn to_row(&self) -> ArtistRow {
        ArtistRow {
            id: self.id.clone(),
            artistname: self.name.clone(),
            popularity: self.popularity,
            imgsrc: self.img_src.clone(),
            genres: join_list(&self.genres),
        }
    }
}
