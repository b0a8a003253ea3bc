#![allow(dead_code)]

use serde_json::{Value, json};
use tempfile::TempDir;
use trackscope::{
    management::CacheStore,
    model::{Artist, Recommendation, Track},
    types::{RawArtist, RawTrack},
};

/// Opens a cache in a temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn temp_store() -> (CacheStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let url = format!("sqlite:{}", dir.path().join("test.sqlite3").display());
    let store = CacheStore::open(&url)
        .await
        .expect("Failed to open test cache");
    (store, dir)
}

pub fn images(prefix: &str) -> Value {
    json!([
        { "url": format!("https://i.scdn.co/image/{prefix}-640"), "height": 640, "width": 640 },
        { "url": format!("https://i.scdn.co/image/{prefix}-300"), "height": 300, "width": 300 },
        { "url": format!("https://i.scdn.co/image/{prefix}-64"), "height": 64, "width": 64 }
    ])
}

pub fn track_json(id: &str, name: &str, artists: &[(&str, &str)]) -> Value {
    json!({
        "id": id,
        "name": name,
        "popularity": 80,
        "duration_ms": 219_000,
        "explicit": false,
        "album": { "name": "Nevermind", "images": images(id) },
        "artists": artists
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect::<Vec<_>>()
    })
}

pub fn artist_json(id: &str, name: &str, genres: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "popularity": 81,
        "images": images(id),
        "genres": genres
    })
}

pub fn search_json(items: Vec<Value>) -> Value {
    json!({ "tracks": { "total": items.len(), "items": items } })
}

pub fn track(id: &str, name: &str, artist: (&str, &str)) -> Track {
    let raw: RawTrack = serde_json::from_value(track_json(id, name, &[artist])).unwrap();
    Track::from_payload(&raw)
}

pub fn artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    let raw: RawArtist = serde_json::from_value(artist_json(id, name, genres)).unwrap();
    Artist::from_payload(&raw)
}

pub fn recommendation(id: &str, name: &str, artist: (&str, &str)) -> Recommendation {
    let raw: RawTrack = serde_json::from_value(track_json(id, name, &[artist])).unwrap();
    Recommendation::from_payload(&raw, format!("https://i.scdn.co/image/{id}-64"))
}
