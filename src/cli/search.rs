use tabled::Table;

use crate::{
    config::Config,
    error, info,
    search::{SearchResponse, SearchService, Source},
    success,
    types::{ArtistTableRow, RecommendationTableRow, TrackTableRow},
    utils::format_duration,
    warning,
};

use super::{open_store, spinner};

/// Looks up a track from the terminal, through the same cache as the web
/// front end, and prints the result as tables.
pub async fn search(config: &Config, artist: &str, track: &str) {
    let store = open_store(config).await;
    let service = SearchService::from_config(config, store.clone());

    let pb = spinner("Requesting access token...");
    let token = match service
        .spotify()
        .request_token(&config.client_id, &config.client_secret)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to obtain access token. Err: {}", e);
        }
    };

    pb.set_message(format!("Looking up {track} by {artist}..."));
    let response = service.search(&token.authorization(), artist, track).await;
    pb.finish_and_clear();
    store.close().await;

    let result = match response {
        SearchResponse::Found(result) => result,
        SearchResponse::Failed(failure) => {
            warning!("{}", failure.message());
            return;
        }
    };

    match result.source {
        Source::Cache => info!("Served from cache."),
        Source::Spotify => success!("Fetched from Spotify and cached."),
    }

    let track_row = TrackTableRow {
        name: result.track.name.clone(),
        album: result.track.album.clone(),
        duration: format_duration(result.track.minute, &result.track.second),
        popularity: result.track.popularity,
        explicit: result.track.explicit,
    };
    println!("{}", Table::new(vec![track_row]));

    if !result.artists.is_empty() {
        let rows: Vec<ArtistTableRow> = result
            .artists
            .iter()
            .map(|a| ArtistTableRow {
                name: a.name.clone(),
                popularity: a.popularity,
                genres: a.genres.join(","),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if !result.recommendations.is_empty() {
        let rows: Vec<RecommendationTableRow> = result
            .recommendations
            .iter()
            .map(|r| RecommendationTableRow {
                name: r.name.clone(),
                artists: r.artists.join(","),
                duration: format_duration(r.minute, &r.second),
                url: r.url.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    println!("\n{}", result.track.lyrics);
}
