use tabled::Table;

use crate::{config::Config, error, info, success, types::CacheStatsTableRow};

use super::open_store;

/// Drops and recreates the cache tables.
pub async fn init_db(config: &Config) {
    let store = open_store(config).await;
    info!("Resetting cache at {}", config.database_url);

    if let Err(e) = store.reset().await {
        error!("Cannot reset cache. Err: {}", e);
    }
    store.close().await;
    success!("Cache initialized.");
}

/// Prints the number of rows per cache table.
pub async fn db_stats(config: &Config) {
    let store = open_store(config).await;
    let stats = match store.stats().await {
        Ok(stats) => stats,
        Err(e) => error!("Cannot read cache. Err: {}", e),
    };
    store.close().await;

    let rows = vec![
        CacheStatsTableRow {
            table: "track",
            rows: stats.tracks,
        },
        CacheStatsTableRow {
            table: "artist",
            rows: stats.artists,
        },
        CacheStatsTableRow {
            table: "bond",
            rows: stats.bonds,
        },
        CacheStatsTableRow {
            table: "recommendation",
            rows: stats.recommendations,
        },
    ];
    println!("{}", Table::new(rows));
}
