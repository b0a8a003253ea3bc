//! SQLite-backed lookup cache.
//!
//! Four tables hold everything a lookup produced: `track`, `artist`, the
//! many-to-many `bond` between them, and `recommendation` rows tagged with
//! the seed track they were produced for. Writes are insert-or-ignore only;
//! rows are never updated or deleted, so the first write for a key wins.

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;
use tracing::debug;

use crate::model::{
    Artist, ArtistRow, Recommendation, RecommendationRow, Track, TrackRow,
};

const SCHEMA: &str = include_str!("schema.sql");
const DROP_SCHEMA: &str = include_str!("drop.sql");

const FIND_TRACK_ID: &str = r"
    SELECT T.id
    FROM track T
    JOIN bond B ON B.trackid = T.id
    JOIN artist A ON A.id = B.artistid
    WHERE T.trackname LIKE ?1 ESCAPE '\' AND A.artistname LIKE ?2 ESCAPE '\'
    ORDER BY (T.trackname = ?3 COLLATE NOCASE) DESC,
             (A.artistname = ?4 COLLATE NOCASE) DESC,
             T.trackname, A.artistname, T.id
    LIMIT 1
";

const INSERT_TRACK: &str = r"
    INSERT OR IGNORE INTO track
        (id, trackname, popularity, minute, second, ifexplicit, albumname, imgsrc, lyrics)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const INSERT_ARTIST: &str = r"
    INSERT OR IGNORE INTO artist (id, artistname, popularity, imgsrc, genres)
    VALUES (?, ?, ?, ?, ?)
";

const INSERT_BOND: &str = "INSERT OR IGNORE INTO bond (trackid, artistid) VALUES (?, ?)";

const INSERT_RECOMMENDATION: &str = r"
    INSERT OR IGNORE INTO recommendation
        (id, trackid, trackname, minute, second, ifexplicit, imgsrc, artists, urltrack)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Everything cached for one track.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    pub track: Track,
    pub artists: Vec<Artist>,
    pub recommendations: Vec<Recommendation>,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub tracks: i64,
    pub artists: i64,
    pub bonds: i64,
    pub recommendations: i64,
}

#[derive(Debug, Clone)]
pub struct CacheStore {
    pool: SqlitePool,
}

impl CacheStore {
    /// Opens (creating if needed) the database at `url` and makes sure the
    /// four tables exist.
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection URL (e.g. `sqlite:spotify.sqlite3`)
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        debug!(target: "cache", url, "opening database");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wraps an existing pool. The schema is not touched.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Drops and recreates all tables, discarding every cached lookup.
    pub async fn reset(&self) -> Result<(), StoreError> {
        debug!(target: "cache", "resetting schema");
        sqlx::raw_sql(DROP_SCHEMA).execute(&self.pool).await?;
        self.ensure_schema().await
    }

    /// Finds a cached track whose name starts with `track_prefix` and that
    /// is bonded to an artist whose name starts with `artist_prefix`.
    ///
    /// Matching is case-insensitive for ASCII. When several tracks match,
    /// exact track-name matches win, then exact artist-name matches, then the
    /// lexicographically smallest track name, artist name and track id.
    ///
    /// Artists come back in the order they were bonded, recommendations in
    /// the order they were stored.
    pub async fn lookup(
        &self,
        artist_prefix: &str,
        track_prefix: &str,
    ) -> Result<Option<CachedResult>, StoreError> {
        let track_id: Option<String> = sqlx::query_scalar(FIND_TRACK_ID)
            .bind(like_prefix(track_prefix))
            .bind(like_prefix(artist_prefix))
            .bind(track_prefix)
            .bind(artist_prefix)
            .fetch_optional(&self.pool)
            .await?;

        let Some(track_id) = track_id else {
            debug!(target: "cache", artist_prefix, track_prefix, "cache miss");
            return Ok(None);
        };

        let track_row: TrackRow = sqlx::query_as("SELECT * FROM track WHERE id = ?")
            .bind(&track_id)
            .fetch_one(&self.pool)
            .await?;

        let artist_rows: Vec<ArtistRow> = sqlx::query_as(
            r"
            SELECT A.id, A.artistname, A.popularity, A.imgsrc, A.genres
            FROM bond B
            JOIN artist A ON A.id = B.artistid
            WHERE B.trackid = ?
            ORDER BY B.rowid
            ",
        )
        .bind(&track_id)
        .fetch_all(&self.pool)
        .await?;

        let recommendation_rows: Vec<RecommendationRow> =
            sqlx::query_as("SELECT * FROM recommendation WHERE trackid = ? ORDER BY rowid")
                .bind(&track_id)
                .fetch_all(&self.pool)
                .await?;

        debug!(target: "cache", %track_id, "cache hit");

        Ok(Some(CachedResult {
            track: Track::from_row(track_row),
            artists: artist_rows.into_iter().map(Artist::from_row).collect(),
            recommendations: recommendation_rows
                .into_iter()
                .map(Recommendation::from_row)
                .collect(),
        }))
    }

    /// Persists a lookup in one transaction.
    ///
    /// Every insert is `INSERT OR IGNORE`, so storing the same lookup again
    /// is a no-op and existing rows keep their first-written values.
    pub async fn store(
        &self,
        track: &Track,
        artists: &[Artist],
        recommendations: &[Recommendation],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = track.to_row();
        sqlx::query(INSERT_TRACK)
            .bind(&row.id)
            .bind(&row.trackname)
            .bind(row.popularity)
            .bind(row.minute)
            .bind(&row.second)
            .bind(row.ifexplicit)
            .bind(&row.albumname)
            .bind(&row.imgsrc)
            .bind(&row.lyrics)
            .execute(&mut *tx)
            .await?;

        for artist in artists {
            let row = artist.to_row();
            sqlx::query(INSERT_ARTIST)
                .bind(&row.id)
                .bind(&row.artistname)
                .bind(row.popularity)
                .bind(&row.imgsrc)
                .bind(&row.genres)
                .execute(&mut *tx)
                .await?;

            sqlx::query(INSERT_BOND)
                .bind(track.id())
                .bind(artist.id())
                .execute(&mut *tx)
                .await?;
        }

        for recommendation in recommendations {
            let row = recommendation.to_row(track.id());
            sqlx::query(INSERT_RECOMMENDATION)
                .bind(&row.id)
                .bind(&row.trackid)
                .bind(&row.trackname)
                .bind(row.minute)
                .bind(&row.second)
                .bind(row.ifexplicit)
                .bind(&row.imgsrc)
                .bind(&row.artists)
                .bind(&row.urltrack)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(
            target: "cache",
            track_id = track.id(),
            artists = artists.len(),
            recommendations = recommendations.len(),
            "stored lookup"
        );
        Ok(())
    }

    pub async fn stats(&self) -> Result<CacheStats, StoreError> {
        let (tracks, artists, bonds, recommendations): (i64, i64, i64, i64) = sqlx::query_as(
            r"
            SELECT
                (SELECT COUNT(*) FROM track),
                (SELECT COUNT(*) FROM artist),
                (SELECT COUNT(*) FROM bond),
                (SELECT COUNT(*) FROM recommendation)
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CacheStats {
            tracks,
            artists,
            bonds,
            recommendations,
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Turns user input into a `LIKE` prefix pattern, escaping the wildcards
/// `%` and `_` so they only match themselves.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
