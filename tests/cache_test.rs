mod common;

use common::{artist, recommendation, temp_store, track};
use trackscope::management::{CacheStats, CacheStore};

const NIRVANA: (&str, &str) = ("6olE6TJLqED3rqDCT0FyPh", "Nirvana");

#[tokio::test]
async fn test_store_then_lookup_round_trip() {
    let (store, _dir) = temp_store().await;

    let current = track("t1", "Come As You Are", NIRVANA).with_lyrics("No lyrics available.");
    let artists = vec![artist(NIRVANA.0, NIRVANA.1, &["grunge", "rock", "punk", "pop"])];
    let recommendations = vec![
        recommendation("r1", "Lithium", NIRVANA),
        recommendation("r2", "In Bloom", NIRVANA),
    ];

    store.store(&current, &artists, &recommendations).await.unwrap();

    let cached = store.lookup("Nirvana", "Come As You Are").await.unwrap().unwrap();

    assert_eq!(cached.track.present(), current.present());
    assert_eq!(cached.track.lyrics(), "No lyrics available.");
    assert_eq!(
        cached.artists.iter().map(|a| a.present()).collect::<Vec<_>>(),
        artists.iter().map(|a| a.present()).collect::<Vec<_>>()
    );
    assert_eq!(cached.artists[0].genres(), ["grunge", "rock", "punk"]);
    assert_eq!(
        cached
            .recommendations
            .iter()
            .map(|r| r.present())
            .collect::<Vec<_>>(),
        recommendations
            .iter()
            .map(|r| r.present())
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_lookup_miss() {
    let (store, _dir) = temp_store().await;
    assert!(store.lookup("Nirvana", "Lithium").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_matches_prefixes_case_insensitively() {
    let (store, _dir) = temp_store().await;
    let current = track("t1", "Come As You Are", NIRVANA);
    store
        .store(&current, &[artist(NIRVANA.0, NIRVANA.1, &[])], &[])
        .await
        .unwrap();

    let cached = store.lookup("nirv", "come as").await.unwrap().unwrap();
    assert_eq!(cached.track.id(), "t1");

    // The artist must be bonded to the track.
    assert!(store.lookup("Foo Fighters", "Come").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_is_idempotent() {
    let (store, _dir) = temp_store().await;

    let current = track("t1", "Come As You Are", NIRVANA).with_lyrics("lyrics");
    let artists = vec![artist(NIRVANA.0, NIRVANA.1, &["grunge"])];
    let recommendations = vec![recommendation("r1", "Lithium", NIRVANA)];

    store.store(&current, &artists, &recommendations).await.unwrap();
    let once = store.stats().await.unwrap();
    let first = store.lookup("Nirvana", "Come").await.unwrap().unwrap();

    store.store(&current, &artists, &recommendations).await.unwrap();
    let twice = store.stats().await.unwrap();
    let second = store.lookup("Nirvana", "Come").await.unwrap().unwrap();

    assert_eq!(
        once,
        CacheStats {
            tracks: 1,
            artists: 1,
            bonds: 1,
            recommendations: 1,
        }
    );
    assert_eq!(once, twice);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_first_write_wins() {
    let (store, _dir) = temp_store().await;

    let original = track("t1", "Come As You Are", NIRVANA).with_lyrics("first");
    store.store(&original, &[artist(NIRVANA.0, NIRVANA.1, &[])], &[]).await.unwrap();

    let updated = track("t1", "Come As You Are", NIRVANA).with_lyrics("second");
    store.store(&updated, &[artist(NIRVANA.0, NIRVANA.1, &[])], &[]).await.unwrap();

    let cached = store.lookup("Nirvana", "Come").await.unwrap().unwrap();
    assert_eq!(cached.track.lyrics(), "first");
}

#[tokio::test]
async fn test_same_recommendation_for_different_seeds() {
    let (store, _dir) = temp_store().await;
    let nirvana = vec![artist(NIRVANA.0, NIRVANA.1, &[])];
    let lithium = recommendation("r1", "Lithium", NIRVANA);

    store
        .store(&track("t1", "Come As You Are", NIRVANA), &nirvana, &[lithium.clone()])
        .await
        .unwrap();
    store
        .store(&track("t2", "Polly", NIRVANA), &nirvana, &[lithium])
        .await
        .unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.tracks, 2);
    assert_eq!(stats.artists, 1);
    assert_eq!(stats.bonds, 2);
    assert_eq!(stats.recommendations, 2);

    let polly = store.lookup("Nirvana", "Polly").await.unwrap().unwrap();
    assert_eq!(polly.recommendations.len(), 1);
    assert_eq!(polly.recommendations[0].id(), "r1");
}

#[tokio::test]
async fn test_tie_break_prefers_exact_match() {
    let (store, _dir) = temp_store().await;
    let nirvana = vec![artist(NIRVANA.0, NIRVANA.1, &[])];

    // Stored first, but only a prefix match.
    store
        .store(&track("t2", "Come As You Are (Remastered)", NIRVANA), &nirvana, &[])
        .await
        .unwrap();
    store
        .store(&track("t1", "Come As You Are", NIRVANA), &nirvana, &[])
        .await
        .unwrap();

    let exact = store.lookup("Nirvana", "come as you are").await.unwrap().unwrap();
    assert_eq!(exact.track.id(), "t1");

    let longer = store
        .lookup("Nirvana", "Come As You Are (R")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(longer.track.id(), "t2");
}

#[tokio::test]
async fn test_tie_break_is_lexicographic_without_exact_match() {
    let (store, _dir) = temp_store().await;
    let nirvana = vec![artist(NIRVANA.0, NIRVANA.1, &[])];

    store
        .store(&track("t2", "Lounge Act", NIRVANA), &nirvana, &[])
        .await
        .unwrap();
    store
        .store(&track("t1", "Lithium", NIRVANA), &nirvana, &[])
        .await
        .unwrap();

    let cached = store.lookup("Nirvana", "L").await.unwrap().unwrap();
    assert_eq!(cached.track.name(), "Lithium");
}

#[tokio::test]
async fn test_like_wildcards_are_literal() {
    let (store, _dir) = temp_store().await;
    let prince = ("p1", "Prince");

    store
        .store(&track("t1", "1000 Pure", prince), &[artist("p1", "Prince", &[])], &[])
        .await
        .unwrap();

    assert!(store.lookup("Prince", "100%").await.unwrap().is_none());
    assert!(store.lookup("Pr_nce", "1000").await.unwrap().is_none());
    assert!(store.lookup("Prince", "1000").await.unwrap().is_some());
}

#[tokio::test]
async fn test_artists_keep_bond_order() {
    let (store, _dir) = temp_store().await;
    let current = track("t1", "Under Pressure", ("q1", "Queen"));
    let artists = vec![
        artist("q1", "Queen", &["rock"]),
        artist("b1", "David Bowie", &["glam rock"]),
    ];
    store.store(&current, &artists, &[]).await.unwrap();

    let cached = store.lookup("David", "Under").await.unwrap().unwrap();
    let names: Vec<&str> = cached.artists.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Queen", "David Bowie"]);
}

#[tokio::test]
async fn test_reset_discards_everything() {
    let (store, _dir) = temp_store().await;
    store
        .store(
            &track("t1", "Come As You Are", NIRVANA),
            &[artist(NIRVANA.0, NIRVANA.1, &[])],
            &[recommendation("r1", "Lithium", NIRVANA)],
        )
        .await
        .unwrap();

    store.reset().await.unwrap();

    assert_eq!(store.stats().await.unwrap(), CacheStats::default());
    assert!(store.lookup("Nirvana", "Come").await.unwrap().is_none());
}

#[tokio::test]
async fn test_open_creates_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fresh.sqlite3");
    assert!(!file.exists());

    let store = CacheStore::open(&format!("sqlite:{}", file.display()))
        .await
        .unwrap();

    assert!(file.exists());
    assert_eq!(store.stats().await.unwrap(), CacheStats::default());
    store.close().await;
}
