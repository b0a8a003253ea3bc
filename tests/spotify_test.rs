mod common;

use common::{artist_json, images, search_json, track_json};
use serde_json::json;
use trackscope::spotify::{SearchOutcome, SpotifyClient, SpotifyError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{
        basic_auth, body_string_contains, header, method, path, query_param,
        query_param_is_missing,
    },
};

const AUTH: &str = "Bearer test-token";

fn client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(server.uri(), format!("{}/api/token", server.uri()))
}

#[tokio::test]
async fn test_search_track_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "track:Come As You Are artist:Nirvana"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "1"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![track_json(
            "t1",
            "Come As You Are",
            &[("a1", "Nirvana")],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    match client(&server)
        .search_track("Nirvana", "Come As You Are", AUTH)
        .await
    {
        SearchOutcome::Found(item) => {
            assert_eq!(item.id, "t1");
            assert_eq!(item.artists[0].name, "Nirvana");
        }
        other => panic!("expected a match, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_track_without_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![])))
        .mount(&server)
        .await;

    let outcome = client(&server).search_track("Nobody", "Nothing", AUTH).await;
    assert!(matches!(outcome, SearchOutcome::Empty));
}

#[tokio::test]
async fn test_search_track_error_payload_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "status": 400, "message": "No search query" }
        })))
        .mount(&server)
        .await;

    let outcome = client(&server).search_track("", "", AUTH).await;
    assert!(matches!(outcome, SearchOutcome::Empty));
}

#[tokio::test]
async fn test_search_track_unreadable_body_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = client(&server).search_track("Nirvana", "Polly", AUTH).await;
    assert!(matches!(outcome, SearchOutcome::Empty));
}

#[tokio::test]
async fn test_search_track_server_error_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = client(&server).search_track("Nirvana", "Polly", AUTH).await;
    assert!(matches!(outcome, SearchOutcome::Rejected));
}

#[tokio::test]
async fn test_fetch_artist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artists/a1"))
        .and(header("authorization", AUTH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(artist_json("a1", "Nirvana", &["grunge"])),
        )
        .mount(&server)
        .await;

    let artist = client(&server).fetch_artist("a1", AUTH).await.unwrap();
    assert_eq!(artist.name, "Nirvana");
    assert_eq!(artist.genres, vec!["grunge"]);
}

#[tokio::test]
async fn test_fetch_artist_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artists/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "Not found" }
        })))
        .mount(&server)
        .await;

    assert!(client(&server).fetch_artist("missing", AUTH).await.is_none());
}

#[tokio::test]
async fn test_fetch_track_image_picks_smallest() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tracks/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "album": { "name": "Nevermind", "images": images("r1") }
        })))
        .mount(&server)
        .await;

    let img = client(&server).fetch_track_image("r1", AUTH).await;
    assert_eq!(img, "https://i.scdn.co/image/r1-64");
}

#[tokio::test]
async fn test_fetch_track_image_with_too_few_images() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tracks/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "album": {
                "name": "Nevermind",
                "images": [{ "url": "https://i.scdn.co/image/only", "height": 640, "width": 640 }]
            }
        })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).fetch_track_image("r1", AUTH).await, "");
}

#[tokio::test]
async fn test_fetch_track_image_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tracks/r1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(client(&server).fetch_track_image("r1", AUTH).await, "");
}

#[tokio::test]
async fn test_fetch_recommendations_sends_seeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("seed_artists", "a1"))
        .and(query_param("seed_tracks", "t1"))
        .and(query_param("seed_genres", "grunge,rock"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [
                track_json("r1", "Lithium", &[("a1", "Nirvana")]),
                track_json("r2", "In Bloom", &[("a1", "Nirvana")])
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let genres = vec!["grunge".to_string(), "rock".to_string()];
    let tracks = client(&server)
        .fetch_recommendations("a1", "t1", &genres, AUTH, 2)
        .await;

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_fetch_recommendations_without_genres_omits_seed_genres() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("seed_artists", "a1"))
        .and(query_param_is_missing("seed_genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [track_json("r1", "Lithium", &[("a1", "Nirvana")])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = client(&server)
        .fetch_recommendations("a1", "t1", &[], AUTH, 5)
        .await;
    assert_eq!(tracks.len(), 1);
}

#[tokio::test]
async fn test_fetch_recommendations_unexpected_payload_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": "not a list"
        })))
        .mount(&server)
        .await;

    let tracks = client(&server)
        .fetch_recommendations("a1", "t1", &[], AUTH, 5)
        .await;
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_fetch_recommendations_failure_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tracks = client(&server)
        .fetch_recommendations("a1", "t1", &[], AUTH, 10)
        .await;
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_request_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth("id", "secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQC",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).request_token("id", "secret").await.unwrap();
    assert_eq!(token.authorization(), "Bearer BQC");
    assert!(token.obtained_at > 0);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_request_token_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .request_token("id", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, SpotifyError::HttpStatus { .. }));
}
