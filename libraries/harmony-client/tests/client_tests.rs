//! Tests for the Harmony Hub client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use harmony_client::{ClientConfig, ClientError, HarmonyClient, SearchSession, SearchSource};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn track_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "artist": "Queen",
        "album": "A Night at the Opera",
        "albumArt": "/api/placeholder/300/300",
        "previewUrl": null,
        "duration": 354
    })
}

fn page(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "tracks": { "items": items } })
}

async fn client_for(server: &MockServer) -> HarmonyClient {
    HarmonyClient::new(ClientConfig::new(server.uri())).expect("valid url")
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        match HarmonyClient::new(ClientConfig::new("")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_scheme_required() {
        assert!(matches!(
            HarmonyClient::new(ClientConfig::new("localhost:8080")),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}

// =============================================================================
// Endpoint Tests
// =============================================================================

mod endpoints {
    use super::*;

    #[tokio::test]
    async fn test_search_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/catalog/search"))
            .and(query_param("q", "bohemian rhapsody"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![track_json(
                "1",
                "Bohemian Rhapsody",
            )])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let tracks = client.search_catalog("bohemian rhapsody").await.unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Bohemian Rhapsody");
        assert_eq!(tracks[0].duration, 354);
        assert!(!tracks[0].has_preview());
    }

    #[tokio::test]
    async fn test_search_local_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/local/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.search_local("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_local_song_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/local/songs/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found" })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_local_song("missing").await.unwrap_err();

        assert!(err.is_not_found());
        match err {
            ClientError::ServerError { message, .. } => assert_eq!(message, "Not found"),
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/catalog/track/x"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.get_catalog_track("x").await.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/catalog/track/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.get_catalog_track("x").await,
            Err(ClientError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_playback_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "currentTrack": track_json("1", "Bohemian Rhapsody"),
                "queue": [track_json("1", "Bohemian Rhapsody")],
                "isPlaying": false,
                "positionSeconds": 0.0,
                "durationSeconds": 354.0,
                "status": "paused"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let snapshot = client.playback().await.unwrap();

        assert_eq!(snapshot.current_track.unwrap().id, "1");
        assert_eq!(snapshot.queue.len(), 1);
        assert!(!snapshot.is_playing);
    }
}

// =============================================================================
// Search Session Tests
// =============================================================================

mod search_session {
    use super::*;

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/catalog/search"))
            .and(query_param("q", "slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page(vec![track_json("old", "Old")]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/catalog/search"))
            .and(query_param("q", "fast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page(vec![track_json("new", "New")])),
            )
            .mount(&server)
            .await;

        let session = SearchSession::new(client_for(&server).await, SearchSource::Catalog);

        let slow = session.search("slow");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.search("fast").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), None);
        let fast = fast.unwrap().expect("latest search is kept");
        assert_eq!(fast[0].id, "new");
    }

    #[tokio::test]
    async fn test_suggest_short_query_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
            .expect(0)
            .mount(&server)
            .await;

        let session = SearchSession::new(client_for(&server).await, SearchSource::Catalog)
            .with_debounce(Duration::ZERO);

        assert_eq!(session.suggest("ab").await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_suggest_returns_first_five() {
        let server = MockServer::start().await;
        let items = (0..8)
            .map(|i| track_json(&i.to_string(), &format!("Song {}", i)))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/local/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(items)))
            .mount(&server)
            .await;

        let session = SearchSession::new(client_for(&server).await, SearchSource::Local)
            .with_debounce(Duration::ZERO);

        let suggestions = session.suggest("song").await.unwrap().unwrap();
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].id, "0");
    }

    #[tokio::test]
    async fn test_superseded_suggestion_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "que"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "quee"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page(vec![track_json("q", "Queen")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let session = SearchSession::new(client_for(&server).await, SearchSource::Catalog)
            .with_debounce(Duration::from_millis(100));

        let first = session.suggest("que");
        let second = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.suggest("quee").await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), None);
        assert_eq!(second.unwrap().unwrap().len(), 1);
    }
}
