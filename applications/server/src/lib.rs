//! Harmony Hub Server Library
//!
//! HTTP API for Harmony Hub: song-catalog proxy, uploaded-song search,
//! playlists with public sharing, bucket administration and the shared
//! now-playing session.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use services::object_storage::STORAGE_ROUTE;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{CatalogService, ObjectStorage, RemoteMedia};
pub use state::AppState;

/// Build the application router
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Song catalog
        .route("/catalog/search", get(api::catalog::search))
        .route("/catalog/track/:id", get(api::catalog::get_track))
        // Uploaded songs
        .route("/local/search", get(api::local::search))
        .route("/local/songs/:id", get(api::local::get_song))
        // Admin
        .route(
            "/admin/create-songs-bucket",
            get(api::admin::create_songs_bucket),
        )
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route("/playlists/:id/songs", post(api::playlists::add_song))
        .route(
            "/playlists/:id/songs/:song_id",
            axum::routing::delete(api::playlists::remove_song),
        )
        .route("/share/:id", get(api::playlists::get_shared_playlist))
        // Now-playing session
        .route("/playback", get(api::playback::get_playback))
        .route("/playback/play", post(api::playback::play))
        .route("/playback/pause", post(api::playback::pause))
        .route("/playback/toggle", post(api::playback::toggle))
        .route("/playback/next", post(api::playback::next))
        .route("/playback/previous", post(api::playback::previous))
        .route("/playback/queue", put(api::playback::set_queue))
        .route("/playback/now-playing", put(api::playback::set_now_playing))
        .route("/playback/media-event", post(api::playback::media_event));

    let objects = ServeDir::new(app_state.objects.base_path());

    Router::new()
        .nest("/api", api_routes)
        .nest_service(STORAGE_ROUTE, objects)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
