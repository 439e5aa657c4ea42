/// Shared application state
use crate::services::{CatalogService, ObjectStorage, RemoteMedia};
use harmony_playback::PlaybackController;
use harmony_storage::Database;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The now-playing session shared by every client
pub type PlaybackSession = Arc<Mutex<PlaybackController<RemoteMedia>>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Arc<CatalogService>,
    pub objects: Arc<ObjectStorage>,
    pub playback: PlaybackSession,
    /// Whether the admin service key is configured
    pub admin_enabled: bool,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        catalog: Arc<CatalogService>,
        objects: Arc<ObjectStorage>,
        admin_enabled: bool,
    ) -> Self {
        Self {
            db,
            catalog,
            objects,
            playback: Arc::new(Mutex::new(PlaybackController::new(RemoteMedia::new()))),
            admin_enabled,
        }
    }
}
