//! Local uploads collection
//!
//! The in-memory track list is authoritative for the session. Every mutation
//! persists it and re-derives the shared views (all songs, recents,
//! favorites); write failures are logged and handed back as
//! [`PersistWarning`]s instead of failing the mutation.

use crate::error::{LocalError, Result};
use crate::object_url::{ObjectUrl, ObjectUrlRegistry};
use crate::store::{BlobStore, KeyValueStore};
use crate::track::{LocalTrack, NewLocalFile, LOCAL_ARTIST};
use chrono::Utc;
use harmony_core::Track;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Persisted track list
pub const TRACKS_KEY: &str = "harmony_hub_local_tracks_v1";
/// Derived: every local track
pub const ALL_SONGS_KEY: &str = "harmony_hub_all_songs_v1";
/// Derived: most recent activity first
pub const RECENTLY_PLAYED_KEY: &str = "harmony_hub_recently_played_v1";
/// Derived: favorites only
pub const FAVORITES_KEY: &str = "harmony_hub_favorite_songs_v1";

/// Maximum entries in the recents view
pub const RECENTS_LIMIT: usize = 25;

/// A failed write; the in-memory state is unaffected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistWarning {
    pub key: String,
    pub message: String,
}

impl fmt::Display for PersistWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to persist {}: {}", self.key, self.message)
    }
}

/// Result of a mutation plus any persistence warnings it produced
#[derive(Debug)]
#[must_use]
pub struct Persisted<T> {
    pub value: T,
    pub warnings: Vec<PersistWarning>,
}

impl<T> Persisted<T> {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Device-local uploads and their audio sources
pub struct LocalCollection<S: KeyValueStore + BlobStore> {
    store: S,
    registry: ObjectUrlRegistry,
    tracks: Vec<LocalTrack>,
    sources: HashMap<String, ObjectUrl>,
}

impl<S: KeyValueStore + BlobStore> LocalCollection<S> {
    /// Load the persisted track list and register object URLs for every
    /// stored blob
    ///
    /// An unreadable list starts the session empty; missing blobs leave the
    /// track without a source.
    pub fn load(store: S, registry: ObjectUrlRegistry) -> Self {
        let tracks = match read_tracks(&store) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(error = %e, "failed to load local tracks");
                Vec::new()
            }
        };

        let mut sources = HashMap::new();
        for track in &tracks {
            match store.load_blob(&track.id) {
                Ok(Some(bytes)) => {
                    let url = registry.create(bytes, track.mime_type.clone());
                    sources.insert(track.id.clone(), url);
                }
                Ok(None) => debug!(track_id = %track.id, "no blob stored for local track"),
                Err(e) => warn!(track_id = %track.id, error = %e, "failed to load track blob"),
            }
        }

        debug!(count = tracks.len(), sources = sources.len(), "local collection loaded");

        Self {
            store,
            registry,
            tracks,
            sources,
        }
    }

    /// Add an uploaded file
    ///
    /// Non-audio files are rejected. The blob is stored before the track is
    /// listed, so a failed blob write adds nothing.
    pub fn add(&mut self, file: NewLocalFile) -> Result<Persisted<LocalTrack>> {
        if !file.is_audio() {
            return Err(LocalError::UnsupportedType(file.mime_type));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.store.save_blob(&id, &file.bytes)?;

        let now = Utc::now();
        let track = LocalTrack {
            id: id.clone(),
            name: file.display_name().to_string(),
            artist: Some(LOCAL_ARTIST.to_string()),
            duration: file.duration,
            size: file.bytes.len() as u64,
            mime_type: file.mime_type.clone(),
            added_at: now,
            last_played_at: Some(now),
            is_favorite: false,
        };

        let url = self.registry.create(file.bytes, file.mime_type);
        self.sources.insert(id, url);
        self.tracks.push(track.clone());

        debug!(track_id = %track.id, name = %track.name, "local track added");
        Ok(self.persist(track))
    }

    /// Remove a track, release its object URL and delete its blob
    ///
    /// Returns whether a track was removed. A failed blob delete is reported
    /// as a warning keyed `blobs/<id>`.
    pub fn remove(&mut self, id: &str) -> Persisted<bool> {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        let removed = self.tracks.len() != before;

        // Dropping the guard revokes the URL
        self.sources.remove(id);

        let blob_failure = self.store.delete_blob(id).err();

        let mut persisted = self.persist(removed);
        if let Some(e) = blob_failure {
            warn!(track_id = %id, error = %e, "failed to delete track blob");
            persisted.warnings.push(PersistWarning {
                key: format!("blobs/{}", id),
                message: e.to_string(),
            });
        }
        persisted
    }

    /// Flip a track's favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Persisted<bool>> {
        let track = self.find_mut(id)?;
        track.is_favorite = !track.is_favorite;
        let favorite = track.is_favorite;
        Ok(self.persist(favorite))
    }

    /// Record that a track was just played
    pub fn mark_played(&mut self, id: &str) -> Result<Persisted<()>> {
        let track = self.find_mut(id)?;
        track.last_played_at = Some(Utc::now());
        Ok(self.persist(()))
    }

    /// Tracks in upload order
    pub fn tracks(&self) -> &[LocalTrack] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&LocalTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Object URL serving a track's audio
    pub fn source_url(&self, id: &str) -> Option<&str> {
        self.sources.get(id).map(ObjectUrl::as_str)
    }

    /// Derived view: every track
    pub fn all_songs(&self) -> Vec<Track> {
        self.tracks.iter().map(LocalTrack::to_track).collect()
    }

    /// Derived view: most recent activity first, capped
    pub fn recently_played(&self) -> Vec<Track> {
        let mut recent: Vec<&LocalTrack> = self.tracks.iter().collect();
        recent.sort_by_key(|t| std::cmp::Reverse(t.last_activity()));
        recent
            .into_iter()
            .take(RECENTS_LIMIT)
            .map(LocalTrack::to_track)
            .collect()
    }

    /// Derived view: favorites in upload order
    pub fn favorites(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.is_favorite)
            .map(LocalTrack::to_track)
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut LocalTrack> {
        self.tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LocalError::NotFound(id.to_string()))
    }

    fn persist<T>(&self, value: T) -> Persisted<T> {
        let mut warnings = Vec::new();

        let writes = [
            (TRACKS_KEY, serde_json::to_string(&self.tracks)),
            (ALL_SONGS_KEY, serde_json::to_string(&self.all_songs())),
            (RECENTLY_PLAYED_KEY, serde_json::to_string(&self.recently_played())),
            (FAVORITES_KEY, serde_json::to_string(&self.favorites())),
        ];

        for (key, json) in writes {
            let result = json
                .map_err(LocalError::from)
                .and_then(|json| self.store.set(key, &json));
            if let Err(e) = result {
                warn!(key, error = %e, "failed to persist local collection");
                warnings.push(PersistWarning {
                    key: key.to_string(),
                    message: e.to_string(),
                });
            }
        }

        Persisted { value, warnings }
    }
}

fn read_tracks<S: KeyValueStore>(store: &S) -> Result<Vec<LocalTrack>> {
    match store.get(TRACKS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
