/// Playlist domain types
use crate::types::{PlaylistId, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Playlist
///
/// Songs are stored inline as full `Track` values so a shared playlist can be
/// rendered and queued without further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier (also the share id)
    pub id: PlaylistId,

    /// Playlist title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Songs in playback order
    pub songs: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Owner identifier
    pub owner_id: String,

    /// Whether the playlist can be opened through its share link
    pub is_public: bool,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            title: title.into(),
            description: None,
            songs: Vec::new(),
            created_at: Utc::now(),
            owner_id: owner_id.into(),
            is_public: false,
        }
    }

    /// Append a song
    pub fn add_song(&mut self, song: Track) {
        self.songs.push(song);
    }

    /// Remove every song with the given id
    ///
    /// Returns true if anything was removed.
    pub fn remove_song(&mut self, song_id: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| s.id != song_id);
        self.songs.len() != before
    }

    /// Apply a partial update; absent fields are left untouched
    pub fn apply(&mut self, update: UpdatePlaylist) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(songs) = update.songs {
            self.songs = songs;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
    }
}

/// Data for creating a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylist {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub songs: Vec<Track>,
    pub owner_id: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial playlist update
///
/// `description` distinguishes an absent key (`None`, keep) from an explicit
/// `null` (`Some(None)`, clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylist {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub songs: Option<Vec<Track>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

// Only called when the key is present, so `null` becomes `Some(None)`
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
