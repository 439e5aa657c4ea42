//! Local track metadata

use chrono::{DateTime, Utc};
use harmony_core::{Track, PLACEHOLDER_ART};
use serde::{Deserialize, Serialize};

/// Artist shown for uploads without artist metadata
pub const LOCAL_ARTIST: &str = "Local Upload";

/// Album every local upload is filed under
pub const LOCAL_ALBUM: &str = "Local Files";

/// Metadata of one uploaded file, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTrack {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Seconds (fractional, as reported by the decoder)
    pub duration: f64,
    /// Bytes
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl LocalTrack {
    /// Sort key for the recents view
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_played_at.unwrap_or(self.added_at)
    }

    /// Canonical track for shared views
    ///
    /// Local tracks never carry a preview; their audio is reachable only
    /// through the collection's object URLs.
    pub fn to_track(&self) -> Track {
        Track::new(
            format!("local-{}", self.id),
            self.name.clone(),
            self.artist.as_deref().unwrap_or(LOCAL_ARTIST),
            LOCAL_ALBUM,
        )
        .with_duration(round_seconds(self.duration))
    }
}

fn round_seconds(seconds: f64) -> u32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// A file picked for upload
#[derive(Debug, Clone)]
pub struct NewLocalFile {
    /// Original file name, extension included
    pub file_name: String,
    pub mime_type: String,
    /// Decoded duration; 0 when metadata could not be read
    pub duration: f64,
    pub bytes: Vec<u8>,
}

impl NewLocalFile {
    /// File name with its last extension stripped
    pub fn display_name(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(dot) if dot > 0 => &self.file_name[..dot],
            _ => &self.file_name,
        }
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}
