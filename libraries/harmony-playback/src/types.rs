//! Core types for playback

use harmony_core::Track;
use serde::{Deserialize, Serialize};

/// Controller state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// No current track
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Track loaded and playing
    Playing,
}

/// Result of a play attempt
///
/// Play attempts never fail with an error; callers inspect the outcome (or
/// the track's preview reference) to decide on a fallback presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PlayOutcome {
    /// The media handle confirmed playback
    Started,

    /// The track has no playable-source reference; nothing was played
    NoPreview,

    /// There is no current track to resume
    NothingLoaded,

    /// The media handle refused or failed to start playback
    Failed(String),
}

impl PlayOutcome {
    /// Whether audio is now playing
    pub fn is_started(&self) -> bool {
        matches!(self, PlayOutcome::Started)
    }
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub current_track: Option<Track>,
    pub queue: Vec<Track>,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub status: PlayerStatus,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            current_track: None,
            queue: Vec::new(),
            is_playing: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            status: PlayerStatus::Idle,
        }
    }
}
