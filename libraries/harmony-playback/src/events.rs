//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! controller as state changes and drained by the consumer.

use crate::types::PlayerStatus;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// State machine moved (idle, paused, playing)
    StateChanged {
        /// The new status
        status: PlayerStatus,
    },

    /// Now-playing track changed
    TrackChanged {
        /// ID of the new current track (None when back to idle)
        track_id: Option<String>,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Queue replaced or reordered
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Playhead returned to the start of the current track
    PositionReset,

    /// The requested track has no playable-source reference
    PreviewUnavailable {
        /// ID of the track
        track_id: String,
    },

    /// A play attempt failed
    Error {
        /// Error message
        message: String,
    },
}
