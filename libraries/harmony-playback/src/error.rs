//! Error types for playback

use thiserror::Error;

/// Errors reported by a media handle
///
/// These never escape the controller; a failed play attempt is folded into
/// the playback state (`is_playing` reverts to false) and reported as an event.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The handle has no source loaded
    #[error("No source loaded")]
    NoSource,

    /// The source could not be decoded or streamed
    #[error("Unsupported source: {0}")]
    Unsupported(String),

    /// The platform refused to start playback (e.g. autoplay policy)
    #[error("Playback blocked: {0}")]
    Blocked(String),

    /// Any other media failure
    #[error("Media error: {0}")]
    Media(String),
}

/// Result type for media operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
