//! Media handle seam
//!
//! Abstracts the single shared media-playback resource (a browser audio
//! element, a remote renderer, ...).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Shared media-playback handle
///
/// Exactly one controller writes to a handle. Source URL, play/pause and seek
/// are the full contract; the platform reports progress back through
/// [`MediaEvent`]s.
#[async_trait]
pub trait MediaHandle: Send {
    /// Point the handle at a new source, rewinding to the start
    fn set_source(&mut self, url: &str);

    /// Unload the current source
    fn clear_source(&mut self);

    /// Request playback of the loaded source
    ///
    /// Completes once the platform confirms or refuses playback.
    async fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead
    fn seek(&mut self, seconds: f64);
}

/// Notifications emitted by the media handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "seconds", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Playhead moved (`timeupdate`)
    TimeUpdate(f64),

    /// Duration became known (`loadedmetadata`)
    LoadedMetadata(f64),

    /// Source played to the end (`ended`)
    Ended,
}

/// Media handle for unit tests
///
/// Fails `play` when no source is loaded or when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummyMedia {
    pub source: Option<String>,
    pub playing: bool,
    pub position: f64,
    pub fail_next_play: bool,
}

#[cfg(test)]
#[async_trait]
impl MediaHandle for DummyMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.position = 0.0;
    }

    fn clear_source(&mut self) {
        self.source = None;
        self.playing = false;
    }

    async fn play(&mut self) -> Result<()> {
        if std::mem::take(&mut self.fail_next_play) {
            return Err(crate::error::PlaybackError::Blocked("test".into()));
        }
        if self.source.is_none() {
            return Err(crate::error::PlaybackError::NoSource);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_event_wire_format() {
        let json = serde_json::to_value(MediaEvent::TimeUpdate(12.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "time_update", "seconds": 12.5 }));

        let ended: MediaEvent = serde_json::from_value(serde_json::json!({ "type": "ended" })).unwrap();
        assert_eq!(ended, MediaEvent::Ended);
    }
}
