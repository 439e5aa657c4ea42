/// Media handle for a browser-rendered session
///
/// The server owns the queue but not the audio element. `RemoteMedia` keeps
/// the state the browser must mirror (source, play flag, requested seek) and
/// the browser reports progress back as media events.
use async_trait::async_trait;
use harmony_playback::{MediaHandle, PlaybackError};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMedia {
    /// Source the browser should load
    pub source: Option<String>,
    pub playing: bool,
    /// Last playhead position requested by the controller
    pub seek_to: Option<f64>,
}

impl RemoteMedia {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaHandle for RemoteMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.seek_to = Some(0.0);
    }

    fn clear_source(&mut self) {
        self.source = None;
        self.playing = false;
        self.seek_to = None;
    }

    async fn play(&mut self) -> harmony_playback::Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.seek_to = Some(seconds);
    }
}
