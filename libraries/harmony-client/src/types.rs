//! Wire types shared with the server.

use harmony_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g. `http://localhost:8080`)
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Configuration with default timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// `{ tracks: { items: [...] } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

/// A page of tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
}

impl SearchResponse {
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks.items
    }
}

/// Error body returned by the server
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
