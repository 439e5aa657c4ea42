/// API route modules
use harmony_core::Track;
use serde::{Deserialize, Serialize};

pub mod admin;
pub mod catalog;
pub mod health;
pub mod local;
pub mod playback;
pub mod playlists;

/// `?q=` of the search routes
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    /// Trimmed query, `None` when missing or blank
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Search envelope: `{ "tracks": { "items": [...] } }`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Serialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
}

impl From<Vec<Track>> for SearchResponse {
    fn from(items: Vec<Track>) -> Self {
        Self {
            tracks: TrackPage { items },
        }
    }
}
