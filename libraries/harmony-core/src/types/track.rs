/// Track domain type
use serde::{Deserialize, Serialize};

/// A playable or displayable song
///
/// This is the canonical shape every boundary normalizes into. It is treated
/// as a read-only value once constructed; `preview_url` is the playable-source
/// reference and is `None` when no preview can be streamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track identifier (catalog id, uploaded-song id or `local-<id>`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album name (may be empty)
    pub album: String,

    /// Cover-art URL
    pub album_art: String,

    /// Playable-source reference
    pub preview_url: Option<String>,

    /// Duration in seconds
    pub duration: u32,

    /// Deep link into the external catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl Track {
    /// Create a track with no preview and no external link
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
            album_art: crate::normalize::PLACEHOLDER_ART.to_string(),
            preview_url: None,
            duration: 0,
            external_url: None,
        }
    }

    /// Set the playable-source reference
    #[must_use]
    pub fn with_preview(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    /// Whether the track has a playable-source reference
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
