//! Boundary normalization
//!
//! Upstream payloads arrive in more than one shape: the song catalog speaks
//! `snake_case` with nested artist/album objects, uploaded-song rows carry
//! storage paths instead of URLs, and older clients send camelCase variants of
//! the same fields. Everything is converted to the canonical [`Track`] here so
//! no other module has to look up optional field variants.

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Cover art used when an upstream item has none
pub const PLACEHOLDER_ART: &str = "/api/placeholder/300/300";

/// Artist name used when an upstream item has none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Track as returned by the song-catalog API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    #[serde(default)]
    pub album: CatalogAlbum,
    #[serde(default, alias = "previewUrl")]
    pub preview_url: Option<String>,
    #[serde(default, alias = "durationMs")]
    pub duration_ms: u64,
    #[serde(default, alias = "externalUrls")]
    pub external_urls: Option<CatalogExternalUrls>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<CatalogImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Search envelope returned by the catalog: `{ tracks: { items: [...] } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSearchResponse {
    #[serde(default)]
    pub tracks: CatalogPage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub items: Vec<CatalogTrack>,
}

impl From<CatalogTrack> for Track {
    fn from(raw: CatalogTrack) -> Self {
        let artist = raw
            .artists
            .into_iter()
            .map(|a| a.name)
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let album_art = raw
            .album
            .images
            .into_iter()
            .map(|image| image.url)
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_ART.to_string());

        Track {
            id: raw.id,
            name: raw.name,
            artist,
            album: raw.album.name,
            album_art,
            preview_url: raw.preview_url.filter(|url| !url.is_empty()),
            duration: (raw.duration_ms / 1000) as u32,
            external_url: raw.external_urls.and_then(|urls| urls.spotify),
        }
    }
}

/// Row describing a user-uploaded song
///
/// Paths are relative to the songs bucket and must be resolved to public URLs
/// before they are playable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSongRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default, alias = "filePath")]
    pub file_path: Option<String>,
    #[serde(default, alias = "coverImagePath")]
    pub cover_image_path: Option<String>,
    #[serde(default, alias = "durationSeconds")]
    pub duration_seconds: Option<i64>,
    #[serde(default, alias = "fileName")]
    pub file_name: Option<String>,
}

impl LocalSongRow {
    /// Normalize into a `Track`, resolving storage paths with `public_url`
    pub fn into_track(self, public_url: impl Fn(&str) -> String) -> Track {
        let preview_url = self
            .file_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(&public_url);

        let album_art = self
            .cover_image_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map_or_else(|| PLACEHOLDER_ART.to_string(), &public_url);

        Track {
            id: self.id,
            name: self.title,
            artist: self
                .artist
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: self.album.unwrap_or_default(),
            album_art,
            preview_url,
            duration: self.duration_seconds.unwrap_or(0).max(0) as u32,
            external_url: None,
        }
    }
}
