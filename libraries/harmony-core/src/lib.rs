//! Harmony Hub Core
//!
//! Platform-agnostic core types and error handling for Harmony Hub.
//!
//! This crate provides the foundational building blocks shared by the
//! playback controller, the storage layer, the HTTP server and its client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistId`
//! - **Boundary Normalization**: `CatalogTrack` and `LocalSongRow` are the only
//!   places where upstream field-name variants are tolerated; everything past
//!   the boundary works with the canonical `Track`
//! - **Request Generations**: tickets that let callers discard stale responses
//! - **Error Handling**: Unified `HarmonyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{CatalogTrack, Track};
//!
//! let raw = r#"{
//!     "id": "4u7EnebtmKWzUH433cf5Qv",
//!     "name": "Bohemian Rhapsody",
//!     "artists": [{ "name": "Queen" }],
//!     "album": { "name": "A Night at the Opera", "images": [] },
//!     "preview_url": null,
//!     "duration_ms": 354320
//! }"#;
//!
//! let track: Track = serde_json::from_str::<CatalogTrack>(raw).unwrap().into();
//! assert_eq!(track.artist, "Queen");
//! assert_eq!(track.duration, 354);
//! assert!(!track.has_preview());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod generation;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{HarmonyError, Result};
pub use generation::{RequestGeneration, Ticket};
pub use normalize::{CatalogTrack, LocalSongRow, PLACEHOLDER_ART, UNKNOWN_ARTIST};
pub use types::{CreatePlaylist, Playlist, PlaylistId, Track, UpdatePlaylist};
