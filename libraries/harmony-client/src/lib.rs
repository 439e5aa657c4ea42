//! HTTP client for the Harmony Hub server API.
//!
//! # Features
//!
//! - Catalog and uploaded-song search and lookup
//! - Shared playlists and the now-playing session
//! - [`SearchSession`]s that discard stale responses from overlapping searches

mod client;
mod error;
mod search;
mod types;

pub use client::HarmonyClient;
pub use error::{ClientError, Result};
pub use search::{SearchSession, SearchSource, MAX_SUGGESTIONS, MIN_SUGGEST_CHARS};
pub use types::{ClientConfig, SearchResponse, TrackPage};
