//! Domain types shared across Harmony Hub

mod ids;
mod playlist;
mod track;

pub use ids::PlaylistId;
pub use playlist::{CreatePlaylist, Playlist, UpdatePlaylist};
pub use track::Track;
