//! Harmony Hub Storage
//!
//! `SQLite` persistence for uploaded songs and playlists.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`songs`, `playlists`)
//! - **Embedded Migrations**: applied when the [`Database`] is opened
//!
//! # Example
//!
//! ```rust,no_run
//! use harmony_storage::{songs, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://harmony.db").await?;
//! let rows = songs::search(db.pool(), "queen", 50).await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

// Vertical slices
pub mod playlists;
pub mod songs;

pub use database::Database;
pub use error::{Result, StorageError};
pub use songs::NewSong;
