//! Harmony Hub - Playback Queue Controller
//!
//! Single authority for "what is playing and what plays next".
//!
//! This crate provides:
//! - An ordered, head-deduplicated play queue
//! - A controller owning current track, queue, playing flag and media clock
//! - The `MediaHandle` seam to the one shared media-playback resource
//! - Events for UI synchronization
//!
//! # Architecture
//!
//! `harmony-playback` does no I/O of its own. The platform supplies a
//! `MediaHandle` (a browser media element bridge, a remote player, a test
//! double) and the controller is its only writer. The controller is created
//! once at the application root and handed to every consumer; there is no
//! global instance.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::Track;
//! use harmony_playback::{MediaHandle, PlaybackController, PlayerStatus, Result};
//!
//! #[derive(Default)]
//! struct Silent {
//!     source: Option<String>,
//! }
//!
//! #[async_trait::async_trait]
//! impl MediaHandle for Silent {
//!     fn set_source(&mut self, url: &str) {
//!         self.source = Some(url.to_string());
//!     }
//!     fn clear_source(&mut self) {
//!         self.source = None;
//!     }
//!     async fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//! }
//!
//! # async fn demo() {
//! let mut controller = PlaybackController::new(Silent::default());
//! let a = Track::new("a", "Song A", "Artist", "Album").with_preview("https://cdn/a.mp3");
//! let b = Track::new("b", "Song B", "Artist", "Album").with_preview("https://cdn/b.mp3");
//!
//! controller.play(a.clone(), vec![a, b]).await;
//! assert_eq!(controller.status(), PlayerStatus::Playing);
//!
//! controller.next().await;
//! assert_eq!(controller.current_track().unwrap().id, "b");
//! # }
//! ```

mod controller;
mod error;
mod events;
mod media;
mod queue;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use media::{MediaEvent, MediaHandle};
pub use queue::Queue;
pub use types::{PlayOutcome, PlaybackSnapshot, PlayerStatus};
