//! Harmony Hub Local Files
//!
//! Device-local collection of uploaded audio files.
//!
//! - **Stores**: [`KeyValueStore`] for track lists and derived views,
//!   [`BlobStore`] for audio bytes; [`JsonFileStore`] on disk and
//!   [`MemoryStore`] in memory
//! - **Collection**: [`LocalCollection`] keeps the track list, favorites and
//!   recents, persisting after every change
//! - **Object URLs**: [`ObjectUrl`] guards release their registration on drop,
//!   so removing a track or dropping the collection frees its audio
//!
//! # Example
//!
//! ```rust
//! use harmony_local::{LocalCollection, MemoryStore, NewLocalFile, ObjectUrlRegistry};
//!
//! let registry = ObjectUrlRegistry::new();
//! let mut collection = LocalCollection::load(MemoryStore::new(), registry.clone());
//!
//! let added = collection
//!     .add(NewLocalFile {
//!         file_name: "demo.mp3".into(),
//!         mime_type: "audio/mpeg".into(),
//!         duration: 12.4,
//!         bytes: vec![0xFF, 0xFB],
//!     })
//!     .unwrap();
//! assert!(added.is_clean());
//! assert_eq!(registry.live_count(), 1);
//!
//! drop(collection);
//! assert_eq!(registry.live_count(), 0);
//! ```

#![forbid(unsafe_code)]

pub mod collection;
pub mod error;
pub mod object_url;
pub mod store;
pub mod track;

pub use collection::{
    LocalCollection, PersistWarning, Persisted, ALL_SONGS_KEY, FAVORITES_KEY,
    RECENTLY_PLAYED_KEY, RECENTS_LIMIT, TRACKS_KEY,
};
pub use error::{LocalError, Result};
pub use object_url::{Blob, ObjectUrl, ObjectUrlRegistry};
pub use store::{BlobStore, JsonFileStore, KeyValueStore, MemoryStore};
pub use track::{LocalTrack, NewLocalFile, LOCAL_ALBUM, LOCAL_ARTIST};
