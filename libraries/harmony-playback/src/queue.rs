//! Play queue
//!
//! Ordered sequence of tracks; insertion order is playback order. A track is
//! de-duplicated by id only when it is (re)inserted at the head.

use harmony_core::Track;

/// Ordered play queue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Build a queue with `head` first, followed by `source` minus any entry
    /// sharing `head`'s id
    ///
    /// Relative order of the remaining entries is preserved.
    pub fn with_head(head: Track, source: Vec<Track>) -> Self {
        let mut tracks = Vec::with_capacity(source.len() + 1);
        let head_id = head.id.clone();
        tracks.push(head);
        tracks.extend(source.into_iter().filter(|t| t.id != head_id));
        Self { tracks }
    }

    /// Replace the queue verbatim (no reordering, no de-duplication)
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Index of the first track with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Track following the one with `id`
    ///
    /// When `id` is not queued the head is returned.
    pub fn after(&self, id: &str) -> Option<&Track> {
        match self.position(id) {
            Some(index) => self.tracks.get(index + 1),
            None => self.tracks.first(),
        }
    }

    /// Track preceding the one with `id`
    pub fn before(&self, id: &str) -> Option<&Track> {
        self.position(id)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.tracks.get(index))
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate in playback order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    /// Clone into a plain vector
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}

impl From<Vec<Track>> for Queue {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}
