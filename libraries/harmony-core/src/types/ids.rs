/// ID types for Harmony Hub entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Playlist identifier
///
/// Also used as the public share identifier of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a playlist ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlaylistId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(PlaylistId::generate(), PlaylistId::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = PlaylistId::new("p1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
    }
}
