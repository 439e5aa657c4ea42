//! Ephemeral object URLs for local audio blobs
//!
//! A registered blob is reachable through its `blob:` URL only while the
//! returned [`ObjectUrl`] guard is alive. Dropping the guard revokes the URL,
//! so every exit path (removal, teardown, early return) releases it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

const URL_PREFIX: &str = "blob:harmony-hub/";

/// A registered blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
}

/// Shared table of live object URLs
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    entries: Arc<Mutex<HashMap<String, Blob>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return the guard owning the URL
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> ObjectUrl {
        let url = format!("{}{}", URL_PREFIX, Uuid::new_v4());
        let blob = Blob {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        };
        self.lock().insert(url.clone(), blob);
        ObjectUrl {
            url,
            registry: self.clone(),
        }
    }

    /// Look up a live URL
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.lock().get(url).cloned()
    }

    /// Number of live URLs
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, url: &str) {
        if self.lock().remove(url).is_some() {
            tracing::trace!(url, "object url revoked");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Blob>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII guard for one object URL
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    registry: ObjectUrlRegistry,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_drop_revokes_url() {
        let registry = ObjectUrlRegistry::new();
        let guard = registry.create(vec![1u8, 2, 3], "audio/mpeg");
        let url = guard.as_str().to_string();

        assert!(url.starts_with("blob:"));
        assert_eq!(registry.resolve(&url).unwrap().mime_type, "audio/mpeg");

        drop(guard);

        assert!(registry.resolve(&url).is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn urls_are_unique() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create(vec![0u8], "audio/wav");
        let b = registry.create(vec![0u8], "audio/wav");

        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(registry.live_count(), 2);
    }
}
