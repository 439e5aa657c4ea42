//! Search sessions
//!
//! Overlapping searches can resolve out of order. Each search takes a
//! generation ticket before its request goes out; when the response arrives
//! after a newer search began it is discarded instead of overwriting the
//! newer result.

use crate::client::HarmonyClient;
use crate::error::Result;
use harmony_core::{RequestGeneration, Track};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Queries shorter than this never trigger suggestions
pub const MIN_SUGGEST_CHARS: usize = 3;

/// Maximum suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;

/// Which endpoint a session searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Catalog,
    Local,
}

/// One search box worth of requests
///
/// Clones share the generation counter, so a search started from any clone
/// supersedes in-flight searches on the others.
#[derive(Debug, Clone)]
pub struct SearchSession {
    client: HarmonyClient,
    source: SearchSource,
    generation: Arc<RequestGeneration>,
    debounce: Duration,
}

impl SearchSession {
    pub fn new(client: HarmonyClient, source: SearchSource) -> Self {
        Self {
            client,
            source,
            generation: Arc::new(RequestGeneration::new()),
            debounce: Duration::from_millis(300),
        }
    }

    /// Delay before a suggestion request is sent
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Run a search
    ///
    /// Returns `Ok(None)` when a newer search started while this one was in
    /// flight.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<Track>>> {
        let ticket = self.generation.begin();
        let result = self.fetch(query).await;

        if !self.generation.is_current(ticket) {
            debug!(query, generation = ticket.generation(), "discarding stale search response");
            return Ok(None);
        }
        result.map(Some)
    }

    /// Type-ahead suggestions
    ///
    /// Short queries clear the suggestions without a request. Otherwise the
    /// request waits out the debounce and is skipped entirely if a newer
    /// keystroke arrived meanwhile.
    pub async fn suggest(&self, query: &str) -> Result<Option<Vec<Track>>> {
        let ticket = self.generation.begin();

        if query.chars().count() < MIN_SUGGEST_CHARS {
            return Ok(Some(Vec::new()));
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if !self.generation.is_current(ticket) {
                return Ok(None);
            }
        }

        let result = self.fetch(query).await;
        if !self.generation.is_current(ticket) {
            return Ok(None);
        }

        result.map(|mut tracks| {
            tracks.truncate(MAX_SUGGESTIONS);
            Some(tracks)
        })
    }

    /// Drop whatever is in flight
    pub fn cancel(&self) {
        self.generation.invalidate();
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Track>> {
        match self.source {
            SearchSource::Catalog => self.client.search_catalog(query).await,
            SearchSource::Local => self.client.search_local(query).await,
        }
    }
}
