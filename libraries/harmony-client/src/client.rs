//! Main Harmony Hub client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, ErrorBody, SearchResponse};
use harmony_core::{Playlist, Track};
use harmony_playback::PlaybackSnapshot;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Client for a Harmony Hub server.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use harmony_client::{ClientConfig, HarmonyClient};
///
/// let client = HarmonyClient::new(ClientConfig::new("http://localhost:8080"))?;
/// let tracks = client.search_catalog("bohemian").await?;
/// println!("{} results", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct HarmonyClient {
    http: Client,
    base: Url,
}

impl HarmonyClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let trimmed = config.url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base = Url::parse(trimmed.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("HarmonyHub/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    /// Server base URL without trailing slash.
    pub fn url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Search the external catalog.
    pub async fn search_catalog(&self, query: &str) -> Result<Vec<Track>> {
        let url = self.endpoint(&["api", "catalog", "search"])?;
        let response: SearchResponse = self.get_json(url, Some(query)).await?;
        Ok(response.into_tracks())
    }

    /// Fetch one catalog track.
    pub async fn get_catalog_track(&self, id: &str) -> Result<Track> {
        let url = self.endpoint(&["api", "catalog", "track", id])?;
        self.get_json(url, None).await
    }

    /// Search uploaded songs.
    pub async fn search_local(&self, query: &str) -> Result<Vec<Track>> {
        let url = self.endpoint(&["api", "local", "search"])?;
        let response: SearchResponse = self.get_json(url, Some(query)).await?;
        Ok(response.into_tracks())
    }

    /// Fetch one uploaded song.
    pub async fn get_local_song(&self, id: &str) -> Result<Track> {
        let url = self.endpoint(&["api", "local", "songs", id])?;
        self.get_json(url, None).await
    }

    /// Fetch a publicly shared playlist.
    pub async fn get_shared_playlist(&self, id: &str) -> Result<Playlist> {
        let url = self.endpoint(&["api", "share", id])?;
        self.get_json(url, None).await
    }

    /// Current now-playing session.
    pub async fn playback(&self) -> Result<PlaybackSnapshot> {
        let url = self.endpoint(&["api", "playback"])?;
        self.get_json(url, None).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl("URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: Option<&str>) -> Result<T> {
        debug!(url = %url, query, "GET");

        let mut request = self.http.get(url);
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }

        let response = check(request.send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

/// Turn non-success responses into `ServerError`, preferring the `{error}`
/// message when the body carries one
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::ServerError {
        status: status.as_u16(),
        message,
    })
}
