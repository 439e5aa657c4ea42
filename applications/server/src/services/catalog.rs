/// Song-catalog proxy
///
/// Talks to the catalog's Web API with an app-level access token obtained by
/// client-credentials exchange. The token is cached and refreshed shortly
/// before it expires. Without credentials every call answers with fixed mock
/// data so the UI stays usable in development.
use crate::config::CatalogSettings;
use crate::error::{Result, ServerError};
use harmony_core::{CatalogTrack, Track};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before the upstream expiry
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    tracks: SearchPage,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<CatalogTrack>,
}

pub struct CatalogService {
    http: reqwest::Client,
    settings: CatalogSettings,
    token: Mutex<Option<CachedToken>>,
}

impl CatalogService {
    pub fn new(settings: CatalogSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        if settings.credentials().is_none() {
            tracing::warn!("catalog credentials not configured, serving mock catalog data");
        }

        Ok(Self {
            http,
            settings,
            token: Mutex::new(None),
        })
    }

    /// Whether calls are answered from mock data
    pub fn is_mock(&self) -> bool {
        self.settings.credentials().is_none()
    }

    /// Search tracks by free text
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        if self.is_mock() {
            return Ok(vec![mock_search_track()]);
        }

        let token = self.access_token().await?;
        let limit = self.settings.search_limit.to_string();
        let response = self
            .http
            .get(format!("{}/search", self.settings.api_url.trim_end_matches('/')))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Internal(format!(
                "catalog search returned {}: {}",
                status, body
            )));
        }

        let envelope: SearchEnvelope = response.json().await?;
        tracing::debug!(query, results = envelope.tracks.items.len(), "catalog search");

        Ok(envelope.tracks.items.into_iter().map(Track::from).collect())
    }

    /// Fetch one track by catalog id
    pub async fn track(&self, id: &str) -> Result<Track> {
        if self.is_mock() {
            return Ok(mock_track(id));
        }

        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!(
                "{}/tracks/{}",
                self.settings.api_url.trim_end_matches('/'),
                id
            ))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ServerError::NotFound("Track not found".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Internal(format!(
                "catalog track {} returned {}: {}",
                id, status, body
            )));
        }

        let raw: CatalogTrack = response.json().await?;
        Ok(raw.into())
    }

    async fn access_token(&self) -> Result<String> {
        let (client_id, client_secret) = self
            .settings
            .credentials()
            .ok_or_else(|| ServerError::Config("catalog credentials missing".to_string()))?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http
            .post(&self.settings.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Internal(format!(
                "catalog token exchange returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        tracing::debug!(expires_in = token.expires_in, "catalog access token refreshed");

        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

fn mock_search_track() -> Track {
    let mut track = Track::new("1", "Blinding Lights", "The Weeknd", "After Hours").with_duration(200);
    track.external_url = Some("https://open.spotify.com/track/1".to_string());
    track
}

fn mock_track(id: &str) -> Track {
    let mut track = Track::new(id, "Blinding Lights", "The Weeknd", "After Hours").with_duration(200);
    track.external_url = Some(format!("https://open.spotify.com/track/{}", id));
    track
}
