/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub admin: AdminSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally visible base URL, used to build object-storage links
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Root directory holding one subdirectory per bucket
    #[serde(default = "default_objects_path")]
    pub objects_path: PathBuf,
}

/// Song-catalog credentials and endpoints
///
/// Without both credentials the catalog routes answer with fixed mock data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default = "default_catalog_api_url")]
    pub api_url: String,

    #[serde(default = "default_catalog_token_url")]
    pub token_url: String,

    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminSettings {
    /// Service key required for bucket administration
    #[serde(default)]
    pub service_key: Option<String>,
}

impl CatalogSettings {
    /// Client id and secret, when both are set and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }
}

impl AdminSettings {
    pub fn is_configured(&self) -> bool {
        self.service_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Environment variables use the `HARMONY_` prefix with `__` between
    /// nesting levels, e.g. `HARMONY_CATALOG__CLIENT_ID`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from(path.unwrap_or("config.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("HARMONY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server port must be non-zero".to_string()));
        }

        url::Url::parse(&self.server.public_url).map_err(|e| {
            ServerError::Config(format!(
                "invalid public url '{}': {}",
                self.server.public_url, e
            ))
        })?;

        for (name, value) in [
            ("catalog api url", &self.catalog.api_url),
            ("catalog token url", &self.catalog.token_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ServerError::Config(format!("invalid {} '{}': {}", name, value, e)))?;
        }

        let has_id = self.catalog.client_id.as_deref().is_some_and(|s| !s.is_empty());
        let has_secret = self
            .catalog
            .client_secret
            .as_deref()
            .is_some_and(|s| !s.is_empty());
        if has_id != has_secret {
            return Err(ServerError::Config(
                "catalog client id and secret must be set together".to_string(),
            ));
        }

        if self.catalog.search_limit == 0 || self.catalog.search_limit > 50 {
            return Err(ServerError::Config(
                "catalog search limit must be between 1 and 50".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: default_public_url(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        objects_path: default_objects_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/harmony.db".to_string()
}

fn default_objects_path() -> PathBuf {
    PathBuf::from("./data/objects")
}

fn default_catalog_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_catalog_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_search_limit() -> u32 {
    20
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_url: default_catalog_api_url(),
            token_url: default_catalog_token_url(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            catalog: CatalogSettings::default(),
            admin: AdminSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.catalog.credentials().is_none());
        assert!(!config.admin.is_configured());
    }

    #[test]
    fn half_configured_catalog_rejected() {
        let mut config = ServerConfig::default();
        config.catalog.client_id = Some("id".to_string());

        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn empty_credentials_count_as_missing() {
        let mut config = ServerConfig::default();
        config.catalog.client_id = Some(String::new());
        config.catalog.client_secret = Some(String::new());

        assert!(config.validate().is_ok());
        assert!(config.catalog.credentials().is_none());
    }

    #[test]
    fn invalid_public_url_rejected() {
        let mut config = ServerConfig::default();
        config.server.public_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{ "server": { "port": 9000 } }"#).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.catalog.search_limit, 20);
    }
}
