/// Object storage service - local-disk buckets with public URLs
use crate::error::{Result, ServerError};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use url::Url;

/// Bucket holding uploaded songs and their cover art
pub const SONGS_BUCKET: &str = "songs";

/// URL prefix under which buckets are served
pub const STORAGE_ROUTE: &str = "/storage";

#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ObjectStorage {
    base_path: PathBuf,
    public_url: Url,
}

impl ObjectStorage {
    /// # Errors
    /// Returns `ServerError::Config` if `public_url` is not an absolute
    /// http(s)-style URL
    pub fn new(base_path: PathBuf, public_url: &str) -> Result<Self> {
        let public_url = Url::parse(public_url)
            .map_err(|e| ServerError::Config(format!("Invalid public URL '{}': {}", public_url, e)))?;
        if public_url.cannot_be_a_base() {
            return Err(ServerError::Config(format!(
                "Public URL '{}' cannot carry a path",
                public_url
            )));
        }

        Ok(Self {
            base_path,
            public_url,
        })
    }

    /// Create the storage root
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create a public bucket; fails when it already exists
    pub async fn create_bucket(&self, name: &str) -> Result<Bucket> {
        validate_bucket_name(name)?;

        let dir = self.base_path.join(name);
        if fs::try_exists(&dir).await? {
            return Err(ServerError::BadRequest(format!(
                "Bucket '{}' already exists",
                name
            )));
        }

        fs::create_dir_all(&dir).await?;
        tracing::info!(bucket = name, path = ?dir, "bucket created");

        Ok(Bucket {
            name: name.to_string(),
        })
    }

    pub async fn bucket_exists(&self, name: &str) -> Result<bool> {
        validate_bucket_name(name)?;
        Ok(fs::try_exists(self.base_path.join(name)).await?)
    }

    /// Store an object, creating intermediate directories
    pub async fn put_object(&self, bucket: &str, object_path: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.object_path(bucket, object_path)?;
        if !fs::try_exists(self.base_path.join(bucket)).await? {
            return Err(ServerError::NotFound(format!("Bucket '{}' not found", bucket)));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(path)
    }

    /// Public URL of an object, each path segment percent-encoded
    pub fn public_url(&self, bucket: &str, object_path: &str) -> String {
        let mut url = self.public_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(STORAGE_ROUTE.trim_start_matches('/'))
                .push(bucket)
                .extend(object_path.split('/').filter(|s| !s.is_empty()));
        }
        url.into()
    }

    /// Resolve an object path inside its bucket
    ///
    /// Only plain relative components are accepted, so the result can never
    /// leave the bucket directory.
    pub fn object_path(&self, bucket: &str, object_path: &str) -> Result<PathBuf> {
        validate_bucket_name(bucket)?;

        let relative = Path::new(object_path);
        let mut components = relative.components().peekable();
        if components.peek().is_none() {
            return Err(ServerError::BadRequest("Object path is empty".to_string()));
        }
        if !components.all(|c| matches!(c, Component::Normal(_))) {
            return Err(ServerError::BadRequest(format!(
                "Invalid object path: {}",
                object_path
            )));
        }

        Ok(self.base_path.join(bucket).join(relative))
    }
}

fn validate_bucket_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        && !name.starts_with('-');

    if valid {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!("Invalid bucket name: {}", name)))
    }
}
