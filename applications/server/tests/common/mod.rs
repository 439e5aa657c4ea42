/// Common test utilities and fixtures
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use harmony_server::{
    config::CatalogSettings, create_router, AppState, CatalogService, ObjectStorage,
};
use harmony_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const PUBLIC_URL: &str = "http://localhost:8080";

/// Router plus the resources backing it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub objects_dir: TempDir,
}

/// App with an in-memory database and mock catalog
pub async fn create_test_app() -> TestApp {
    create_test_app_with(CatalogSettings::default(), true).await
}

pub async fn create_test_app_with(catalog: CatalogSettings, admin_enabled: bool) -> TestApp {
    let db = Arc::new(Database::in_memory().await.unwrap());

    let objects_dir = TempDir::new().unwrap();
    let objects = ObjectStorage::new(objects_dir.path().to_path_buf(), PUBLIC_URL).unwrap();
    objects.initialize().await.unwrap();

    let catalog = Arc::new(CatalogService::new(catalog).unwrap());
    let state = AppState::new(db, catalog, Arc::new(objects), admin_enabled);

    TestApp {
        router: create_router(state.clone()),
        state,
        objects_dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::post(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }
}

/// Track fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn track(id: &str, preview: Option<&str>) -> Value {
        json!({
            "id": id,
            "name": format!("Song {}", id),
            "artist": "Queen",
            "album": "A Night at the Opera",
            "albumArt": "/api/placeholder/300/300",
            "previewUrl": preview,
            "duration": 180
        })
    }

    pub fn playable(id: &str) -> Value {
        track(id, Some(format!("https://cdn.example.com/{}.mp3", id).as_str()))
    }
}
