//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use folio::assets::AssetLoader;
use folio::server::{build_router, create_app_state, create_app_state_with_source, AppState};
use folio::services::ImageSource;

/// Test application with router and direct access to state
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    /// Keeps a temporary config file alive for the lifetime of the app
    _config_dir: Option<tempfile::TempDir>,
}

impl TestApp {
    /// Create a new test application using embedded assets
    pub fn new() -> Self {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        let state = create_app_state(asset_loader).expect("Failed to create app state");
        Self::from_state(state, None)
    }

    /// Embedded content, but configuration read from `config_yaml`
    pub fn with_config(config_yaml: &str) -> Self {
        let (dir, config_file) = write_config(config_yaml);
        let asset_loader = Arc::new(AssetLoader::new(None, Some(config_file)));
        let state = create_app_state(asset_loader).expect("Failed to create app state");
        Self::from_state(state, Some(dir))
    }

    /// Embedded assets, images served by `source`
    pub fn with_source(source: Arc<dyn ImageSource>) -> Self {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        let state =
            create_app_state_with_source(asset_loader, source).expect("Failed to create app state");
        Self::from_state(state, None)
    }

    fn from_state(state: AppState, config_dir: Option<tempfile::TempDir>) -> Self {
        // Build router using shared server module (same as production)
        let router = build_router(state.clone());
        Self {
            router,
            state,
            _config_dir: config_dir,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn write_config(config_yaml: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, config_yaml).expect("Failed to write config");
    (dir, path)
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Decode a PNG body to `(width, height, rgba)`
    pub fn rgba(&self) -> (u32, u32, Vec<u8>) {
        let image = image::load_from_memory(&self.body)
            .expect("Failed to decode PNG response")
            .into_rgba8();
        let (width, height) = image.dimensions();
        (width, height, image.into_raw())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
