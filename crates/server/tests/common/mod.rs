//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the full router over a
//! catalog file and settings database in a temporary directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use modelpicker_core::{
    CatalogConfig, Config, PickerConfig, ServerConfig, SettingsConfig, SettingsStore,
    SqliteSettingsStore,
};
use modelpicker_server::state::AppState;

/// Standard checkpoint catalog with VAEs and LoRAs.
pub const CATALOG_JSON: &str = r#"{
    "models": {
        "RealismEngine": {"url": "https://example.com/realism.safetensors"},
        "AnythingXL_v5": {},
        "CounterfeitV3-inpainting": {},
        "D5K_v6": {},
        "MeinaMix_anime": {},
        "PhotonMerged": {},
        "OilPainting_art": {}
    },
    "vaes": {
        "vae-ft-mse-840000": {},
        "kl-f8-anime2": {}
    },
    "loras": {
        "add_detail": {},
        "more_details": {}
    }
}"#;

/// Catalog swapped in by SDXL mode.
pub const SDXL_CATALOG_JSON: &str = r#"{
    "JuggernautXL": {},
    "PonyDiffusionXL": {}
}"#;

/// Test fixture for API tests.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_toggle() {
///     let fixture = TestFixture::new();
///     let response = fixture.post("/api/v1/selection/toggle", json!({"id": "model_0"})).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state, for subscribing to events
    pub state: Arc<AppState>,
    /// Temporary directory holding the catalogs and settings database
    pub temp_dir: TempDir,
    /// Settings database path
    pub db_path: PathBuf,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Write a separate SDXL catalog and configure it
    pub with_sdxl_catalog: bool,
    /// Override the checkpoint selection policy
    pub picker: Option<PickerConfig>,
}

impl TestConfig {
    pub fn with_sdxl_catalog() -> Self {
        Self {
            with_sdxl_catalog: true,
            ..Default::default()
        }
    }

    pub fn single_select() -> Self {
        Self {
            picker: Some(PickerConfig {
                allow_multiple: false,
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with the standard catalog.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_path = temp_dir.path().join("models.json");
        std::fs::write(&catalog_path, CATALOG_JSON).expect("Failed to write catalog");

        let sdxl_path = if test_config.with_sdxl_catalog {
            let path = temp_dir.path().join("xl-models.json");
            std::fs::write(&path, SDXL_CATALOG_JSON).expect("Failed to write SDXL catalog");
            Some(path)
        } else {
            None
        };

        let db_path = temp_dir.path().join("settings.db");
        let config = Config {
            catalog: CatalogConfig {
                path: catalog_path,
                sdxl_path,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            picker: test_config.picker.unwrap_or_default(),
            settings: SettingsConfig {
                database: db_path.clone(),
                ..Default::default()
            },
        };

        let router_and_state = Self::build(config);
        Self {
            router: router_and_state.0,
            state: router_and_state.1,
            temp_dir,
            db_path,
        }
    }

    /// Build a second fixture over the same directory, as after a restart.
    pub fn restart(&self) -> (Router, Arc<AppState>) {
        Self::build(self.state.config().clone())
    }

    fn build(config: Config) -> (Router, Arc<AppState>) {
        let settings: Arc<dyn SettingsStore> = Arc::new(
            SqliteSettingsStore::new(&config.settings.database)
                .expect("Failed to open settings store"),
        );
        let state = Arc::new(
            AppState::initialize(config, settings).expect("Failed to initialize state"),
        );
        let router = modelpicker_server::api::create_router(state.clone());
        (router, state)
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        send(&self.router, "GET", path, None, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        send(&self.router, "POST", path, Some(body.to_string()), Some("application/json")).await
    }

    /// Send a POST request with no body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        send(&self.router, "POST", path, None, None).await
    }

    /// Send a POST request with a raw string body.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        send(&self.router, "POST", path, Some(body.to_string()), Some("application/json")).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        send(&self.router, "DELETE", path, None, None).await
    }
}

/// Send a request to a router and collect the response.
pub async fn send(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<String>,
    content_type: Option<&str>,
) -> TestResponse {
    let mut request_builder = Request::builder().method(method).uri(path);
    if let Some(content_type) = content_type {
        request_builder = request_builder.header("Content-Type", content_type);
    }
    let request = request_builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect body")
        .to_bytes();

    let text = String::from_utf8_lossy(&body_bytes).into_owned();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
        text,
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
