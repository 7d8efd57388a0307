//! API tests for settings export, import and restore across restarts.

mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::{send, TestConfig, TestFixture};

#[tokio::test]
async fn test_export_downloads_dated_file() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_3"}))
        .await;
    fixture
        .post("/api/v1/selection/toggle", json!({"kind": "vae", "id": "vae_1"}))
        .await;

    let response = fixture.get("/api/v1/settings/export").await;
    assert_status!(response, StatusCode::OK);

    let disposition = response.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    assert!(disposition.contains(&format!("widget-settings-{}.json", today)));

    assert_eq!(response.body["selectedIds"], json!(["model_3"]));
    assert_eq!(response.body["selectedVae"], "vae_1");
    assert!(response.body.get("exportDate").is_some());
}

#[tokio::test]
async fn test_import_malformed_is_rejected_without_changes() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_0"}))
        .await;

    let response = fixture
        .post_raw("/api/v1/settings/import", "{ this is not json")
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let view = fixture.get("/api/v1/models").await;
    assert_eq!(view.body["selected_count"], 1);
    assert_eq!(view.body["entries"][0]["selected"], true);
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let fixture = TestFixture::new();
    fixture.post_empty("/api/v1/presets/popular").await;
    let export = fixture.get("/api/v1/settings/export").await;

    fixture.delete("/api/v1/selection").await;
    let response = fixture
        .post_raw("/api/v1/settings/import", &export.text)
        .await;
    assert_status!(response, StatusCode::OK);

    let view = fixture.get("/api/v1/models").await;
    assert_eq!(view.body["selected_count"], 3);
}

#[tokio::test]
async fn test_import_reconciles_unknown_ids_and_cap() {
    let fixture = TestFixture::with_config(TestConfig::single_select());
    let document = json!({
        "selectedIds": ["model_5", "model_2", "model_77"],
        "selectedLoras": ["lora_0"],
        "flags": {"sdxl": false, "inpainting": true}
    });

    let response = fixture
        .post_raw("/api/v1/settings/import", &document.to_string())
        .await;
    assert_status!(response, StatusCode::OK);

    let view = fixture.get("/api/v1/models").await;
    let selected: Vec<&Value> = view.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], "model_2");
    assert_eq!(view.body["flags"]["inpainting"], true);
}

#[tokio::test]
async fn test_selection_survives_restart() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_2"}))
        .await;
    fixture
        .post("/api/v1/selection/toggle", json!({"kind": "lora", "id": "lora_1"}))
        .await;

    let (router, _state) = fixture.restart();

    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_eq!(view.body["selected_count"], 1);
    assert_eq!(view.body["entries"][2]["selected"], true);
    // Auto-detected from the inpainting checkpoint
    assert_eq!(view.body["flags"]["inpainting"], true);

    let loras = send(&router, "GET", "/api/v1/models?kind=lora", None, None).await;
    assert_eq!(loras.body["entries"][1]["selected"], true);
}

#[tokio::test]
async fn test_restart_in_sdxl_mode_loads_sdxl_catalog() {
    let fixture = TestFixture::with_config(TestConfig::with_sdxl_catalog());
    fixture.post("/api/v1/modes", json!({"sdxl": true})).await;
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_1"}))
        .await;

    let (router, _state) = fixture.restart();

    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_eq!(view.body["total"], 2);
    assert_eq!(view.body["flags"]["sdxl"], true);
    assert_eq!(view.body["entries"][1]["selected"], true);
}

#[tokio::test]
async fn test_restart_after_auto_detected_sdxl_keeps_catalog_and_selection() {
    let fixture = TestFixture::with_config(TestConfig::with_sdxl_catalog());
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_1"}))
        .await;

    let (router, _state) = fixture.restart();

    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_eq!(view.body["total"], 7);
    assert_eq!(view.body["flags"]["sdxl"], true);
    assert_eq!(view.body["selected_count"], 1);
    assert_eq!(view.body["entries"][1]["display_name"], "AnythingXL_v5");
    assert_eq!(view.body["entries"][1]["selected"], true);
}

#[tokio::test]
async fn test_restart_after_switching_back_loads_default_catalog() {
    let fixture = TestFixture::with_config(TestConfig::with_sdxl_catalog());
    fixture.post("/api/v1/modes", json!({"sdxl": true})).await;
    fixture.post("/api/v1/modes", json!({"sdxl": false})).await;
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_0"}))
        .await;

    let (router, _state) = fixture.restart();

    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_eq!(view.body["total"], 7);
    assert_eq!(view.body["entries"][0]["selected"], true);
}

#[tokio::test]
async fn test_restore_matches_saved_names_when_catalog_file_changes() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/selection/toggle", json!({"id": "model_0"}))
        .await;

    // RealismEngine moves from the first position to the last
    std::fs::write(
        &fixture.state.config().catalog.path,
        r#"{"PonyDiffusionXL": {}, "DreamShaper": {}, "RealismEngine": {}}"#,
    )
    .unwrap();

    let (router, _state) = fixture.restart();

    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_eq!(view.body["selected_count"], 1);
    assert_eq!(view.body["entries"][0]["selected"], false);
    assert_eq!(view.body["entries"][2]["selected"], true);
}

#[tokio::test]
async fn test_corrupt_saved_settings_fall_back_to_defaults() {
    let fixture = TestFixture::new();
    {
        use modelpicker_core::{SettingsStore, SqliteSettingsStore};
        let store = SqliteSettingsStore::new(&fixture.db_path).unwrap();
        store.save("widgetSettings", "garbage").unwrap();
    }

    let (router, _state) = fixture.restart();
    let view = send(&router, "GET", "/api/v1/models", None, None).await;
    assert_status!(view, StatusCode::OK);
    assert_eq!(view.body["selected_count"], 0);
}
