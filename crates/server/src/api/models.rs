//! Catalog view and filter handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use modelpicker_core::{AssetKind, CatalogDocument, FilterUpdate};

use super::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct KindQuery {
    #[serde(default)]
    pub kind: AssetKind,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub kind: AssetKind,
    #[serde(flatten)]
    pub update: FilterUpdate,
}

#[derive(Debug, Serialize)]
pub struct CatalogTotals {
    pub models: usize,
    pub vaes: usize,
    pub loras: usize,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub path: String,
    pub totals: CatalogTotals,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/models?kind=
///
/// The filtered view of one asset kind with selection and compatibility marks.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KindQuery>,
) -> Result<Json<Value>, ApiError> {
    let picker = state.picker()?;
    render_view(&picker.view(params.kind))
}

/// POST /api/v1/models/filter
///
/// Merge a partial filter and return the new view.
pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut picker = state.picker()?;
    picker.set_filter(request.kind, &request.update);
    render_view(&picker.view(request.kind))
}

/// POST /api/v1/catalog/reload
///
/// Re-read the loaded catalog file. Selections follow their entries by
/// name; those the new catalog does not contain are dropped.
pub async fn reload_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let path = state.loaded_catalog_path();
    let document = CatalogDocument::from_path(path)?;

    let mut picker = state.picker()?;
    picker.load_catalog(document);
    info!("Reloaded catalog from {:?}", path);

    Ok(Json(ReloadResponse {
        path: path.display().to_string(),
        totals: CatalogTotals {
            models: picker.catalog(AssetKind::Model).len(),
            vaes: picker.catalog(AssetKind::Vae).len(),
            loras: picker.catalog(AssetKind::Lora).len(),
        },
    }))
}

fn render_view<T: Serialize>(view: &T) -> Result<Json<Value>, ApiError> {
    serde_json::to_value(view)
        .map(Json)
        .map_err(|e| ApiError::internal(format!("Failed to render view: {}", e)))
}
