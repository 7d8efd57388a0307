//! Selection handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use modelpicker_core::{AssetKind, TypeFilter};

use super::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub kind: AssetKind,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    /// Clear only this kind; every kind when absent.
    #[serde(default)]
    pub kind: Option<AssetKind>,
}

#[derive(Debug, Deserialize)]
pub struct NamesRequest {
    #[serde(default)]
    pub kind: AssetKind,
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectAllRequest {
    #[serde(default)]
    pub kind: AssetKind,
    #[serde(default, rename = "type")]
    pub model_type: TypeFilter,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub kind: AssetKind,
    /// Display names of selected entries, in catalog order.
    pub selected: Vec<String>,
    /// Entries changed by the request.
    pub changed: usize,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub kind: AssetKind,
    pub id: String,
    pub is_selected: bool,
    pub selected: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: Vec<AssetKind>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/selection/toggle
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let mut picker = state.picker()?;
    let outcome = picker.toggle(request.kind, &request.id)?;

    Ok(Json(ToggleResponse {
        kind: request.kind,
        id: request.id,
        is_selected: outcome.is_selected(),
        selected: picker.selected_names(request.kind),
    }))
}

/// DELETE /api/v1/selection?kind=
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClearQuery>,
) -> Result<Json<ClearResponse>, ApiError> {
    let mut picker = state.picker()?;
    let cleared = match params.kind {
        Some(kind) => {
            picker.clear(kind);
            vec![kind]
        }
        None => {
            picker.clear_all();
            AssetKind::ALL.to_vec()
        }
    };

    Ok(Json(ClearResponse { cleared }))
}

/// POST /api/v1/selection/names
///
/// Replace the selection by display names. Unknown names are ignored.
pub async fn select_by_names(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NamesRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut picker = state.picker()?;
    let changed = picker.select_by_names(request.kind, &request.names);

    Ok(Json(SelectionResponse {
        kind: request.kind,
        selected: picker.selected_names(request.kind),
        changed,
    }))
}

/// POST /api/v1/selection/all
pub async fn select_all(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectAllRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut picker = state.picker()?;
    let changed = picker.select_all(request.kind, request.model_type);

    Ok(Json(SelectionResponse {
        kind: request.kind,
        selected: picker.selected_names(request.kind),
        changed,
    }))
}
