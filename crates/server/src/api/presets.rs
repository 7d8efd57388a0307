//! Quick-select preset handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PresetResponse {
    pub preset: String,
    /// Display names now selected.
    pub selected: Vec<String>,
}

/// POST /api/v1/presets/{name}
///
/// Unknown presets select nothing, which clears the checkpoint selection.
pub async fn apply_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<PresetResponse>, ApiError> {
    let mut picker = state.picker()?;
    let selected = picker.apply_preset(&name);

    Ok(Json(PresetResponse {
        preset: name,
        selected,
    }))
}
