//! Working mode handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use modelpicker_core::{CatalogDocument, ModeFlags, ModeUpdate};

use super::ApiError;
use crate::state::AppState;

/// GET /api/v1/modes
pub async fn get_modes(State(state): State<Arc<AppState>>) -> Result<Json<ModeFlags>, ApiError> {
    Ok(Json(state.picker()?.flags()))
}

/// POST /api/v1/modes
///
/// Setting SDXL mode swaps in the matching catalog file when a separate
/// SDXL catalog is configured and a different file is loaded. The swap
/// follows the loaded file, not the mode flag, which auto-detection may
/// already have turned on.
pub async fn set_modes(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ModeUpdate>,
) -> Result<Json<ModeFlags>, ApiError> {
    let swap = match update.sdxl {
        Some(sdxl)
            if sdxl != state.sdxl_catalog() && state.config().catalog.sdxl_path.is_some() =>
        {
            let path = state.catalog_path(sdxl);
            info!("Switching catalog to {:?}", path);
            Some((sdxl, CatalogDocument::from_path(path)?))
        }
        _ => None,
    };

    let mut picker = state.picker()?;
    let flags = picker.set_modes(update);
    if let Some((sdxl, document)) = swap {
        picker.load_catalog(document);
        state.set_sdxl_catalog(sdxl);
    }

    Ok(Json(flags))
}
