//! Settings export and import handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
}

/// GET /api/v1/settings/export
///
/// Download the current settings as a JSON file.
pub async fn export_settings(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let export = state.picker()?.export_settings()?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.contents,
    )
        .into_response())
}

/// POST /api/v1/settings/import
///
/// The body is the raw contents of a previously exported file.
pub async fn import_settings(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    state.picker()?.import_settings(&body)?;

    Ok(Json(ImportResponse {
        message: "Settings imported successfully!".to_string(),
    }))
}
