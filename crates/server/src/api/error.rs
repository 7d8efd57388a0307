//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use modelpicker_core::{CatalogError, PickerError};

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<PickerError> for ApiError {
    fn from(err: PickerError) -> Self {
        match &err {
            PickerError::MaxSelectionReached { .. } => ApiError::conflict(err.to_string()),
            PickerError::EntryNotFound { .. } => ApiError::not_found(err.to_string()),
            PickerError::ImportParse(_) => ApiError::bad_request(err.to_string()),
            PickerError::Catalog(_) | PickerError::Settings(_) => {
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpicker_core::AssetKind;

    #[test]
    fn test_picker_errors_map_to_status() {
        let err: ApiError = PickerError::MaxSelectionReached {
            kind: AssetKind::Model,
            max: 5,
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: ApiError = PickerError::EntryNotFound {
            kind: AssetKind::Lora,
            id: "lora_9".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.message.contains("lora_9"));

        let err: ApiError = PickerError::ImportParse("eof".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_catalog_error_is_internal() {
        let err: ApiError = CatalogError::Parse("bad".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
