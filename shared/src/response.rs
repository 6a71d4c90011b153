//! API Response types
//!
//! Every HTTP operation answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "Consultation created",
//!     "error": {},
//!     "data": { ... }
//! }
//! ```
//! On failure `success` is false, `error` carries the code/kind/details and
//! `data` is null.

use crate::error::{AppError, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Error section of the envelope; serializes as `{}` on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Numeric error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// validation | not_found | persistence | internal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Field-level or contextual details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Error information (empty object on success)
    #[serde(default)]
    pub error: ErrorBody,
    /// Response payload (null on failure)
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: ErrorBody::default(),
            data: Some(data),
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            message: err.message.clone(),
            error: ErrorBody {
                code: Some(err.code.code()),
                kind: Some(err.kind()),
                details: err.details.clone(),
            },
            data: None,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use crate::error::ErrorCode;
        use axum::Json;

        let status = match self.error.code {
            None => http::StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::ok_with_message(json!({"id": "a1"}), "Consultation created");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Consultation created",
                "error": {},
                "data": {"id": "a1"}
            })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::consultation_not_found("a1");
        let value = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Consultation a1 not found");
        assert_eq!(value["error"]["code"], 4001);
        assert_eq!(value["error"]["kind"], "not_found");
        assert_eq!(value["error"]["details"]["id"], "a1");
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_into_response_uses_error_status() {
        use axum::response::IntoResponse;

        let resp =
            ApiResponse::<()>::error(&AppError::new(ErrorCode::ValidationFailed)).into_response();
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);

        let resp = ApiResponse::ok_with_message(1, "Done").into_response();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }
}
