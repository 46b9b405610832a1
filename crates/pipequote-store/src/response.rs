//! # API Response Envelope
//!
//! The `{ success, data | error }` wrapper every mutating call returns to
//! external callers. The HTTP layer serializes this directly.
//!
//! ## Shapes
//! ```json
//! { "success": true,  "data": { ... }, "message": "Quotation created" }
//! { "success": false, "error": "item 3 is invalid: quantity must be positive" }
//! ```

use serde::Serialize;

use crate::error::StoreResult;

/// Uniform response envelope for the service surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// A successful response with a human-readable message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    /// A failed response; `error` is the specific failure text.
    pub fn err(error: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Wraps a repository result into the envelope.
    pub fn from_result(result: StoreResult<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => ApiResponse::err(err.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_ok_shape() {
        let response = ApiResponse::ok_with_message(vec![1, 2, 3], "Retrieved 3 quotations");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Retrieved 3 quotations");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_err_shape() {
        let response: ApiResponse<()> = ApiResponse::err("Authentication required");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Authentication required");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_from_result_maps_errors() {
        let result: crate::error::StoreResult<u32> =
            Err(StoreError::not_found("Quotation", "42"));
        let response = ApiResponse::from_result(result);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Quotation not found: 42"));
    }
}
