//! Response envelopes and the error taxonomy for every API call.
//!
//! The store API wraps payloads as `{ "success": bool, "message": ..., "data": ..., "errors": ... }`.
//! That loose shape is decoded once here into [`ApiResponse`] and then into
//! `Result<_, ApiError>`, so UI code never inspects raw JSON.

use crate::shared::validation::ValidationErrors;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Wire shapes
// ============================================================================

/// Raw envelope as the API sends it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Paginated list payload (`data` of a list envelope)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Query string part shared by every paginated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
}

impl PageQuery {
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

// ============================================================================
// Tagged result
// ============================================================================

/// Envelope resolved into exactly one of two outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
    },
    Failure {
        message: String,
        field_errors: ValidationErrors,
    },
}

impl<T> From<Envelope<T>> for ApiResponse<T> {
    fn from(envelope: Envelope<T>) -> Self {
        if envelope.success {
            ApiResponse::Success {
                data: envelope.data,
                message: envelope.message,
            }
        } else {
            ApiResponse::Failure {
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request was rejected".to_string()),
                field_errors: envelope.errors.map(Into::into).unwrap_or_default(),
            }
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, status: u16) -> Result<Option<T>, ApiError> {
        match self {
            ApiResponse::Success { data, .. } => Ok(data),
            ApiResponse::Failure {
                message,
                field_errors,
            } => Err(ApiError::Rejected {
                status,
                message,
                field_errors,
            }),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure, no response received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired, please sign in again")]
    Unauthorized,

    /// Non-2xx status or `success: false`
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        field_errors: ValidationErrors,
    },

    /// Caught before any request was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Field-level messages, from either side of the wire
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Rejected { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Normalize an HTTP status and body text into a typed result.
///
/// - 401 is always `Unauthorized`
/// - 2xx with an envelope goes through [`ApiResponse`]; a bare payload (no
///   envelope) is accepted as the data itself
/// - 2xx with an empty body is `Ok(None)`
/// - anything else is `Rejected`, with the envelope message when the body has one
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }

    let is_ok = (200..300).contains(&status);
    let trimmed = body.trim();

    if !is_ok {
        let (message, field_errors) =
            match serde_json::from_str::<Envelope<serde_json::Value>>(trimmed) {
                Ok(envelope) => (
                    envelope
                        .message
                        .unwrap_or_else(|| format!("HTTP {}", status)),
                    envelope.errors.map(Into::into).unwrap_or_default(),
                ),
                Err(_) => (format!("HTTP {}", status), ValidationErrors::new()),
            };
        return Err(ApiError::Rejected {
            status,
            message,
            field_errors,
        });
    }

    if trimmed.is_empty() {
        return Ok(None);
    }

    // The envelope is read loosely first: a rejection may carry a `data`
    // of any shape and must still surface its message.
    match serde_json::from_str::<Envelope<serde_json::Value>>(trimmed) {
        Ok(envelope) => match ApiResponse::from(envelope).into_result(status)? {
            None => Ok(None),
            Some(data) => serde_json::from_value::<T>(data)
                .map(Some)
                .map_err(|e| ApiError::Decode(e.to_string())),
        },
        Err(envelope_err) => match serde_json::from_str::<T>(trimmed) {
            Ok(bare) => Ok(Some(bare)),
            Err(_) => Err(ApiError::Decode(envelope_err.to_string())),
        },
    }
}

/// Same as [`decode`] but the payload must be present
pub fn decode_required<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode(status, body)?.ok_or_else(|| ApiError::Decode("response has no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_success_envelope() {
        let body = json!({ "success": true, "message": "ok", "data": { "id": 7 } }).to_string();
        let item: Item = decode_required(200, &body).unwrap();
        assert_eq!(item, Item { id: 7 });
    }

    #[test]
    fn test_success_false_is_rejected_even_with_200() {
        let body = json!({
            "success": false,
            "message": "Name is taken",
            "errors": { "name.ar": ["already exists"] }
        })
        .to_string();
        let err = decode::<Item>(200, &body).unwrap_err();
        match &err {
            ApiError::Rejected {
                status, message, ..
            } => {
                assert_eq!(*status, 200);
                assert_eq!(message, "Name is taken");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            err.field_errors().and_then(|e| e.first("name.ar")),
            Some("already exists")
        );
    }

    #[test]
    fn test_rejection_keeps_message_whatever_the_data_shape() {
        let body = json!({ "success": false, "message": "Category is in use", "data": [] })
            .to_string();
        let err = decode::<Item>(200, &body).unwrap_err();
        assert!(matches!(&err, ApiError::Rejected { status: 200, .. }));
        assert_eq!(err.to_string(), "Category is in use");

        let body = json!({ "success": false, "message": "Category is in use", "data": {} })
            .to_string();
        let err = decode::<Vec<Item>>(200, &body).unwrap_err();
        assert_eq!(err.to_string(), "Category is in use");
    }

    #[test]
    fn test_success_with_null_data_is_none() {
        let body = json!({ "success": true, "data": null }).to_string();
        assert_eq!(decode::<Item>(200, &body).unwrap(), None);
    }

    #[test]
    fn test_success_with_wrong_data_shape_is_decode_error() {
        let body = json!({ "success": true, "data": { "name": "x" } }).to_string();
        assert!(matches!(decode::<Item>(200, &body), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_non_2xx_uses_envelope_message() {
        let body = json!({ "success": false, "message": "Category not found" }).to_string();
        let err = decode::<Item>(404, &body).unwrap_err();
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_non_2xx_without_envelope() {
        let err = decode::<Item>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_unauthorized() {
        let err = decode::<Item>(401, "").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_empty_body_is_none() {
        assert_eq!(decode::<Item>(204, "").unwrap(), None);
        assert!(decode_required::<Item>(204, "").is_err());
    }

    #[test]
    fn test_bare_payload_accepted() {
        let items: Vec<Item> = decode_required(200, r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode::<Item>(200, "{not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_page_has_more() {
        let body = json!({
            "success": true,
            "data": { "data": [{ "id": 1 }], "current_page": 1, "last_page": 3, "per_page": 1, "total": 3 }
        })
        .to_string();
        let page: Page<Item> = decode_required(200, &body).unwrap();
        assert!(page.has_more());
        assert_eq!(PageQuery::first(1).next().page, 2);
    }
}
