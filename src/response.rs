//! Wire-level error envelopes returned to API callers.
//!
//! The serialized shape is a compatibility contract with the public API:
//!
//! ```json
//! {"error": {"code": "...", "message": "...", "target": "...", "details": [...]}}
//! ```
//!
//! `category`, `subcode` and `inner_message` ride along for in-process
//! consumers and are never serialized.
//!
//! # Example
//!
//! ```rust
//! use aks_errors::{Category, ErrorCode, ErrorResponse};
//!
//! let resp = ErrorResponse::new(
//!     Category::ClientError,
//!     ErrorCode::INVALID_PARAMETER,
//!     "agentPoolProfiles[0].count must be positive",
//! );
//! let json = serde_json::to_string(&resp).unwrap();
//! assert!(json.starts_with(r#"{"error":{"code":"InvalidParameter""#));
//! ```

use crate::sdk::null_as_default;
use crate::taxonomy::{Category, ErrorCode, Subcode};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// The `error` object of an [`ErrorResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: ErrorCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub details: Vec<ErrorBody>,
    #[serde(skip)]
    pub category: Option<Category>,
    #[serde(skip)]
    pub subcode: Subcode,
    #[serde(skip)]
    pub inner_message: String,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.map(|c| c.as_str()).unwrap_or_default();
        write!(
            f,
            "Category: {category}; Code: {}; SubCode: {}; Message: {}",
            self.code, self.subcode, self.message
        )?;
        if let Some(target) = &self.target {
            write!(f, "; Target: {target}")?;
        }
        if !self.inner_message.is_empty() {
            write!(f, "; InnerMessage: {}", self.inner_message)?;
        }
        Ok(())
    }
}

impl StdError for ErrorBody {}

/// `{"error": ErrorBody}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "error")]
    pub body: ErrorBody,
}

impl ErrorResponse {
    pub fn new(category: Category, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            body: ErrorBody {
                code,
                message: message.into(),
                category: Some(category),
                ..ErrorBody::default()
            },
        }
    }

    pub fn new_with_subcode(
        category: Category,
        code: ErrorCode,
        subcode: Subcode,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, code, message).with_subcode(subcode)
    }

    pub fn new_with_inner_message(
        category: Category,
        code: ErrorCode,
        message: impl Into<String>,
        inner_message: impl Into<String>,
    ) -> Self {
        Self::new(category, code, message).with_inner_message(inner_message)
    }

    pub fn new_with_subcode_and_inner_message(
        category: Category,
        code: ErrorCode,
        subcode: Subcode,
        message: impl Into<String>,
        inner_message: impl Into<String>,
    ) -> Self {
        Self::new(category, code, message)
            .with_subcode(subcode)
            .with_inner_message(inner_message)
    }

    pub fn new_with_target(
        category: Category,
        code: ErrorCode,
        message: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::new(category, code, message).with_target(target)
    }

    pub fn with_subcode(mut self, subcode: Subcode) -> Self {
        self.body.subcode = subcode;
        self
    }

    pub fn with_inner_message(mut self, inner_message: impl Into<String>) -> Self {
        self.body.inner_message = inner_message.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.body.target = Some(target.into());
        self
    }

    pub fn with_details(mut self, details: Vec<ErrorBody>) -> Self {
        self.body.details = details;
        self
    }

    pub fn category(&self) -> Option<Category> {
        self.body.category
    }

    pub fn code(&self) -> &ErrorCode {
        &self.body.code
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.body.fmt(f)
    }
}

impl StdError for ErrorResponse {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.body)
    }
}

impl From<ErrorBody> for ErrorResponse {
    fn from(body: ErrorBody) -> Self {
        Self { body }
    }
}

/// An [`ErrorResponse`] paired with the HTTP status to send it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpErrorResponse {
    pub error_response: ErrorResponse,
    pub http_status_code: u16,
}

impl HttpErrorResponse {
    /// Status derived from the body's category; uncategorized bodies are 500.
    pub fn from_error_response(error_response: ErrorResponse) -> Self {
        let http_status_code = error_response
            .category()
            .unwrap_or(Category::InternalError)
            .http_status();
        with_http_status_code(http_status_code, error_response)
    }
}

/// Pair a status code with a response body.
pub fn with_http_status_code(http_status_code: u16, error_response: ErrorResponse) -> HttpErrorResponse {
    HttpErrorResponse {
        error_response,
        http_status_code,
    }
}

impl fmt::Display for HttpErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTPStatusCode: {}; {}", self.http_status_code, self.error_response)
    }
}

impl StdError for HttpErrorResponse {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error_response)
    }
}
