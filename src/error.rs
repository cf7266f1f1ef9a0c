//! Error types for the categorization crate itself.
//!
//! Categorizing a failure never fails: the classifier always produces a
//! [`CategorizedError`](crate::CategorizedError). The handful of operations
//! that can fail on their own (unmarshaling a deployment tree, validating a
//! [`ClassifierConfig`](crate::ClassifierConfig), reading an HTTP error body)
//! return [`CategorizerResult`].
//!
//! # Example
//!
//! ```rust
//! use aks_errors::{CategorizerError, CategorizerResult};
//!
//! fn require_handler(name: &str) -> CategorizerResult<&str> {
//!     if name.is_empty() {
//!         return Err(CategorizerError::configuration_error("empty handler name"));
//!     }
//!     Ok(name)
//! }
//! ```

use crate::logging::{log_error, log_warn};
use std::error::Error as StdError;
use thiserror::Error;

/// Owned, thread-safe failure as produced by upstream clients.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Alias for `Result<T, CategorizerError>`.
pub type CategorizerResult<T> = std::result::Result<T, CategorizerError>;

/// Failures raised by the crate's own fallible operations.
#[derive(Error, Debug)]
pub enum CategorizerError {
    /// A deployment-operation status message could not be re-encoded as an
    /// error response. Surfaced to the caller verbatim.
    #[error("Failed to marshal deployment status message: {message}")]
    Marshal {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The deployment-operation record has no status message to parse.
    #[error("Deployment operation {operation_id} has no status message")]
    MissingStatusMessage { operation_id: String },

    /// A [`ClassifierConfig`](crate::ClassifierConfig) failed validation.
    #[error("Classifier configuration error: {message}")]
    ConfigurationError { message: String },

    /// The body of a failed HTTP response could not be read.
    #[error("Failed to read error response body: {message}")]
    ResponseBody {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl CategorizerError {
    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn marshal(message: impl Into<String>, source: serde_json::Error) -> Self {
        let message = message.into();
        log_error!(
            error_type = "marshal",
            message = %message,
            source = %source,
            "Deployment status message could not be marshaled"
        );
        Self::Marshal { message, source }
    }

    pub fn missing_status_message(operation_id: impl Into<String>) -> Self {
        let operation_id = operation_id.into();
        log_warn!(
            error_type = "missing_status_message",
            operation_id = %operation_id,
            "Deployment operation carries no status message"
        );
        Self::MissingStatusMessage { operation_id }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Classifier configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn response_body(message: impl Into<String>, source: reqwest::Error) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_body",
            message = %message,
            "Failed to read resource manager error body"
        );
        Self::ResponseBody { message, source }
    }
}

// ============================================================================
// Source-chain helpers
// ============================================================================

/// Iterate an error and every error beneath it.
pub(crate) fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&current| current.source())
}

/// First error of type `T` in the chain, outermost first.
pub(crate) fn find_in_chain<'a, T: StdError + 'static>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a T> {
    chain(err).find_map(|current| current.downcast_ref::<T>())
}

/// The full text of an error chain.
///
/// Wrapping errors often omit their source from `Display`; the source text is
/// appended unless the outer text already contains it.
pub(crate) fn chain_message(err: &(dyn StdError + 'static)) -> String {
    let mut message = String::new();
    for current in chain(err) {
        let text = current.to_string();
        if text.is_empty() || message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}
