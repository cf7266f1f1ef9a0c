//! # aks-errors
//!
//! Error categorization for a managed Kubernetes control-plane deployer that
//! drives the Azure Resource Manager API.
//!
//! ## Key Features
//!
//! - **Categorization**: Turns raw resource manager, authentication library and
//!   VM extension failures into a stable `(category, subcode, dependency)` label
//! - **Fault attribution**: `ClientError` vs `InternalError` drives retries and
//!   SLO accounting
//! - **Deployment trees**: Unwraps failed template deployment operations
//! - **Retry advice**: Every categorized error carries a `retriable` hint
//! - **Wire envelopes**: `ErrorResponse` is the public API's error body
//!
//! ## Example
//!
//! ```rust
//! use aks_errors::{handle_error_to_categorized_error, Category, Dependency, RequestContext};
//!
//! let ctx = RequestContext::new().with_aks_team("control-plane");
//! let err = handle_error_to_categorized_error(
//!     &ctx,
//!     None,
//!     r#"Put "https://management.azure.com/subscriptions/x": dial tcp 20.0.0.1:443: i/o timeout"#,
//! );
//!
//! assert_eq!(err.category(), Some(Category::InternalError));
//! assert_eq!(err.subcode().as_str(), "IOTimedout");
//! assert_eq!(err.dependency(), &Dependency::ARM);
//! assert_eq!(err.retriable(), Some(true));
//!
//! let api_error = err.to_api_error_response("InternalOperationError".into(), "deployment failed");
//! assert_eq!(api_error.body.subcode.as_str(), "IOTimedout");
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod categorized;
pub mod classifier;
pub mod config;
pub mod context;
pub mod deployment;
pub mod error;
pub mod patterns;
pub mod response;
pub mod retry;
pub mod sdk;
pub mod taxonomy;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use categorized::{as_categorized_error, to_categorized_error, CategorizedError};
pub use classifier::{handle_error_to_categorized_error, parse_raw_error, Classifier};
pub use config::ClassifierConfig;
pub use context::RequestContext;
pub use deployment::{is_error_code_retryable, to_error_response, DeploymentOperation};
pub use error::{BoxError, CategorizerError, CategorizerResult};
pub use response::{with_http_status_code, ErrorBody, ErrorResponse, HttpErrorResponse};
pub use retry::set_retriable_based_on_categorized_error;
pub use sdk::{KubeStatus, KubeStatusError, RequestError, ResponseInfo, ServiceError};
pub use taxonomy::{
    AksTeam, ArmErrorCode, Category, Dependency, ErrorCode, ResourceProvider, ResourceType,
    Subcode, VmExtensionErrorCode,
};
