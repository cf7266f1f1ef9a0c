//! Typed failure shapes produced by the resource manager clients.
//!
//! The clients themselves live outside this crate. These are the shapes the
//! classifier knows how to read when it finds them in an error's source chain:
//!
//! - [`ServiceError`] - the `{code, message, target, details}` object the
//!   resource manager returns in error bodies
//! - [`RequestError`] - a failed request: status code, optional service error
//!   and the transport-level cause
//! - [`ResponseInfo`] - the parts of an HTTP response the classifier consults
//! - [`KubeStatus`] / [`KubeStatusError`] - the Kubernetes API status shape

use crate::error::{BoxError, CategorizerError, CategorizerResult};
use crate::logging::log_debug;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;

/// Codes a service error may carry that say nothing about the failure.
const UNKNOWN_CODE_SENTINELS: &[&str] = &["unknown", "Unknown", "UnknownError"];

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// ServiceError
// ============================================================================

/// Error object returned by the resource manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub details: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<Map<String, Value>>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional_info: Vec<Map<String, Value>>,
}

#[derive(Deserialize)]
struct ServiceErrorEnvelope {
    error: ServiceError,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Append a `{code, message}` detail.
    pub fn with_detail(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        let mut detail = Map::new();
        detail.insert("code".to_string(), Value::String(code.into()));
        detail.insert("message".to_string(), Value::String(message.into()));
        self.details.push(detail);
        self
    }

    /// Parse an error body, accepting both `{"error": {...}}` and a bare
    /// service error object.
    pub fn from_body(body: &str) -> Option<Self> {
        if let Ok(envelope) = serde_json::from_str::<ServiceErrorEnvelope>(body) {
            return Some(envelope.error);
        }
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|service_error| !service_error.code.is_empty())
    }

    /// `code` of the first detail, if it is a string.
    pub fn first_detail_code(&self) -> Option<&str> {
        self.details
            .first()
            .and_then(|detail| detail.get("code"))
            .and_then(Value::as_str)
    }

    /// The code used as a subcode: the outer code, joined with the first
    /// detail code as `outer_inner` when that adds information.
    ///
    /// Empty and sentinel codes are skipped, so an uninformative outer code
    /// yields the detail code alone. Returns `None` when neither is usable.
    pub fn combined_code(&self) -> Option<String> {
        let outer = Some(self.code.as_str()).filter(|code| !is_uninformative(code));
        let inner = self
            .first_detail_code()
            .filter(|code| !is_uninformative(code) && Some(*code) != outer);
        match (outer, inner) {
            (Some(outer), Some(inner)) => Some(format!("{outer}_{inner}")),
            (Some(code), None) | (None, Some(code)) => Some(code.to_string()),
            (None, None) => None,
        }
    }
}

fn is_uninformative(code: &str) -> bool {
    code.is_empty() || UNKNOWN_CODE_SENTINELS.contains(&code)
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code=\"{}\" Message=\"{}\"", self.code, self.message)?;
        if let Some(target) = &self.target {
            write!(f, " Target=\"{target}\"")?;
        }
        if !self.details.is_empty() {
            let details = serde_json::to_string(&self.details).unwrap_or_default();
            write!(f, " Details={details}")?;
        }
        Ok(())
    }
}

impl StdError for ServiceError {}

// ============================================================================
// RequestError
// ============================================================================

/// A request to the resource manager that did not succeed.
#[derive(Debug)]
pub struct RequestError {
    pub status_code: Option<u16>,
    pub service_error: Option<ServiceError>,
    pub message: String,
    pub source: Option<BoxError>,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            service_error: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_service_error(mut self, service_error: ServiceError) -> Self {
        self.service_error = Some(service_error);
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Response view for the classifier, when the status is a valid HTTP code.
    pub fn response_info(&self) -> Option<ResponseInfo> {
        self.status_code
            .and_then(|status| StatusCode::from_u16(status).ok())
            .map(ResponseInfo::new)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(status) = self.status_code {
            write!(f, " Status={status}")?;
        }
        if let Some(service_error) = &self.service_error {
            write!(f, " {service_error}")?;
        }
        Ok(())
    }
}

impl StdError for RequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// Turn a failed resource manager response into a [`RequestError`].
///
/// The body is parsed as a service error when possible; otherwise it becomes
/// part of the message.
pub async fn read_request_error(response: reqwest::Response) -> CategorizerResult<RequestError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|err| CategorizerError::response_body(format!("reading body from {url}"), err))?;

    log_debug!(
        status = status.as_u16(),
        url = %url,
        body_length = body.len(),
        "Read resource manager error response"
    );

    let message = format!("autorest/azure: Service returned an error. Request to {url} failed");
    let request_error = RequestError::new(message).with_status(status.as_u16());
    Ok(match ServiceError::from_body(&body) {
        Some(service_error) => request_error.with_service_error(service_error),
        None if body.is_empty() => request_error,
        None => RequestError {
            message: format!("{}: {body}", request_error.message),
            ..request_error
        },
    })
}

// ============================================================================
// ResponseInfo
// ============================================================================

/// The HTTP response accompanying a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: StatusCode,
}

impl ResponseInfo {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }

    pub fn from_u16(status: u16) -> Option<Self> {
        StatusCode::from_u16(status).ok().map(Self::new)
    }
}

impl From<&reqwest::Response> for ResponseInfo {
    fn from(response: &reqwest::Response) -> Self {
        Self::new(response.status())
    }
}

// ============================================================================
// Kubernetes status
// ============================================================================

/// The Kubernetes API `Status` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub code: u16,
}

impl KubeStatus {
    pub const REASON_UNKNOWN: &'static str = "Unknown";
    pub const STATUS_FAILURE: &'static str = "Failure";

    /// Status for a failure that does not carry its own.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: Self::STATUS_FAILURE.to_string(),
            message: message.into(),
            reason: Self::REASON_UNKNOWN.to_string(),
            code: 0,
        }
    }
}

/// A failure returned by the Kubernetes API server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .status.message)]
pub struct KubeStatusError {
    pub status: KubeStatus,
}

impl KubeStatusError {
    pub fn new(status: KubeStatus) -> Self {
        Self { status }
    }
}
