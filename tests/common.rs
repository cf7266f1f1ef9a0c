//! Test helper utilities for aks-errors integration tests
//!
//! This module provides reusable fixtures for exercising the crate against a
//! mock resource manager endpoint.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use aks_errors::RequestContext;
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

pub const RESOURCE_GROUP_PATH: &str = "/subscriptions/sub/resourceGroups/rg";

/// Request context for integration tests.
pub fn test_context() -> RequestContext {
    RequestContext::new()
        .with_aks_team("control-plane")
        .with_operation_id("11111111-2222-3333-4444-555555555555")
}

/// `{"error": {"code": code, "message": message}}`
pub fn arm_error_body(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message } })
}

/// A failed resource manager response with a JSON error body.
pub fn arm_error_response(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(arm_error_body(code, message))
}

/// A failed response whose body is not a service error.
pub fn plain_error_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}
