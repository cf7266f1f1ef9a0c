//! Shared fixtures for unit tests.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::categorized::CategorizedError;
use crate::classifier::Classifier;
use crate::context::RequestContext;
use crate::deployment::DeploymentOperation;
use crate::sdk::ResponseInfo;
use serde_json::{json, Value};

pub const TEST_TEAM: &str = "node-provisioning";

/// Context with the test team set.
pub fn test_context() -> RequestContext {
    RequestContext::new()
        .with_aks_team(TEST_TEAM)
        .with_operation_id("00000000-0000-0000-0000-000000000001")
}

/// Categorize a bare message with the default classifier and no response.
pub fn categorize(message: &str) -> CategorizedError {
    Classifier::default().handle_error(&test_context(), None, message.to_string())
}

/// Categorize a bare message that came with an HTTP status.
pub fn categorize_with_status(status: u16, err: impl Into<crate::BoxError>) -> CategorizedError {
    let resp = ResponseInfo::from_u16(status).expect("valid test status");
    Classifier::default().handle_error(&test_context(), Some(&resp), err)
}

/// A failed deployment operation targeting `resource_type`.
pub fn deployment_operation(resource_type: &str, status_message: Value) -> DeploymentOperation {
    serde_json::from_value(json!({
        "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Resources/deployments/d/operations/op1",
        "operationId": "op1",
        "properties": {
            "provisioningOperation": "Create",
            "provisioningState": "Failed",
            "statusCode": "Conflict",
            "statusMessage": status_message,
            "targetResource": {
                "id": "/subscriptions/sub/resourceGroups/rg/providers/x",
                "resourceName": "x",
                "resourceType": resource_type
            }
        }
    }))
    .expect("valid deployment operation fixture")
}

/// `{"status": "Failed", "error": {"code": code, "message": message}}`
pub fn failed_status(code: &str, message: &str) -> Value {
    json!({
        "status": "Failed",
        "error": { "code": code, "message": message }
    })
}
