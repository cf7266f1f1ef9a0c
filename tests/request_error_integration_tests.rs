//! Integration tests: failed resource manager responses through categorization
//!
//! Each test serves a canned failure from a mock resource manager, reads it
//! with `read_request_error` and categorizes it the way a deployer call site
//! would.

mod common;

use aks_errors::sdk::read_request_error;
use aks_errors::{
    handle_error_to_categorized_error, to_error_response, Category, DeploymentOperation,
    Dependency, ErrorCode, HttpErrorResponse, Subcode,
};
use common::{arm_error_response, plain_error_response, test_context, RESOURCE_GROUP_PATH};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

async fn fetch_failure(server: &MockServer) -> reqwest::Response {
    reqwest::Client::new()
        .put(format!("{}{}", server.uri(), RESOURCE_GROUP_PATH))
        .send()
        .await
        .expect("mock server reachable")
}

async fn serve(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(RESOURCE_GROUP_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Status and service error tests
// ============================================================================

#[tokio::test]
async fn test_not_found_with_service_error_is_client_error() {
    // Arrange
    let server = serve(arm_error_response(
        404,
        "ResourceGroupNotFound",
        "Resource group 'rg' could not be found.",
    ))
    .await;

    // Act
    let response = fetch_failure(&server).await;
    let request_error = read_request_error(response).await.expect("body readable");
    let resp = request_error.response_info();
    let err = handle_error_to_categorized_error(&test_context(), resp.as_ref(), request_error);

    // Assert
    assert_eq!(err.category(), Some(Category::ClientError));
    assert_eq!(err.subcode().as_str(), "ResourceGroupNotFound");
    assert_eq!(err.dependency(), &Dependency::ARM);
    assert_eq!(err.retriable(), Some(false));
    assert_eq!(err.aks_team().as_str(), "control-plane");
}

#[tokio::test]
async fn test_detail_code_is_joined_into_subcode() {
    // Arrange
    let server = serve(ResponseTemplate::new(409).set_body_json(json!({
        "error": {
            "code": "Conflict",
            "message": "Operation could not be completed",
            "details": [{"code": "AnotherOperationInProgress", "message": "in progress"}]
        }
    })))
    .await;

    // Act
    let request_error = read_request_error(fetch_failure(&server).await)
        .await
        .expect("body readable");
    let resp = request_error.response_info();
    let err = handle_error_to_categorized_error(&test_context(), resp.as_ref(), request_error);

    // Assert
    assert_eq!(err.category(), Some(Category::ClientError));
    assert_eq!(err.subcode().as_str(), "Conflict_AnotherOperationInProgress");
}

#[tokio::test]
async fn test_plain_server_failure_uses_reason_phrase() {
    // Arrange
    let server = serve(plain_error_response(503, "upstream connect error")).await;

    // Act
    let request_error = read_request_error(fetch_failure(&server).await)
        .await
        .expect("body readable");
    assert!(request_error.service_error.is_none());
    assert!(request_error.message.contains("upstream connect error"));
    let resp = request_error.response_info();
    let err = handle_error_to_categorized_error(&test_context(), resp.as_ref(), request_error);

    // Assert
    assert_eq!(err.category(), Some(Category::InternalError));
    assert_eq!(err.subcode().as_str(), "ServiceUnavailable");
    assert_eq!(err.retriable(), Some(true));

    let http = HttpErrorResponse::from_error_response(
        err.to_api_error_response(ErrorCode::INTERNAL_OPERATION_ERROR, "Internal server error"),
    );
    assert_eq!(http.http_status_code, 500);
    assert_eq!(http.error_response.body.subcode, Subcode::new("ServiceUnavailable"));
}

#[tokio::test]
async fn test_invalid_parameter_attribution_depends_on_vm_size_phrase() {
    // Arrange
    let vm_size = serve(arm_error_response(
        400,
        "InvalidParameter",
        "The requested VM size Standard_DS2_v2 is not available in the current region.",
    ))
    .await;
    let other = serve(arm_error_response(
        400,
        "InvalidParameter",
        "The value of parameter linuxConfiguration.ssh.publicKeys.keyData is invalid.",
    ))
    .await;

    // Act
    let vm_size_error = read_request_error(fetch_failure(&vm_size).await)
        .await
        .expect("body readable");
    let other_error = read_request_error(fetch_failure(&other).await)
        .await
        .expect("body readable");
    let vm_size_resp = vm_size_error.response_info();
    let other_resp = other_error.response_info();
    let vm_size_err =
        handle_error_to_categorized_error(&test_context(), vm_size_resp.as_ref(), vm_size_error);
    let other_err =
        handle_error_to_categorized_error(&test_context(), other_resp.as_ref(), other_error);

    // Assert
    assert_eq!(vm_size_err.category(), Some(Category::ClientError));
    assert_eq!(vm_size_err.subcode(), &Subcode::INVALID_PARAMETER);
    assert_eq!(other_err.category(), Some(Category::InternalError));
    assert_eq!(other_err.subcode(), &Subcode::INVALID_PARAMETER);
    assert_eq!(other_err.retriable(), Some(false));
}

// ============================================================================
// Deployment and concurrency tests
// ============================================================================

#[tokio::test]
async fn test_deployment_operation_from_list_response() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Resources/deployments/d/operations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "operationId": "A1B2",
                "properties": {
                    "provisioningState": "Failed",
                    "statusMessage": {
                        "status": "Failed",
                        "error": {
                            "code": "ResourceDeploymentFailure",
                            "message": "The resource operation completed with terminal provisioning state 'Failed'.",
                            "details": [{"code": "PublicIPCountLimitReached", "message": "Cannot create more than 10 public IP addresses"}]
                        }
                    },
                    "targetResource": {"resourceType": "Microsoft.Network/publicIPAddresses"}
                }
            }]
        })))
        .mount(&server)
        .await;

    // Act
    let text = reqwest::get(format!(
        "{}/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Resources/deployments/d/operations",
        server.uri()
    ))
    .await
    .expect("mock server reachable")
    .text()
    .await
    .expect("body readable");
    let body: serde_json::Value = serde_json::from_str(&text).expect("json body");
    let operations: Vec<DeploymentOperation> =
        serde_json::from_value(body["value"].clone()).expect("operations parse");
    let response = to_error_response(&test_context(), &operations[0]).expect("valid status message");

    // Assert
    assert_eq!(response.code().as_str(), "PublicIPCountLimitReached");
    assert_eq!(response.category(), Some(Category::ClientError));
}

#[tokio::test]
async fn test_concurrent_categorization_is_consistent() {
    // Arrange
    let messages = [
        "dial tcp 10.0.0.1:443: i/o timeout",
        r#"Code="QuotaExceeded" Message="cores""#,
        "vmssInstanceErrorCode=NoVMSSInstanceView;",
    ];

    // Act
    let handles: Vec<_> = (0..24)
        .map(|i| {
            let message = messages[i % messages.len()];
            tokio::spawn(async move {
                handle_error_to_categorized_error(&test_context(), None, message)
            })
        })
        .collect();

    // Assert
    for (i, handle) in handles.into_iter().enumerate() {
        let err = handle.await.expect("task completes");
        let expected = match i % messages.len() {
            0 => "IOTimedout",
            1 => "QuotaExceeded",
            _ => "NoVMSSInstanceView",
        };
        assert_eq!(err.subcode().as_str(), expected);
    }
}
