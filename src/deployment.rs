//! Categorization of failed template deployment operations.
//!
//! The deployment service reports each failed resource as an operation whose
//! `statusMessage` holds an error tree. The outermost code is usually the
//! generic `ResourceDeploymentFailure` wrapper; the real failure is its first
//! detail. [`to_error_response`] unwraps that tree and decides the category
//! from the resource type the operation targeted.

use crate::context::RequestContext;
use crate::error::{CategorizerError, CategorizerResult};
use crate::logging::log_info;
use crate::patterns;
use crate::response::ErrorResponse;
use crate::taxonomy::{
    self, ArmErrorCode, Category, ResourceType, Subcode, VmExtensionErrorCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One operation of a template deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<DeploymentOperationProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOperationProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    /// Free-form error tree, `{"status": ..., "error": {...}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_resource: Option<TargetResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl DeploymentOperation {
    /// Type of the resource this operation deployed, empty when unknown.
    pub fn resource_type(&self) -> ResourceType {
        self.properties
            .as_ref()
            .and_then(|properties| properties.target_resource.as_ref())
            .and_then(|target| target.resource_type.clone())
            .map(ResourceType::new)
            .unwrap_or_default()
    }
}

/// Convert a failed deployment operation into a categorized [`ErrorResponse`].
///
/// # Errors
///
/// Returns [`CategorizerError::MissingStatusMessage`] when the operation has
/// no status message and [`CategorizerError::Marshal`] when the status message
/// is not an error response. This is the only place categorization surfaces a
/// failure of its own.
pub fn to_error_response(
    ctx: &RequestContext,
    operation: &DeploymentOperation,
) -> CategorizerResult<ErrorResponse> {
    let status_message = operation
        .properties
        .as_ref()
        .and_then(|properties| properties.status_message.as_ref())
        .ok_or_else(|| {
            CategorizerError::missing_status_message(
                operation.operation_id.clone().unwrap_or_default(),
            )
        })?;

    let raw = serde_json::to_string(status_message)
        .map_err(|err| CategorizerError::marshal("encoding deployment status message", err))?;
    let parsed: ErrorResponse = serde_json::from_str(&raw)
        .map_err(|err| CategorizerError::marshal("decoding deployment status message", err))?;

    let mut response = parsed;
    if response.body.code == ArmErrorCode::RESOURCE_DEPLOYMENT_FAILURE.as_str() {
        if let Some(first) = response.body.details.first().cloned() {
            response.body.code = first.code;
            response.body.message = first.message;
            response.body.target = first.target;
        }
    }

    let resource_type = operation.resource_type();
    let is_extension = resource_type == ResourceType::VM_EXTENSIONS
        || resource_type == ResourceType::VMSS_EXTENSIONS;
    if is_extension
        && response.body.code == ArmErrorCode::VM_EXTENSION_PROVISIONING_ERROR.as_str()
    {
        if let Some(exit_code) = patterns::extension_exit_code(&response.body.message) {
            response.body.subcode = VmExtensionErrorCode::from_exit_code(exit_code)
                .map(Subcode::from)
                .unwrap_or(Subcode::VM_EXTENSION_PROVISIONING_ERROR);
        }
    }

    let category = if taxonomy::is_client_error_code(&resource_type, response.body.code.as_str()) {
        Category::ClientError
    } else {
        Category::InternalError
    };
    response.body.category = Some(category);

    log_info!(
        code = %response.body.code,
        subcode = %response.body.subcode,
        category = %category,
        resource_type = %resource_type,
        aks_team = %ctx.aks_team,
        operation_id = ctx.operation_id.as_deref().unwrap_or_default(),
        "Categorized deployment operation failure"
    );
    Ok(response)
}

/// Whether `code` is transient for the provider of `resource_type`.
///
/// ```rust
/// use aks_errors::is_error_code_retryable;
///
/// assert!(is_error_code_retryable("Microsoft.Network/loadBalancers", "AnotherOperationInProgress"));
/// assert!(!is_error_code_retryable("Microsoft.KeyVault/vaults", "AnotherOperationInProgress"));
/// ```
pub fn is_error_code_retryable(resource_type: &str, code: &str) -> bool {
    let provider = ResourceType::new(resource_type).provider();
    taxonomy::is_retryable_for_provider(&provider, code)
}
