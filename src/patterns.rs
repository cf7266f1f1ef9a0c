//! Pattern recognizers over raw upstream error text.
//!
//! Each recognizer is a pure function of the message. The text formats matched
//! here are produced by the resource manager, the authentication library and
//! the node provisioning script; any change on their side is a breaking change
//! here.

use crate::taxonomy::{self, ArmErrorCode, Subcode, CONNECTIVITY_SUBCODES};
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of the identity platform's own error codes.
pub const AUTH_SERVICE_ERROR_PREFIX: &str = "AADSTS";

/// Markers identifying failures raised by the authentication library.
pub const AUTH_LIBRARY_MARKERS: &[&str] = &["adal: ", "azure.BearerAuthorizer#WithAuthorization"];

pub const CONTEXT_CANCELED_MARKER: &str = "context canceled";

pub const VM_EXTENSION_FAILURE_MARKER: &str =
    "VM has reported a failure when processing extension";

/// Extension names used by the service's own node provisioning.
pub const SERVICE_MANAGED_EXTENSION_MARKERS: &[&str] = &["vmssCSE", "cse-agent-"];

/// Log location quoted by failures of the Windows node provisioning script.
pub const WINDOWS_CSE_TROUBLESHOOTING_MARKER: &str = r"C:\AzureData\CustomDataSetupScript.log";

pub const VM_EXTENSION_HANDLER_NON_TRANSIENT_MARKER: &str = "VMExtensionHandlerNonTransientError";

static QUOTED_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Code="([a-zA-Z]+)""#).expect("quoted code regex must compile")
});

static JSON_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""code":\s*"([a-zA-Z]+)""#).expect("json code regex must compile")
});

static EXTENSION_EXIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"exit status=(\d+)").expect("extension exit regex must compile")
});

static VMSS_INSTANCE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"vmssInstanceErrorCode=([a-zA-Z]+)").expect("vmss instance regex must compile")
});

static AUTH_STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" StatusCode=(\d+) ").expect("auth status regex must compile")
});

static AUTH_STATUS_FALLBACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Status Code = '(\d+)'").expect("auth status fallback regex must compile")
});

static AUTH_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""error_description":"([a-zA-Z0-9]+):"#).expect("auth description regex must compile")
});

static EXTENSION_HANDLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Handler|VM extension type) '([^']+)'")
        .expect("extension handler regex must compile")
});

// `EOF` at the start or after a colon or space, closing either the text or a
// quoted error.
static EOF_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[:\s])EOF(?:['"]|\s*$)"#).expect("eof token regex must compile")
});

static DISK_ENCRYPTION_SET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)disk\s?encryption\s?set").expect("disk encryption set regex must compile")
});

static VM_SIZE_NOT_AVAILABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"The requested VM size \S+ is not available in the current region")
        .expect("vm size regex must compile")
});

// ============================================================================
// Code extraction
// ============================================================================

/// Every `Code="<alpha>"` occurrence, in order.
pub fn quoted_codes(message: &str) -> Vec<String> {
    QUOTED_CODE_RE
        .captures_iter(message)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every `"code": "<alpha>"` occurrence, in order.
pub fn json_codes(message: &str) -> Vec<String> {
    JSON_CODE_RE
        .captures_iter(message)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// First known client code contained anywhere in the message.
pub fn naive_client_code(message: &str) -> Option<ArmErrorCode> {
    taxonomy::known_client_codes()
        .iter()
        .find(|code| message.contains(code.as_str()))
        .cloned()
}

/// The client-error code carried by the message, if any.
///
/// Structured forms win over the naive scan; within the structured forms the
/// first occurrence that is a known client code is returned.
pub fn client_error_code(message: &str) -> Option<ArmErrorCode> {
    quoted_codes(message)
        .into_iter()
        .chain(json_codes(message))
        .find(|code| taxonomy::is_known_client_code(code))
        .map(ArmErrorCode::new)
        .or_else(|| naive_client_code(message))
}

/// First structured code of any kind, client or not.
pub fn first_structured_code(message: &str) -> Option<String> {
    quoted_codes(message)
        .into_iter()
        .chain(json_codes(message))
        .next()
}

/// Exit code from `exit status=<digits>`.
pub fn extension_exit_code(message: &str) -> Option<i32> {
    EXTENSION_EXIT_RE
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

/// Per-instance scale set failure from `vmssInstanceErrorCode=<alpha>`.
pub fn vmss_instance_error_code(message: &str) -> Option<String> {
    VMSS_INSTANCE_CODE_RE
        .captures(message)
        .map(|caps| caps[1].to_string())
}

// ============================================================================
// Authentication library
// ============================================================================

pub fn is_auth_library_error(message: &str) -> bool {
    AUTH_LIBRARY_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// HTTP status reported by the authentication library, `0` when absent.
pub fn auth_library_status(message: &str) -> u16 {
    let parse = |re: &Regex| -> u16 {
        re.captures(message)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0)
    };
    match parse(&AUTH_STATUS_RE) {
        0 => parse(&AUTH_STATUS_FALLBACK_RE),
        status => status,
    }
}

/// The identity platform's error token (`AADSTS…`) from an `error_description`.
pub fn auth_service_error_code(message: &str) -> Option<String> {
    AUTH_DESCRIPTION_RE
        .captures(message)
        .map(|caps| caps[1].to_string())
        .filter(|token| token.starts_with(AUTH_SERVICE_ERROR_PREFIX))
}

// ============================================================================
// Connectivity and cancelation
// ============================================================================

/// Subcode of the first connectivity keyword contained in the message.
pub fn connectivity_subcode(message: &str) -> Option<Subcode> {
    CONNECTIVITY_SUBCODES
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, subcode)| subcode.clone())
}

/// The transport reported an unexpected end of stream. The token may be
/// followed by the quote closing the authentication library's `Error = '...'`.
pub fn is_eof(message: &str) -> bool {
    EOF_TOKEN_RE.is_match(message)
}

pub fn is_context_canceled(message: &str) -> bool {
    message.contains(CONTEXT_CANCELED_MARKER)
}

// ============================================================================
// VM extensions
// ============================================================================

/// Whether the message describes a VM extension failure of any kind.
pub fn is_vm_extension_error(message: &str) -> bool {
    message.contains(VM_EXTENSION_FAILURE_MARKER)
        || message.contains(ArmErrorCode::VM_EXTENSION_PROVISIONING_ERROR.as_str())
        || message.contains(VM_EXTENSION_HANDLER_NON_TRANSIENT_MARKER)
}

/// A failing extension is customer-provided when the agent reported it and it
/// is not one of the service's own provisioning extensions.
pub fn is_customer_provided_extension_error(message: &str) -> bool {
    message.contains(VM_EXTENSION_FAILURE_MARKER)
        && !SERVICE_MANAGED_EXTENSION_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
}

pub fn is_windows_cse_error(message: &str) -> bool {
    message.contains(WINDOWS_CSE_TROUBLESHOOTING_MARKER)
}

pub fn is_handler_non_transient_error(message: &str) -> bool {
    message.contains(VM_EXTENSION_HANDLER_NON_TRANSIENT_MARKER)
}

/// Extension handler type named in `Handler '<type>'` or
/// `VM extension type '<type>'`.
pub fn extension_handler(message: &str) -> Option<String> {
    EXTENSION_HANDLER_RE
        .captures(message)
        .map(|caps| caps[1].to_string())
}

// ============================================================================
// Policy, encryption and parameter phrases
// ============================================================================

pub fn is_policy_disallowed(message: &str) -> bool {
    message.contains(ArmErrorCode::REQUEST_DISALLOWED_BY_POLICY.as_str())
        || message.contains("disallowed by policy")
}

/// Denials by the cluster's admission policy engine.
pub fn is_policy_violation(message: &str) -> bool {
    message.contains("PolicyViolation")
        || (message.contains("validation.gatekeeper.sh") && message.contains("denied the request"))
}

/// The disk encryption set cannot reach its key.
pub fn is_disk_encryption_set_access_denied(message: &str) -> bool {
    DISK_ENCRYPTION_SET_RE.is_match(message)
        && (message.contains("does not have")
            || message.contains("Forbidden")
            || message.contains("not authorized"))
}

pub fn is_vm_size_not_available(message: &str) -> bool {
    VM_SIZE_NOT_AVAILABLE_RE.is_match(message)
}
