//! The categorization pipeline.
//!
//! [`Classifier::handle_error`] turns any failure raised while driving the
//! resource manager into a [`CategorizedError`]. It never fails: the worst
//! case is `(InternalError, Unknown)` with the dependency inferred from the
//! message and `retriable = true`.
//!
//! Recognizers are applied in a fixed order and the first match decides the
//! category and subcode:
//!
//! 1. An [`ErrorBody`] (or a response wrapping one) passes through verbatim.
//! 2. Authentication library failures: EOF, cancelation, 5xx status, then the
//!    identity platform's `AADSTS` token. The token leaves the category open
//!    and falls through to the general rules, which keep it as subcode unless
//!    they find something more specific.
//! 3. General rules: EOF and cancelation, connectivity keywords (suppressed by
//!    VM extension markers), extension provenance, non-transient handler
//!    failures, HTTP status, client-error codes, extension exit codes, scale
//!    set instance codes, policy and disk encryption markers, and finally the
//!    SDK service error code.
//! 4. `(ClientError, InvalidParameter)` is demoted to `InternalError` unless
//!    the VM size is unavailable in the region: any other invalid parameter
//!    should have been caught by request validation.

use crate::categorized::{as_categorized_error, CategorizedError};
use crate::config::ClassifierConfig;
use crate::context::RequestContext;
use crate::error::{chain, chain_message, find_in_chain, BoxError, CategorizerResult};
use crate::logging::{log_debug, log_warn};
use crate::patterns;
use crate::response::ErrorBody;
use crate::retry;
use crate::sdk::{RequestError, ResponseInfo, ServiceError};
use crate::taxonomy::{Category, Dependency, ErrorCode, Subcode, VmExtensionErrorCode};
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::io;
use std::sync::Arc;

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Category and subcode decided for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decision {
    category: Option<Category>,
    subcode: Subcode,
}

impl Decision {
    fn new(category: Category, subcode: Subcode) -> Self {
        Self {
            category: Some(category),
            subcode,
        }
    }

    fn internal(subcode: Subcode) -> Self {
        Self::new(Category::InternalError, subcode)
    }

    fn client(subcode: Subcode) -> Self {
        Self::new(Category::ClientError, subcode)
    }

    fn undecided(subcode: Subcode) -> Self {
        Self {
            category: None,
            subcode,
        }
    }
}

/// Stateless categorization engine. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Build a classifier from a validated configuration.
    pub fn new(config: ClassifierConfig) -> CategorizerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Categorize a failure.
    ///
    /// `resp` is the HTTP response the failure came with, if any. A failure
    /// that already is (or wraps) a [`CategorizedError`] keeps its
    /// categorization; only a blank team is filled from `ctx`.
    pub fn handle_error(
        &self,
        ctx: &RequestContext,
        resp: Option<&ResponseInfo>,
        err: impl Into<BoxError>,
    ) -> CategorizedError {
        let err: BoxError = err.into();
        if let Some(existing) = as_categorized_error(&*err) {
            let mut categorized = existing.clone();
            if categorized.aks_team.is_empty() {
                categorized.aks_team = ctx.aks_team.clone();
            }
            return categorized;
        }

        let origin: Arc<dyn StdError + Send + Sync + 'static> = Arc::from(err);
        let source: &(dyn StdError + 'static) = &*origin;
        let message = chain_message(source);

        let dependency = if patterns::is_auth_library_error(&message) {
            Dependency::ADAL
        } else {
            Dependency::ARM
        };
        let decision = self.decide(resp, source, &message, &dependency);

        let categorized = retry::set_retriable_based_on_categorized_error(CategorizedError {
            category: decision.category,
            subcode: decision.subcode,
            dependency,
            origin_error: Some(Arc::clone(&origin)),
            retriable: None,
            aks_team: ctx.aks_team.clone(),
        });

        if self.config.log_decisions {
            log_debug!(
                category = categorized.category().map(|c| c.as_str()).unwrap_or_default(),
                subcode = %categorized.subcode(),
                dependency = %categorized.dependency(),
                retriable = categorized.is_retriable(),
                aks_team = %ctx.aks_team,
                operation_id = ctx.operation_id.as_deref().unwrap_or_default(),
                "Categorized error"
            );
        }
        categorized
    }

    /// Categorize a failure down to `(category, code, message)`.
    ///
    /// The code is the categorized subcode; the message is the full text of
    /// the failure's chain.
    pub fn parse_raw_error(&self, err: &(dyn StdError + 'static)) -> (Option<Category>, ErrorCode, String) {
        if let Some(body) = find_in_chain::<ErrorBody>(err) {
            return (body.category, body.code.clone(), body.message.clone());
        }
        if let Some(categorized) = as_categorized_error(err) {
            return (
                categorized.category(),
                ErrorCode::from(categorized.subcode().clone()),
                chain_message(err),
            );
        }

        let message = chain_message(err);
        let dependency = if patterns::is_auth_library_error(&message) {
            Dependency::ADAL
        } else {
            Dependency::ARM
        };
        let decision = self.decide(None, err, &message, &dependency);
        (decision.category, ErrorCode::from(decision.subcode), message)
    }

    fn decide(
        &self,
        resp: Option<&ResponseInfo>,
        err: &(dyn StdError + 'static),
        message: &str,
        dependency: &Dependency,
    ) -> Decision {
        if let Some(body) = find_in_chain::<ErrorBody>(err) {
            return Decision {
                category: body.category,
                subcode: Subcode::from(body.code.clone()),
            };
        }

        let mut pending = None;
        if *dependency == Dependency::ADAL {
            let decision = self.decide_auth_library(err, message);
            if decision.category.is_some() {
                return decision;
            }
            pending = Some(decision.subcode).filter(Subcode::is_specific);
        }

        let mut decision = self.decide_general(resp, err, message);
        if let Some(subcode) = pending {
            if !decision.subcode.is_specific() {
                decision.subcode = subcode;
            }
        }
        override_invalid_parameter(decision, message)
    }

    fn decide_auth_library(&self, err: &(dyn StdError + 'static), message: &str) -> Decision {
        if is_eof(err, message) {
            return Decision::internal(Subcode::EOF);
        }
        if patterns::is_context_canceled(message) {
            return Decision::internal(Subcode::CONTEXT_CANCELED);
        }

        let status = patterns::auth_library_status(message);
        if status >= 500 {
            let subcode = StatusCode::from_u16(status)
                .map(Subcode::from_http_status)
                .unwrap_or_else(|_| Subcode::new(status.to_string()));
            return Decision::internal(subcode);
        }

        match patterns::auth_service_error_code(message) {
            Some(token) => {
                log_warn!(
                    auth_error = %token,
                    status = status,
                    "Authentication library reported an identity platform error"
                );
                Decision::undecided(Subcode::new(token))
            }
            None => Decision::undecided(Subcode::UNKNOWN),
        }
    }

    fn decide_general(
        &self,
        resp: Option<&ResponseInfo>,
        err: &(dyn StdError + 'static),
        message: &str,
    ) -> Decision {
        if is_eof(err, message) {
            return Decision::internal(Subcode::EOF);
        }
        if patterns::is_context_canceled(message) {
            return Decision::internal(Subcode::CONTEXT_CANCELED);
        }

        let extension_error = patterns::is_vm_extension_error(message);
        if !extension_error {
            if let Some(subcode) = patterns::connectivity_subcode(message) {
                return Decision::internal(subcode);
            }
        } else if patterns::is_customer_provided_extension_error(message) {
            return Decision::client(Subcode::VM_EXTENSION_PROVISIONING_ERROR);
        } else if patterns::is_windows_cse_error(message) {
            return Decision::internal(Subcode::VM_EXTENSION_PROVISIONING_ERROR_WINDOWS);
        }

        if patterns::is_handler_non_transient_error(message) {
            return self.decide_handler_non_transient(message);
        }

        if let Some(resp) = resp {
            if let Some(decision) = decide_http_status(resp, err) {
                return decision;
            }
        }

        if let Some(code) = patterns::client_error_code(message) {
            return Decision::client(Subcode::from(code));
        }
        if let Some(exit_code) = patterns::extension_exit_code(message) {
            return decide_extension_exit(exit_code);
        }
        if let Some(code) = patterns::vmss_instance_error_code(message) {
            return Decision::internal(Subcode::new(code));
        }
        if patterns::is_policy_disallowed(message) {
            return Decision::client(Subcode::REQUEST_DISALLOWED_BY_POLICY);
        }
        if patterns::is_policy_violation(message) {
            return Decision::client(Subcode::POLICY_VIOLATION);
        }
        if patterns::is_disk_encryption_set_access_denied(message) {
            return Decision::client(Subcode::DISK_ENCRYPTION_SET_ACCESS_DENIED);
        }

        if let Some(code) = service_error_code(err) {
            return Decision::internal(Subcode::new(code));
        }
        match patterns::first_structured_code(message) {
            Some(code) => Decision::internal(Subcode::new(code)),
            None => Decision::internal(Subcode::UNKNOWN),
        }
    }

    fn decide_handler_non_transient(&self, message: &str) -> Decision {
        let handler = patterns::extension_handler(message).unwrap_or_default();
        if self.config.is_linux_handler(&handler) {
            Decision::internal(Subcode::VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR)
        } else if self.config.is_windows_handler(&handler) {
            Decision::internal(Subcode::VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR_WINDOWS)
        } else {
            Decision::client(Subcode::VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR)
        }
    }
}

/// 5xx is ours, 4xx is the caller's. The SDK's own code, when present, is a
/// better subcode than the reason phrase.
fn decide_http_status(resp: &ResponseInfo, err: &(dyn StdError + 'static)) -> Option<Decision> {
    let category = if resp.status.is_server_error() {
        Category::InternalError
    } else if resp.status.is_client_error() {
        Category::ClientError
    } else {
        return None;
    };
    let subcode = service_error_code(err)
        .map(Subcode::new)
        .unwrap_or_else(|| Subcode::from_http_status(resp.status));
    Some(Decision::new(category, subcode))
}

fn decide_extension_exit(exit_code: i32) -> Decision {
    match VmExtensionErrorCode::from_exit_code(exit_code) {
        Some(code) if code.is_client_side() => Decision::client(Subcode::from(code)),
        Some(code) => Decision::internal(Subcode::from(code)),
        None => Decision::internal(Subcode::VM_EXTENSION_PROVISIONING_ERROR),
    }
}

fn override_invalid_parameter(decision: Decision, message: &str) -> Decision {
    if decision.category == Some(Category::ClientError)
        && decision.subcode == Subcode::INVALID_PARAMETER
        && !patterns::is_vm_size_not_available(message)
    {
        return Decision::internal(decision.subcode);
    }
    decision
}

/// Typed service error code from the chain, joined with its first detail.
fn service_error_code(err: &(dyn StdError + 'static)) -> Option<String> {
    if let Some(service_error) = find_in_chain::<ServiceError>(err) {
        return service_error.combined_code();
    }
    find_in_chain::<RequestError>(err)
        .and_then(|request_error| request_error.service_error.as_ref())
        .and_then(ServiceError::combined_code)
}

fn is_eof(err: &(dyn StdError + 'static), message: &str) -> bool {
    patterns::is_eof(message)
        || chain(err).any(|current| {
            current
                .downcast_ref::<io::Error>()
                .is_some_and(|io_err| io_err.kind() == io::ErrorKind::UnexpectedEof)
        })
}

/// Categorize a failure with the default classifier.
///
/// ```rust
/// use aks_errors::{handle_error_to_categorized_error, Category, RequestContext};
///
/// let err = handle_error_to_categorized_error(
///     &RequestContext::default(),
///     None,
///     r#"Code="PublicIPCountLimitReached" Message="Cannot create more than 10 public IP addresses""#,
/// );
/// assert_eq!(err.category(), Some(Category::ClientError));
/// assert_eq!(err.retriable(), Some(false));
/// ```
pub fn handle_error_to_categorized_error(
    ctx: &RequestContext,
    resp: Option<&ResponseInfo>,
    err: impl Into<BoxError>,
) -> CategorizedError {
    DEFAULT_CLASSIFIER.handle_error(ctx, resp, err)
}

/// `(category, code, message)` of a failure, using the default classifier.
pub fn parse_raw_error(err: &(dyn StdError + 'static)) -> (Option<Category>, ErrorCode, String) {
    DEFAULT_CLASSIFIER.parse_raw_error(err)
}
