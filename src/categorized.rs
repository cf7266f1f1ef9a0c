//! The internal, categorized error envelope.
//!
//! A [`CategorizedError`] wraps the original failure together with the
//! attribution decided for it: who is at fault ([`Category`]), what exactly
//! went wrong ([`Subcode`]), which collaborator is implicated ([`Dependency`]),
//! whether a retry may help, and which team owns the failing code path.
//!
//! Call sites enrich a freshly built value with the consuming `with_*`
//! builders before letting it escape:
//!
//! ```rust
//! use aks_errors::{handle_error_to_categorized_error, Dependency, RequestContext};
//!
//! let ctx = RequestContext::new().with_aks_team("node-provisioning");
//! let err = handle_error_to_categorized_error(&ctx, None, "dial tcp 10.0.0.4:443: i/o timeout")
//!     .with_dependency_if_not_adal(Dependency::KUBERNETES_API_SERVER);
//! assert_eq!(err.subcode().as_str(), "IOTimedout");
//! assert_eq!(err.dependency(), &Dependency::KUBERNETES_API_SERVER);
//! ```

use crate::error::{chain, find_in_chain, BoxError};
use crate::response::{ErrorBody, ErrorResponse};
use crate::sdk::{KubeStatus, KubeStatusError};
use crate::taxonomy::{AksTeam, Category, Dependency, ErrorCode, Subcode};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared handle to the failure a [`CategorizedError`] was built from.
pub type OriginError = Arc<dyn StdError + Send + Sync + 'static>;

/// A failure with its attribution attached.
#[derive(Debug, Clone, Default)]
pub struct CategorizedError {
    pub(crate) category: Option<Category>,
    pub(crate) subcode: Subcode,
    pub(crate) dependency: Dependency,
    pub(crate) origin_error: Option<OriginError>,
    pub(crate) retriable: Option<bool>,
    pub(crate) aks_team: AksTeam,
}

impl CategorizedError {
    pub fn new(
        category: Category,
        subcode: Subcode,
        dependency: Dependency,
        origin_error: impl Into<BoxError>,
    ) -> Self {
        let origin: BoxError = origin_error.into();
        Self {
            category: Some(category),
            subcode,
            dependency,
            origin_error: Some(Arc::from(origin)),
            retriable: None,
            aks_team: AksTeam::default(),
        }
    }

    /// Wrap a failure without categorizing it.
    pub fn from_origin(origin_error: impl Into<BoxError>) -> Self {
        let origin: BoxError = origin_error.into();
        Self {
            origin_error: Some(Arc::from(origin)),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_subcode(mut self, subcode: Subcode) -> Self {
        self.subcode = subcode;
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependency = dependency;
        self
    }

    /// Override the dependency unless the authentication library was already
    /// blamed; token acquisition failures keep their attribution wherever they
    /// surface.
    pub fn with_dependency_if_not_adal(mut self, dependency: Dependency) -> Self {
        if self.dependency != Dependency::ADAL {
            self.dependency = dependency;
        }
        self
    }

    pub fn with_retriable(mut self, retriable: bool) -> Self {
        self.retriable = Some(retriable);
        self
    }

    pub fn with_aks_team(mut self, aks_team: AksTeam) -> Self {
        self.aks_team = aks_team;
        self
    }

    /// `None` when the failure has not been categorized.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn subcode(&self) -> &Subcode {
        &self.subcode
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    /// `None` until the retry advisor or a call site decides.
    pub fn retriable(&self) -> Option<bool> {
        self.retriable
    }

    pub fn aks_team(&self) -> &AksTeam {
        &self.aks_team
    }

    pub fn origin_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.origin_error.as_deref()
    }

    pub fn is_client_error(&self) -> bool {
        self.category == Some(Category::ClientError)
    }

    /// Undetermined counts as not retriable.
    pub fn is_retriable(&self) -> bool {
        self.retriable.unwrap_or(false)
    }

    /// The RPC status of the wrapped failure.
    ///
    /// Forwards the status of the first [`tonic::Status`] (or nested
    /// categorized error) in the origin's chain. Otherwise `Ok` when there is
    /// no origin and `Unknown` with the origin's message when there is.
    pub fn grpc_status(&self) -> tonic::Status {
        let Some(origin) = self.origin_error.as_deref() else {
            return tonic::Status::new(tonic::Code::Ok, "");
        };
        let origin: &(dyn StdError + 'static) = origin;
        for current in chain(origin) {
            if let Some(status) = current.downcast_ref::<tonic::Status>() {
                return status.clone();
            }
            if let Some(inner) = current.downcast_ref::<CategorizedError>() {
                return inner.grpc_status();
            }
        }
        tonic::Status::new(tonic::Code::Unknown, origin.to_string())
    }

    /// The Kubernetes status of the wrapped failure.
    ///
    /// Forwards the first [`KubeStatusError`] in the origin's chain, otherwise
    /// reports reason `Unknown` with the origin's message.
    pub fn kube_status(&self) -> KubeStatus {
        let Some(origin) = self.origin_error.as_deref() else {
            return KubeStatus::unknown("");
        };
        let origin: &(dyn StdError + 'static) = origin;
        for current in chain(origin) {
            if let Some(kube) = current.downcast_ref::<KubeStatusError>() {
                return kube.status.clone();
            }
            if let Some(inner) = current.downcast_ref::<CategorizedError>() {
                return inner.kube_status();
            }
        }
        KubeStatus::unknown(origin.to_string())
    }

    /// Materialize the wire response for API callers. The formatted summary
    /// of this error becomes the response's inner message.
    pub fn to_api_error_response(&self, code: ErrorCode, message: impl Into<String>) -> ErrorResponse {
        ErrorResponse::from(ErrorBody {
            code,
            message: message.into(),
            category: self.category,
            subcode: self.subcode.clone(),
            inner_message: self.to_string(),
            ..ErrorBody::default()
        })
    }
}

impl fmt::Display for CategorizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.map(|c| c.as_str()).unwrap_or_default();
        let origin = self
            .origin_error
            .as_ref()
            .map(|origin| origin.to_string())
            .unwrap_or_default();
        write!(
            f,
            "Category: {category}; SubCode: {}; Dependency: {}; OrginalError: {origin}; AKSTeam: {}",
            self.subcode, self.dependency, self.aks_team
        )?;
        if let Some(retriable) = self.retriable {
            write!(f, "; Retriable: {retriable}")?;
        }
        Ok(())
    }
}

impl StdError for CategorizedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.origin_error
            .as_deref()
            .map(|origin| origin as &(dyn StdError + 'static))
    }
}

impl PartialEq for CategorizedError {
    fn eq(&self, other: &Self) -> bool {
        let same_origin = match (&self.origin_error, &other.origin_error) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.to_string() == b.to_string(),
            _ => false,
        };
        same_origin
            && self.category == other.category
            && self.subcode == other.subcode
            && self.dependency == other.dependency
            && self.retriable == other.retriable
            && self.aks_team == other.aks_team
    }
}

/// Find a categorized error in a failure's chain.
pub fn as_categorized_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a CategorizedError> {
    find_in_chain::<CategorizedError>(err)
}

/// Return the categorized error a failure is or wraps, or wrap it fresh with
/// nothing but the origin set.
pub fn to_categorized_error(err: impl Into<BoxError>) -> CategorizedError {
    let err: BoxError = err.into();
    match err.downcast::<CategorizedError>() {
        Ok(categorized) => *categorized,
        Err(err) => match as_categorized_error(&*err) {
            Some(categorized) => categorized.clone(),
            None => CategorizedError {
                origin_error: Some(Arc::from(err)),
                ..CategorizedError::default()
            },
        },
    }
}
