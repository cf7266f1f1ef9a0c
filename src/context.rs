//! Request-scoped values consulted during categorization.

use crate::taxonomy::AksTeam;
use serde::{Deserialize, Serialize};

/// Values the caller's request carries into every categorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Team that owns the code path the failure was raised in.
    #[serde(default)]
    pub aks_team: AksTeam,
    /// Operation identifier, recorded on decision logs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aks_team(mut self, aks_team: impl Into<AksTeam>) -> Self {
        self.aks_team = aks_team.into();
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }
}
