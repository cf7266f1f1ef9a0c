//! Identifiers and lookup tables shared by every stage of error categorization.
//!
//! Codes, subcodes, resource types and dependency tags are open newtypes over
//! strings: new values can be introduced by callers without a release of this
//! crate, and the associated constants below are the values the categorization
//! engine itself knows about. [`Category`] is the only closed set.
//!
//! The tables at the bottom of this module are part of the public contract.
//! Entries may be added but must never be removed or moved between rows.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ============================================================================
// Identifier newtypes
// ============================================================================

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Wrap a string literal without allocating.
            pub const fn from_static(value: &'static str) -> Self {
                Self(Cow::Borrowed(value))
            }

            pub fn new(value: impl Into<String>) -> Self {
                Self(Cow::Owned(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Binary fault attribution.
///
/// `ClientError` means the caller or its configuration is at fault: the
/// failure must not be retried and does not count against the service SLO.
/// `InternalError` means the service or one of its dependencies is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    ClientError,
    InternalError,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientError => "ClientError",
            Self::InternalError => "InternalError",
        }
    }

    /// HTTP status class signalled to API callers for this category.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ClientError => 400,
            Self::InternalError => 500,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_identifier!(
    /// Stable, wire-visible identifier for a class of failure.
    ErrorCode
);

string_identifier!(
    /// Internal-only refinement of an [`ErrorCode`]; the primary telemetry key.
    Subcode
);

string_identifier!(
    /// A code emitted by the resource manager or one of its resource providers.
    ArmErrorCode
);

string_identifier!(
    /// Fully qualified resource type, `Provider/Kind[/SubKind]`.
    ResourceType
);

string_identifier!(
    /// Leftmost segment of a [`ResourceType`].
    ResourceProvider
);

string_identifier!(
    /// The collaborator blamed for a failure. Routes alerts.
    Dependency
);

string_identifier!(
    /// Owning team carried from the request context.
    AksTeam
);

string_identifier!(
    /// Symbolic reason behind a VM extension exit code.
    VmExtensionErrorCode
);

// ============================================================================
// Error codes
// ============================================================================

impl ErrorCode {
    // Parameter validation
    pub const INVALID_PARAMETER: Self = Self::from_static("InvalidParameter");
    pub const MISSING_PARAMETER: Self = Self::from_static("MissingParameter");
    pub const INVALID_REQUEST_CONTENT: Self = Self::from_static("InvalidRequestContent");
    pub const INVALID_LOCATION: Self = Self::from_static("InvalidLocation");
    pub const INVALID_API_VERSION: Self = Self::from_static("InvalidAPIVersion");
    pub const INVALID_DNS_PREFIX: Self = Self::from_static("InvalidDNSPrefix");
    pub const INVALID_SERVICE_PRINCIPAL_PROFILE: Self =
        Self::from_static("InvalidServicePrincipalProfile");
    pub const INVALID_LINUX_PROFILE: Self = Self::from_static("InvalidLinuxProfile");
    pub const INVALID_WINDOWS_PROFILE: Self = Self::from_static("InvalidWindowsProfile");
    pub const INVALID_AGENT_POOL_PROFILE: Self = Self::from_static("InvalidAgentPoolProfile");
    pub const INVALID_KUBERNETES_VERSION: Self = Self::from_static("InvalidKubernetesVersion");
    pub const INVALID_ORCHESTRATOR_VERSION: Self = Self::from_static("InvalidOrchestratorVersion");
    pub const INVALID_NETWORK_PROFILE: Self = Self::from_static("InvalidNetworkProfile");
    pub const INVALID_ADDON_PROFILE: Self = Self::from_static("InvalidAddonProfile");
    pub const INVALID_IDENTITY: Self = Self::from_static("InvalidIdentity");
    pub const INVALID_TAGS: Self = Self::from_static("InvalidTags");
    pub const PROPERTY_CHANGE_NOT_ALLOWED: Self = Self::from_static("PropertyChangeNotAllowed");
    pub const NOT_SUPPORTED: Self = Self::from_static("NotSupported");

    // Quota and capacity
    pub const QUOTA_EXCEEDED: Self = Self::from_static("QuotaExceeded");
    pub const SKU_NOT_AVAILABLE: Self = Self::from_static("SkuNotAvailable");
    pub const ALLOCATION_FAILED: Self = Self::from_static("AllocationFailed");
    pub const ZONAL_ALLOCATION_FAILED: Self = Self::from_static("ZonalAllocationFailed");
    pub const OVERCONSTRAINED_ALLOCATION_REQUEST: Self =
        Self::from_static("OverconstrainedAllocationRequest");
    pub const PUBLIC_IP_COUNT_LIMIT_REACHED: Self = Self::from_static("PublicIPCountLimitReached");
    pub const INSUFFICIENT_SUBNET_SIZE: Self = Self::from_static("InsufficientSubnetSize");
    pub const SUBNET_IS_FULL: Self = Self::from_static("SubnetIsFull");
    pub const ROLE_ASSIGNMENT_LIMIT_EXCEEDED: Self = Self::from_static("RoleAssignmentLimitExceeded");
    pub const SUBSCRIPTION_REQUESTS_THROTTLED: Self =
        Self::from_static("SubscriptionRequestsThrottled");

    // Networking topology
    pub const SUBNET_NOT_FOUND: Self = Self::from_static("SubnetNotFound");
    pub const VNET_NOT_FOUND: Self = Self::from_static("VirtualNetworkNotFound");
    pub const IN_USE_SUBNET_CANNOT_BE_DELETED: Self = Self::from_static("InUseSubnetCannotBeDeleted");
    pub const PRIVATE_IP_ADDRESS_IN_RESERVED_RANGE: Self =
        Self::from_static("PrivateIPAddressInReservedRange");
    pub const PUBLIC_IP_AND_LB_SKU_DO_NOT_MATCH: Self = Self::from_static("PublicIPAndLBSkuDoNotMatch");
    pub const OUTBOUND_CONN_FAIL: Self = Self::from_static("OutboundConnFail");
    pub const DNS_LOOKUP_FAIL: Self = Self::from_static("DNSLookupFail");
    pub const PRIVATE_DNS_ZONE_INVALID: Self = Self::from_static("PrivateDNSZoneInvalid");
    pub const ROUTE_TABLE_INVALID: Self = Self::from_static("RouteTableInvalid");
    pub const NSG_INVALID: Self = Self::from_static("NetworkSecurityGroupInvalid");

    // Cluster lifecycle
    pub const CREATE_CLUSTER_FAILED: Self = Self::from_static("CreateClusterFailed");
    pub const UPGRADE_FAILED: Self = Self::from_static("UpgradeFailed");
    pub const SCALE_FAILED: Self = Self::from_static("ScaleFailed");
    pub const DELETE_FAILED: Self = Self::from_static("DeleteFailed");
    pub const START_FAILED: Self = Self::from_static("StartFailed");
    pub const STOP_FAILED: Self = Self::from_static("StopFailed");
    pub const RECONCILE_FAILED: Self = Self::from_static("ReconcileFailed");
    pub const CLUSTER_STOPPED: Self = Self::from_static("ClusterStopped");
    pub const OPERATION_NOT_ALLOWED: Self = Self::from_static("OperationNotAllowed");
    pub const ETAG_MISMATCH: Self = Self::from_static("EtagMismatch");
    pub const CONFLICT: Self = Self::from_static("Conflict");
    pub const NOT_FOUND: Self = Self::from_static("NotFound");
    pub const RESOURCE_GROUP_NOT_FOUND: Self = Self::from_static("ResourceGroupNotFound");
    pub const RESOURCE_GROUP_BEING_DELETED: Self = Self::from_static("ResourceGroupBeingDeleted");
    pub const NODE_RESOURCE_GROUP_LOCKED: Self = Self::from_static("NodeResourceGroupLocked");
    pub const DEPLOYMENT_FAILED: Self = Self::from_static("DeploymentFailed");
    pub const VM_EXTENSION_PROVISIONING_ERROR: Self =
        Self::from_static("VMExtensionProvisioningError");
    pub const VMSS_INSTANCE_ERROR: Self = Self::from_static("VMSSInstanceError");
    pub const KUBE_API_SERVER_UNREACHABLE: Self = Self::from_static("KubeAPIServerUnreachable");
    pub const NODE_NOT_READY: Self = Self::from_static("NodeNotReady");
    pub const DRAIN_FAILED: Self = Self::from_static("DrainFailed");
    pub const POD_DISRUPTION_BUDGET_BLOCKED: Self = Self::from_static("PodDisruptionBudgetBlocked");

    // Add-on configuration
    pub const ADDON_CONFIG_INVALID: Self = Self::from_static("AddonConfigInvalid");
    pub const MONITORING_ADDON_WORKSPACE_INVALID: Self =
        Self::from_static("MonitoringAddonWorkspaceInvalid");
    pub const INGRESS_APP_GW_INVALID: Self = Self::from_static("IngressApplicationGatewayInvalid");
    pub const AZURE_POLICY_ADDON_FAILED: Self = Self::from_static("AzurePolicyAddonFailed");
    pub const KEY_VAULT_SECRETS_PROVIDER_INVALID: Self =
        Self::from_static("KeyVaultSecretsProviderInvalid");

    // Identity and role assignment
    pub const AUTHORIZATION_FAILED: Self = Self::from_static("AuthorizationFailed");
    pub const LINKED_AUTHORIZATION_FAILED: Self = Self::from_static("LinkedAuthorizationFailed");
    pub const SERVICE_PRINCIPAL_NOT_FOUND: Self = Self::from_static("ServicePrincipalNotFound");
    pub const INVALID_CLIENT_SECRET: Self = Self::from_static("InvalidClientSecret");
    pub const IDENTITY_NOT_FOUND: Self = Self::from_static("IdentityNotFound");
    pub const ROLE_ASSIGNMENT_FAILED: Self = Self::from_static("RoleAssignmentFailed");
    pub const PRINCIPAL_NOT_FOUND: Self = Self::from_static("PrincipalNotFound");
    pub const KEY_VAULT_ACCESS_FORBIDDEN: Self = Self::from_static("KeyVaultAccessForbidden");
    pub const DISK_ENCRYPTION_SET_ACCESS_DENIED: Self =
        Self::from_static("DiskEncryptionSetAccessDenied");

    // Policy and subscription state
    pub const REQUEST_DISALLOWED_BY_POLICY: Self = Self::from_static("RequestDisallowedByPolicy");
    pub const POLICY_VIOLATION: Self = Self::from_static("PolicyViolation");
    pub const SCOPE_LOCKED: Self = Self::from_static("ScopeLocked");
    pub const SUBSCRIPTION_NOT_REGISTERED: Self = Self::from_static("SubscriptionNotRegistered");
    pub const SUBSCRIPTION_DISABLED: Self = Self::from_static("SubscriptionDisabled");

    // Service side
    pub const INTERNAL_OPERATION_ERROR: Self = Self::from_static("InternalOperationError");
    pub const UNKNOWN: Self = Self::from_static("Unknown");
}

// ============================================================================
// Subcodes
// ============================================================================

impl Subcode {
    pub const UNKNOWN: Self = Self::from_static("Unknown");
    pub const EOF: Self = Self::from_static("EOF");
    pub const CONTEXT_CANCELED: Self = Self::from_static("ContextCanceled");

    // Connectivity
    pub const CONNECTION_REFUSED: Self = Self::from_static("ConnectionRefused");
    pub const CONNECTION_RESET_BY_PEER: Self = Self::from_static("ConnectionResetByPeer");
    pub const IO_TIMEDOUT: Self = Self::from_static("IOTimedout");
    pub const TLS_HANDSHAKE_TIMEDOUT: Self = Self::from_static("TLSHandshakeTimedout");
    pub const LOOKUP_NO_SUCH_HOST: Self = Self::from_static("LookupNoSuchHost");
    pub const LOOKUP_SERVER_MISBEHAVING: Self = Self::from_static("LookupServerMisbehaving");
    pub const CLIENT_TIMEOUT_EXCEEDED: Self = Self::from_static("ClientTimeoutExceeded");
    pub const CONTEXT_DEADLINE_EXCEEDED: Self = Self::from_static("ContextDeadlineExceeded");
    pub const NETWORK_UNREACHABLE: Self = Self::from_static("NetworkUnreachable");
    pub const CLOSED_NETWORK_CONNECTION: Self = Self::from_static("UseOfClosedNetworkConnection");
    pub const HTTP2_GOAWAY: Self = Self::from_static("HTTP2GoAway");

    // VM extensions
    pub const VM_EXTENSION_PROVISIONING_ERROR: Self =
        Self::from_static("VMExtensionProvisioningError");
    pub const VM_EXTENSION_PROVISIONING_ERROR_WINDOWS: Self =
        Self::from_static("VMExtensionProvisioningError_Windows");
    pub const VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR: Self =
        Self::from_static("VMExtensionHandlerNonTransientError");
    pub const VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR_WINDOWS: Self =
        Self::from_static("VMExtensionHandlerNonTransientError_Windows");

    // Pattern families
    pub const INVALID_PARAMETER: Self = Self::from_static("InvalidParameter");
    pub const REQUEST_DISALLOWED_BY_POLICY: Self = Self::from_static("RequestDisallowedByPolicy");
    pub const POLICY_VIOLATION: Self = Self::from_static("PolicyViolation");
    pub const DISK_ENCRYPTION_SET_ACCESS_DENIED: Self =
        Self::from_static("DiskEncryptionSetAccessDenied");

    /// Subcode derived from an HTTP status: the canonical reason phrase with
    /// spaces removed (`503` becomes `ServiceUnavailable`).
    pub fn from_http_status(status: reqwest::StatusCode) -> Self {
        match status.canonical_reason() {
            Some(reason) => Self::new(reason.replace(' ', "")),
            None => Self::new(status.as_u16().to_string()),
        }
    }

    /// Whether this subcode carries more information than [`Subcode::UNKNOWN`].
    pub fn is_specific(&self) -> bool {
        !self.is_empty() && *self != Self::UNKNOWN
    }
}

impl From<ArmErrorCode> for Subcode {
    fn from(code: ArmErrorCode) -> Self {
        Self(code.0)
    }
}

impl From<ErrorCode> for Subcode {
    fn from(code: ErrorCode) -> Self {
        Self(code.0)
    }
}

impl From<VmExtensionErrorCode> for Subcode {
    fn from(code: VmExtensionErrorCode) -> Self {
        Self(code.0)
    }
}

impl From<Subcode> for ErrorCode {
    fn from(code: Subcode) -> Self {
        Self(code.0)
    }
}

impl From<ArmErrorCode> for ErrorCode {
    fn from(code: ArmErrorCode) -> Self {
        Self(code.0)
    }
}

// ============================================================================
// Resource manager codes
// ============================================================================

impl ArmErrorCode {
    /// Generic wrapper the deployment service puts around the real failure.
    pub const RESOURCE_DEPLOYMENT_FAILURE: Self = Self::from_static("ResourceDeploymentFailure");
    pub const DEPLOYMENT_FAILED: Self = Self::from_static("DeploymentFailed");
    /// Wrapper code for VM extension failures.
    pub const VM_EXTENSION_PROVISIONING_ERROR: Self =
        Self::from_static("VMExtensionProvisioningError");
    pub const VM_EXTENSION_HANDLER_NON_TRANSIENT_ERROR: Self =
        Self::from_static("VMExtensionHandlerNonTransientError");

    // Subscription, authorization and policy
    pub const AUTHORIZATION_FAILED: Self = Self::from_static("AuthorizationFailed");
    pub const LINKED_AUTHORIZATION_FAILED: Self = Self::from_static("LinkedAuthorizationFailed");
    pub const REQUEST_DISALLOWED_BY_POLICY: Self = Self::from_static("RequestDisallowedByPolicy");
    pub const SCOPE_LOCKED: Self = Self::from_static("ScopeLocked");
    pub const SUBSCRIPTION_NOT_REGISTERED: Self = Self::from_static("SubscriptionNotRegistered");
    pub const MISSING_SUBSCRIPTION_REGISTRATION: Self =
        Self::from_static("MissingSubscriptionRegistration");
    pub const READ_ONLY_DISABLED_SUBSCRIPTION: Self =
        Self::from_static("ReadOnlyDisabledSubscription");
    pub const DISALLOWED_OPERATION: Self = Self::from_static("DisallowedOperation");
    pub const RESOURCE_GROUP_BEING_DELETED: Self = Self::from_static("ResourceGroupBeingDeleted");
    pub const INVALID_RESOURCE_GROUP_LOCATION: Self =
        Self::from_static("InvalidResourceGroupLocation");
    pub const QUOTA_EXCEEDED: Self = Self::from_static("QuotaExceeded");
    pub const OPERATION_NOT_ALLOWED: Self = Self::from_static("OperationNotAllowed");
    pub const INVALID_PARAMETER: Self = Self::from_static("InvalidParameter");

    // Compute
    pub const SKU_NOT_AVAILABLE: Self = Self::from_static("SkuNotAvailable");
    pub const ALLOCATION_FAILED: Self = Self::from_static("AllocationFailed");
    pub const ZONAL_ALLOCATION_FAILED: Self = Self::from_static("ZonalAllocationFailed");
    pub const OVERCONSTRAINED_ALLOCATION_REQUEST: Self =
        Self::from_static("OverconstrainedAllocationRequest");
    pub const OVERCONSTRAINED_ZONAL_ALLOCATION_REQUEST: Self =
        Self::from_static("OverconstrainedZonalAllocationRequest");
    pub const GALLERY_IMAGE_NOT_FOUND: Self = Self::from_static("GalleryImageNotFound");
    pub const INTERNAL_EXECUTION_ERROR: Self = Self::from_static("InternalExecutionError");
    pub const OPERATION_PREEMPTED: Self = Self::from_static("OperationPreempted");
    pub const KEY_VAULT_ACCESS_FORBIDDEN: Self = Self::from_static("KeyVaultAccessForbidden");
    pub const DISK_ENCRYPTION_SET_DOES_NOT_EXIST: Self =
        Self::from_static("DiskEncryptionSetDoesNotExist");

    // Network
    pub const PUBLIC_IP_COUNT_LIMIT_REACHED: Self = Self::from_static("PublicIPCountLimitReached");
    pub const STANDARD_SKU_PUBLIC_IP_COUNT_LIMIT_REACHED: Self =
        Self::from_static("StandardSkuPublicIPCountLimitReached");
    pub const PUBLIC_IP_AND_LB_SKU_DO_NOT_MATCH: Self = Self::from_static("PublicIPAndLBSkuDoNotMatch");
    pub const SUBNET_IS_FULL: Self = Self::from_static("SubnetIsFull");
    pub const IN_USE_SUBNET_CANNOT_BE_DELETED: Self = Self::from_static("InUseSubnetCannotBeDeleted");
    pub const INSUFFICIENT_SUBNET_SIZE: Self = Self::from_static("InsufficientSubnetSize");
    pub const IN_USE_VIRTUAL_NETWORK_CANNOT_BE_DELETED: Self =
        Self::from_static("InUseVirtualNetworkCannotBeDeleted");
    pub const VNET_ADDRESS_SPACE_CANNOT_CHANGE_DUE_TO_PEERINGS: Self =
        Self::from_static("VnetAddressSpaceCannotChangeDueToPeerings");
    pub const PRIVATE_IP_ADDRESS_IN_RESERVED_RANGE: Self =
        Self::from_static("PrivateIPAddressInReservedRange");
    pub const PRIVATE_IP_ADDRESS_IS_ALLOCATED: Self =
        Self::from_static("PrivateIPAddressIsAllocated");
    pub const PRIVATE_IP_ADDRESS_NOT_IN_SUBNET: Self =
        Self::from_static("PrivateIPAddressNotInSubnet");
    pub const ANOTHER_OPERATION_IN_PROGRESS: Self = Self::from_static("AnotherOperationInProgress");
    pub const REFERENCED_RESOURCE_NOT_PROVISIONED: Self =
        Self::from_static("ReferencedResourceNotProvisioned");
    pub const CANCELED_AND_SUPERSEDED_DUE_TO_ANOTHER_OPERATION: Self =
        Self::from_static("CanceledAndSupersededDueToAnotherOperation");
    pub const NETWORKING_INTERNAL_OPERATION_ERROR: Self =
        Self::from_static("NetworkingInternalOperationError");

    // Key vault
    pub const VAULT_ALREADY_EXISTS: Self = Self::from_static("VaultAlreadyExists");
    pub const VAULT_NAME_NOT_VALID: Self = Self::from_static("VaultNameNotValid");
    pub const FORBIDDEN_BY_POLICY: Self = Self::from_static("ForbiddenByPolicy");

    // Authorization
    pub const ROLE_ASSIGNMENT_LIMIT_EXCEEDED: Self = Self::from_static("RoleAssignmentLimitExceeded");
    pub const PRINCIPAL_TYPE_NOT_SUPPORTED: Self = Self::from_static("PrincipalTypeNotSupported");
    pub const INVALID_PRINCIPAL_ID: Self = Self::from_static("InvalidPrincipalId");
    pub const PRINCIPAL_NOT_FOUND: Self = Self::from_static("PrincipalNotFound");

    // Storage
    pub const STORAGE_ACCOUNT_ALREADY_TAKEN: Self = Self::from_static("StorageAccountAlreadyTaken");
    pub const ACCOUNT_NAME_INVALID: Self = Self::from_static("AccountNameInvalid");

    // Transient, any provider
    pub const INTERNAL_SERVER_ERROR: Self = Self::from_static("InternalServerError");
    pub const RETRYABLE_ERROR: Self = Self::from_static("RetryableError");
    pub const TOO_MANY_REQUESTS: Self = Self::from_static("TooManyRequests");
    pub const SERVICE_UNAVAILABLE: Self = Self::from_static("ServiceUnavailable");
    pub const GATEWAY_TIMEOUT: Self = Self::from_static("GatewayTimeout");
    pub const INTERNAL_OPERATION_ERROR: Self = Self::from_static("InternalOperationError");
}

// ============================================================================
// Resource types, providers and dependencies
// ============================================================================

impl ResourceType {
    /// Pseudo-type whose client-error row applies to every resource type.
    pub const ALL_RESOURCES: Self = Self::from_static("AllResources");

    pub const RESOURCE_GROUPS: Self = Self::from_static("Microsoft.Resources/resourceGroups");
    pub const DEPLOYMENTS: Self = Self::from_static("Microsoft.Resources/deployments");
    pub const VIRTUAL_MACHINES: Self = Self::from_static("Microsoft.Compute/virtualMachines");
    pub const VM_EXTENSIONS: Self = Self::from_static("Microsoft.Compute/virtualMachines/extensions");
    pub const VIRTUAL_MACHINE_SCALE_SETS: Self =
        Self::from_static("Microsoft.Compute/virtualMachineScaleSets");
    pub const VMSS_EXTENSIONS: Self =
        Self::from_static("Microsoft.Compute/virtualMachineScaleSets/extensions");
    pub const AVAILABILITY_SETS: Self = Self::from_static("Microsoft.Compute/availabilitySets");
    pub const DISKS: Self = Self::from_static("Microsoft.Compute/disks");
    pub const DISK_ENCRYPTION_SETS: Self = Self::from_static("Microsoft.Compute/diskEncryptionSets");
    pub const LOAD_BALANCERS: Self = Self::from_static("Microsoft.Network/loadBalancers");
    pub const PUBLIC_IP_ADDRESSES: Self = Self::from_static("Microsoft.Network/publicIPAddresses");
    pub const VIRTUAL_NETWORKS: Self = Self::from_static("Microsoft.Network/virtualNetworks");
    pub const SUBNETS: Self = Self::from_static("Microsoft.Network/virtualNetworks/subnets");
    pub const NETWORK_INTERFACES: Self = Self::from_static("Microsoft.Network/networkInterfaces");
    pub const NETWORK_SECURITY_GROUPS: Self =
        Self::from_static("Microsoft.Network/networkSecurityGroups");
    pub const ROUTE_TABLES: Self = Self::from_static("Microsoft.Network/routeTables");
    pub const PRIVATE_ENDPOINTS: Self = Self::from_static("Microsoft.Network/privateEndpoints");
    pub const PRIVATE_DNS_ZONES: Self = Self::from_static("Microsoft.Network/privateDnsZones");
    pub const DNS_ZONES: Self = Self::from_static("Microsoft.Network/dnsZones");
    pub const KEY_VAULTS: Self = Self::from_static("Microsoft.KeyVault/vaults");
    pub const ROLE_ASSIGNMENTS: Self = Self::from_static("Microsoft.Authorization/roleAssignments");
    pub const USER_ASSIGNED_IDENTITIES: Self =
        Self::from_static("Microsoft.ManagedIdentity/userAssignedIdentities");
    pub const STORAGE_ACCOUNTS: Self = Self::from_static("Microsoft.Storage/storageAccounts");

    /// The provider segment: everything before the first `/`, or the whole
    /// string when there is none.
    pub fn provider(&self) -> ResourceProvider {
        let value = self.as_str();
        let provider = value.split_once('/').map_or(value, |(provider, _)| provider);
        ResourceProvider::new(provider)
    }
}

impl ResourceProvider {
    /// Pseudo-provider matching every provider in the retryable map.
    pub const ALL_PROVIDERS: Self = Self::from_static("AllProviders");

    pub const COMPUTE: Self = Self::from_static("Microsoft.Compute");
    pub const NETWORK: Self = Self::from_static("Microsoft.Network");
    pub const RESOURCES: Self = Self::from_static("Microsoft.Resources");
    pub const KEY_VAULT: Self = Self::from_static("Microsoft.KeyVault");
    pub const AUTHORIZATION: Self = Self::from_static("Microsoft.Authorization");
    pub const MANAGED_IDENTITY: Self = Self::from_static("Microsoft.ManagedIdentity");
    pub const STORAGE: Self = Self::from_static("Microsoft.Storage");
}

impl Dependency {
    /// The authentication library used to acquire resource manager tokens.
    pub const ADAL: Self = Self::from_static("ADAL");
    /// The resource manager front door.
    pub const ARM: Self = Self::from_static("ARM");
    pub const KUBERNETES_API_SERVER: Self = Self::from_static("KubernetesAPIServer");
    pub const BLOB_STORAGE: Self = Self::from_static("BlobStorage");
    pub const KEY_VAULT_DATA_PLANE: Self = Self::from_static("KeyVaultDataPlane");
    pub const INTERNAL: Self = Self::from_static("Internal");
}

impl From<ResourceType> for Dependency {
    fn from(resource_type: ResourceType) -> Self {
        Self(resource_type.0)
    }
}

// ============================================================================
// VM extension exit codes
// ============================================================================

impl VmExtensionErrorCode {
    pub const SYSTEMCTL_START_FAIL: Self = Self::from_static("SystemctlStartFailVMExtensionError");
    pub const CLOUD_INIT_TIMEOUT: Self = Self::from_static("CloudInitTimeoutVMExtensionError");
    pub const FILE_WATCH_TIMEOUT: Self = Self::from_static("FileWatchTimeoutVMExtensionError");
    pub const HOLD_WALINUXAGENT: Self = Self::from_static("HoldWALinuxAgentVMExtensionError");
    pub const RELEASE_HOLD_WALINUXAGENT: Self =
        Self::from_static("ReleaseHoldWALinuxAgentVMExtensionError");
    pub const APT_INSTALL_TIMEOUT: Self = Self::from_static("AptInstallTimeoutVMExtensionError");
    pub const DOCKER_INSTALL_TIMEOUT: Self = Self::from_static("DockerInstallTimeoutVMExtensionError");
    pub const DOCKER_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("DockerDownloadTimeoutVMExtensionError");
    pub const DOCKER_KEY_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("DockerKeyDownloadTimeoutVMExtensionError");
    pub const DOCKER_APT_KEY_TIMEOUT: Self = Self::from_static("DockerAptKeyTimeoutVMExtensionError");
    pub const DOCKER_START_FAIL: Self = Self::from_static("DockerStartFailVMExtensionError");
    pub const MOBY_APT_LIST_TIMEOUT: Self = Self::from_static("MobyAptListTimeoutVMExtensionError");
    pub const MS_GPG_KEY_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("MSGPGKeyDownloadTimeoutVMExtensionError");
    pub const MOBY_INSTALL_TIMEOUT: Self = Self::from_static("MobyInstallTimeoutVMExtensionError");
    pub const CONTAINERD_INSTALL_TIMEOUT: Self =
        Self::from_static("ContainerdInstallTimeoutVMExtensionError");
    pub const RUNC_INSTALL_TIMEOUT: Self = Self::from_static("RuncInstallTimeoutVMExtensionError");
    pub const K8S_RUNNING_TIMEOUT: Self = Self::from_static("K8SRunningTimeoutVMExtensionError");
    pub const K8S_DOWNLOAD_TIMEOUT: Self = Self::from_static("K8SDownloadTimeoutVMExtensionError");
    pub const KUBECTL_NOT_FOUND: Self = Self::from_static("KubectlNotFoundVMExtensionError");
    pub const IMG_DOWNLOAD_TIMEOUT: Self = Self::from_static("ImgDownloadTimeoutVMExtensionError");
    pub const KUBELET_START_FAIL: Self = Self::from_static("KubeletStartFailVMExtensionError");
    pub const DOCKER_IMG_PULL_TIMEOUT: Self =
        Self::from_static("DockerImgPullTimeoutVMExtensionError");
    pub const CONTAINERD_CTR_IMG_PULL_TIMEOUT: Self =
        Self::from_static("ContainerdCtrImgPullTimeoutVMExtensionError");
    pub const CONTAINERD_CRICTL_IMG_PULL_TIMEOUT: Self =
        Self::from_static("ContainerdCrictlImgPullTimeoutVMExtensionError");
    pub const CONTAINERD_INSTALL_FILE_NOT_FOUND: Self =
        Self::from_static("ContainerdInstallFileNotFoundVMExtensionError");
    pub const CONTAINERD_VERSION_INVALID: Self =
        Self::from_static("ContainerdVersionInvalidVMExtensionError");
    pub const CNI_DOWNLOAD_TIMEOUT: Self = Self::from_static("CNIDownloadTimeoutVMExtensionError");
    pub const MS_PROD_DEB_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("MSProdDebDownloadTimeoutVMExtensionError");
    pub const MS_PROD_DEB_PKG_ADD_FAIL: Self =
        Self::from_static("MSProdDebPkgAddFailVMExtensionError");
    pub const SYSTEMD_INSTALL_FAIL: Self = Self::from_static("SystemdInstallFailVMExtensionError");
    pub const MODPROBE_FAIL: Self = Self::from_static("ModprobeFailVMExtensionError");
    pub const OUTBOUND_CONN_FAIL: Self = Self::from_static("OutboundConnFailVMExtensionError");
    pub const K8S_API_SERVER_CONN_FAIL: Self =
        Self::from_static("K8SAPIServerConnFailVMExtensionError");
    pub const K8S_API_SERVER_DNS_LOOKUP_FAIL: Self =
        Self::from_static("K8SAPIServerDNSLookupFailVMExtensionError");
    pub const K8S_API_SERVER_AZURE_DNS_LOOKUP_FAIL: Self =
        Self::from_static("K8SAPIServerAzureDNSLookupFailVMExtensionError");
    pub const KATA_KEY_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("KataKeyDownloadTimeoutVMExtensionError");
    pub const KATA_APT_KEY_TIMEOUT: Self = Self::from_static("KataAptKeyTimeoutVMExtensionError");
    pub const KATA_INSTALL_TIMEOUT: Self = Self::from_static("KataInstallTimeoutVMExtensionError");
    pub const VHD_FILE_NOT_FOUND: Self = Self::from_static("VHDFileNotFoundVMExtensionError");
    pub const CONTAINERD_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("ContainerdDownloadTimeoutVMExtensionError");
    pub const RUNC_DOWNLOAD_TIMEOUT: Self = Self::from_static("RuncDownloadTimeoutVMExtensionError");
    pub const CUSTOM_SEARCH_DOMAINS_FAIL: Self =
        Self::from_static("CustomSearchDomainsFailVMExtensionError");
    pub const GPU_DOWNLOAD_TIMEOUT: Self = Self::from_static("GPUDownloadTimeoutVMExtensionError");
    pub const GPU_DRIVERS_START_FAIL: Self = Self::from_static("GPUDriversStartFailVMExtensionError");
    pub const GPU_DRIVERS_INSTALL_TIMEOUT: Self =
        Self::from_static("GPUDriversInstallTimeoutVMExtensionError");
    pub const GPU_DEVICE_PLUGIN_START_FAIL: Self =
        Self::from_static("GPUDevicePluginStartFailVMExtensionError");
    pub const GPU_INFO_ROM_CORRUPTED: Self = Self::from_static("GPUInfoROMCorruptedVMExtensionError");
    pub const SGX_DRIVERS_INSTALL_TIMEOUT: Self =
        Self::from_static("SGXDriversInstallTimeoutVMExtensionError");
    pub const SGX_DRIVERS_START_FAIL: Self = Self::from_static("SGXDriversStartFailVMExtensionError");
    pub const APT_DAILY_TIMEOUT: Self = Self::from_static("AptDailyTimeoutVMExtensionError");
    pub const APT_UPDATE_TIMEOUT: Self = Self::from_static("AptUpdateTimeoutVMExtensionError");
    pub const CSE_PROVISION_SCRIPT_NOT_READY_TIMEOUT: Self =
        Self::from_static("CSEProvisionScriptNotReadyTimeoutVMExtensionError");
    pub const APT_DIST_UPGRADE_TIMEOUT: Self =
        Self::from_static("AptDistUpgradeTimeoutVMExtensionError");
    pub const APT_PURGE_FAIL: Self = Self::from_static("AptPurgeFailVMExtensionError");
    pub const SYSCTL_RELOAD: Self = Self::from_static("SysctlReloadVMExtensionError");
    pub const CRICTL_DOWNLOAD_TIMEOUT: Self =
        Self::from_static("CrictlDownloadTimeoutVMExtensionError");
    pub const CRICTL_OPERATION_ERROR: Self = Self::from_static("CrictlOperationVMExtensionError");
    pub const CTR_OPERATION_ERROR: Self = Self::from_static("CtrOperationVMExtensionError");
    pub const SWAP_CREATE_FAIL: Self = Self::from_static("SwapCreateFailVMExtensionError");
    pub const SWAP_CREATE_INSUFFICIENT_DISK_SPACE: Self =
        Self::from_static("SwapCreateInsufficientDiskSpaceVMExtensionError");
    pub const TELEPORTD_DOWNLOAD_ERR: Self = Self::from_static("TeleportdDownloadVMExtensionError");
    pub const TELEPORTD_INSTALL_ERR: Self = Self::from_static("TeleportdInstallVMExtensionError");
    pub const HTTP_PROXY_CA_CONVERT: Self = Self::from_static("HTTPProxyCAConvertVMExtensionError");
    pub const UPDATE_CA_CERTS: Self = Self::from_static("UpdateCACertsVMExtensionError");
    pub const DISABLE_SSH: Self = Self::from_static("DisableSSHVMExtensionError");
    pub const VHD_REBOOT_REQUIRED: Self = Self::from_static("VHDRebootRequiredVMExtensionError");

    /// Look up the symbolic reason for an exit code reported by the VM agent.
    pub fn from_exit_code(exit_code: i32) -> Option<Self> {
        VM_EXTENSION_EXIT_CODE_INDEX.get(&exit_code).cloned()
    }

    /// Whether this failure points at the customer's network or environment.
    pub fn is_client_side(&self) -> bool {
        CLIENT_SIDE_VM_EXTENSION_ERRORS.contains(self)
    }
}

// ============================================================================
// Contract tables
// ============================================================================

/// Exit code reported by the node provisioning script to symbolic reason.
pub static VM_EXTENSION_EXIT_CODES: &[(i32, VmExtensionErrorCode)] = &[
    (4, VmExtensionErrorCode::SYSTEMCTL_START_FAIL),
    (5, VmExtensionErrorCode::CLOUD_INIT_TIMEOUT),
    (6, VmExtensionErrorCode::FILE_WATCH_TIMEOUT),
    (7, VmExtensionErrorCode::HOLD_WALINUXAGENT),
    (8, VmExtensionErrorCode::RELEASE_HOLD_WALINUXAGENT),
    (9, VmExtensionErrorCode::APT_INSTALL_TIMEOUT),
    (20, VmExtensionErrorCode::DOCKER_INSTALL_TIMEOUT),
    (21, VmExtensionErrorCode::DOCKER_DOWNLOAD_TIMEOUT),
    (22, VmExtensionErrorCode::DOCKER_KEY_DOWNLOAD_TIMEOUT),
    (23, VmExtensionErrorCode::DOCKER_APT_KEY_TIMEOUT),
    (24, VmExtensionErrorCode::DOCKER_START_FAIL),
    (25, VmExtensionErrorCode::MOBY_APT_LIST_TIMEOUT),
    (26, VmExtensionErrorCode::MS_GPG_KEY_DOWNLOAD_TIMEOUT),
    (27, VmExtensionErrorCode::MOBY_INSTALL_TIMEOUT),
    (28, VmExtensionErrorCode::CONTAINERD_INSTALL_TIMEOUT),
    (29, VmExtensionErrorCode::RUNC_INSTALL_TIMEOUT),
    (30, VmExtensionErrorCode::K8S_RUNNING_TIMEOUT),
    (31, VmExtensionErrorCode::K8S_DOWNLOAD_TIMEOUT),
    (32, VmExtensionErrorCode::KUBECTL_NOT_FOUND),
    (33, VmExtensionErrorCode::IMG_DOWNLOAD_TIMEOUT),
    (34, VmExtensionErrorCode::KUBELET_START_FAIL),
    (35, VmExtensionErrorCode::DOCKER_IMG_PULL_TIMEOUT),
    (36, VmExtensionErrorCode::CONTAINERD_CTR_IMG_PULL_TIMEOUT),
    (37, VmExtensionErrorCode::CONTAINERD_CRICTL_IMG_PULL_TIMEOUT),
    (38, VmExtensionErrorCode::CONTAINERD_INSTALL_FILE_NOT_FOUND),
    (39, VmExtensionErrorCode::CONTAINERD_VERSION_INVALID),
    (41, VmExtensionErrorCode::CNI_DOWNLOAD_TIMEOUT),
    (42, VmExtensionErrorCode::MS_PROD_DEB_DOWNLOAD_TIMEOUT),
    (43, VmExtensionErrorCode::MS_PROD_DEB_PKG_ADD_FAIL),
    (48, VmExtensionErrorCode::SYSTEMD_INSTALL_FAIL),
    (49, VmExtensionErrorCode::MODPROBE_FAIL),
    (50, VmExtensionErrorCode::OUTBOUND_CONN_FAIL),
    (51, VmExtensionErrorCode::K8S_API_SERVER_CONN_FAIL),
    (52, VmExtensionErrorCode::K8S_API_SERVER_DNS_LOOKUP_FAIL),
    (53, VmExtensionErrorCode::K8S_API_SERVER_AZURE_DNS_LOOKUP_FAIL),
    (60, VmExtensionErrorCode::KATA_KEY_DOWNLOAD_TIMEOUT),
    (61, VmExtensionErrorCode::KATA_APT_KEY_TIMEOUT),
    (62, VmExtensionErrorCode::KATA_INSTALL_TIMEOUT),
    (65, VmExtensionErrorCode::VHD_FILE_NOT_FOUND),
    (70, VmExtensionErrorCode::CONTAINERD_DOWNLOAD_TIMEOUT),
    (71, VmExtensionErrorCode::RUNC_DOWNLOAD_TIMEOUT),
    (80, VmExtensionErrorCode::CUSTOM_SEARCH_DOMAINS_FAIL),
    (83, VmExtensionErrorCode::GPU_DOWNLOAD_TIMEOUT),
    (84, VmExtensionErrorCode::GPU_DRIVERS_START_FAIL),
    (85, VmExtensionErrorCode::GPU_DRIVERS_INSTALL_TIMEOUT),
    (86, VmExtensionErrorCode::GPU_DEVICE_PLUGIN_START_FAIL),
    (87, VmExtensionErrorCode::GPU_INFO_ROM_CORRUPTED),
    (90, VmExtensionErrorCode::SGX_DRIVERS_INSTALL_TIMEOUT),
    (91, VmExtensionErrorCode::SGX_DRIVERS_START_FAIL),
    (98, VmExtensionErrorCode::APT_DAILY_TIMEOUT),
    (99, VmExtensionErrorCode::APT_UPDATE_TIMEOUT),
    (100, VmExtensionErrorCode::CSE_PROVISION_SCRIPT_NOT_READY_TIMEOUT),
    (101, VmExtensionErrorCode::APT_DIST_UPGRADE_TIMEOUT),
    (102, VmExtensionErrorCode::APT_PURGE_FAIL),
    (103, VmExtensionErrorCode::SYSCTL_RELOAD),
    (117, VmExtensionErrorCode::CRICTL_DOWNLOAD_TIMEOUT),
    (118, VmExtensionErrorCode::CRICTL_OPERATION_ERROR),
    (119, VmExtensionErrorCode::CTR_OPERATION_ERROR),
    (130, VmExtensionErrorCode::SWAP_CREATE_FAIL),
    (131, VmExtensionErrorCode::SWAP_CREATE_INSUFFICIENT_DISK_SPACE),
    (150, VmExtensionErrorCode::TELEPORTD_DOWNLOAD_ERR),
    (151, VmExtensionErrorCode::TELEPORTD_INSTALL_ERR),
    (160, VmExtensionErrorCode::HTTP_PROXY_CA_CONVERT),
    (161, VmExtensionErrorCode::UPDATE_CA_CERTS),
    (172, VmExtensionErrorCode::DISABLE_SSH),
    (200, VmExtensionErrorCode::VHD_REBOOT_REQUIRED),
];

/// Extension failures caused by the customer's network or DNS setup.
///
/// Growing this list changes SLO attribution for existing failures and needs
/// a matching metrics migration.
pub static CLIENT_SIDE_VM_EXTENSION_ERRORS: &[VmExtensionErrorCode] = &[
    VmExtensionErrorCode::OUTBOUND_CONN_FAIL,
    VmExtensionErrorCode::K8S_API_SERVER_DNS_LOOKUP_FAIL,
    VmExtensionErrorCode::K8S_API_SERVER_AZURE_DNS_LOOKUP_FAIL,
];

/// Connectivity keyword to subcode, tested in order by substring containment.
pub static CONNECTIVITY_SUBCODES: &[(&str, Subcode)] = &[
    ("connection refused", Subcode::CONNECTION_REFUSED),
    ("connection reset by peer", Subcode::CONNECTION_RESET_BY_PEER),
    ("Client.Timeout exceeded", Subcode::CLIENT_TIMEOUT_EXCEEDED),
    ("i/o timeout", Subcode::IO_TIMEDOUT),
    ("TLS handshake timeout", Subcode::TLS_HANDSHAKE_TIMEDOUT),
    ("no such host", Subcode::LOOKUP_NO_SUCH_HOST),
    ("server misbehaving", Subcode::LOOKUP_SERVER_MISBEHAVING),
    ("context deadline exceeded", Subcode::CONTEXT_DEADLINE_EXCEEDED),
    ("network is unreachable", Subcode::NETWORK_UNREACHABLE),
    ("use of closed network connection", Subcode::CLOSED_NETWORK_CONNECTION),
    ("http2: server sent GOAWAY", Subcode::HTTP2_GOAWAY),
];

/// Upstream codes that are the caller's fault, per resource type.
pub static CLIENT_ERROR_CODES_BY_RESOURCE_TYPE: &[(ResourceType, &[ArmErrorCode])] = &[
    (
        ResourceType::ALL_RESOURCES,
        &[
            ArmErrorCode::AUTHORIZATION_FAILED,
            ArmErrorCode::LINKED_AUTHORIZATION_FAILED,
            ArmErrorCode::REQUEST_DISALLOWED_BY_POLICY,
            ArmErrorCode::SCOPE_LOCKED,
            ArmErrorCode::SUBSCRIPTION_NOT_REGISTERED,
            ArmErrorCode::MISSING_SUBSCRIPTION_REGISTRATION,
            ArmErrorCode::READ_ONLY_DISABLED_SUBSCRIPTION,
            ArmErrorCode::DISALLOWED_OPERATION,
            ArmErrorCode::RESOURCE_GROUP_BEING_DELETED,
            ArmErrorCode::INVALID_RESOURCE_GROUP_LOCATION,
            ArmErrorCode::QUOTA_EXCEEDED,
            ArmErrorCode::OPERATION_NOT_ALLOWED,
            ArmErrorCode::INVALID_PARAMETER,
        ],
    ),
    (
        ResourceType::VIRTUAL_MACHINE_SCALE_SETS,
        &[
            ArmErrorCode::SKU_NOT_AVAILABLE,
            ArmErrorCode::ALLOCATION_FAILED,
            ArmErrorCode::ZONAL_ALLOCATION_FAILED,
            ArmErrorCode::OVERCONSTRAINED_ALLOCATION_REQUEST,
            ArmErrorCode::OVERCONSTRAINED_ZONAL_ALLOCATION_REQUEST,
            ArmErrorCode::GALLERY_IMAGE_NOT_FOUND,
        ],
    ),
    (
        ResourceType::VIRTUAL_MACHINES,
        &[
            ArmErrorCode::SKU_NOT_AVAILABLE,
            ArmErrorCode::ALLOCATION_FAILED,
            ArmErrorCode::ZONAL_ALLOCATION_FAILED,
            ArmErrorCode::OVERCONSTRAINED_ALLOCATION_REQUEST,
        ],
    ),
    (
        ResourceType::DISK_ENCRYPTION_SETS,
        &[
            ArmErrorCode::KEY_VAULT_ACCESS_FORBIDDEN,
            ArmErrorCode::DISK_ENCRYPTION_SET_DOES_NOT_EXIST,
        ],
    ),
    (
        ResourceType::PUBLIC_IP_ADDRESSES,
        &[
            ArmErrorCode::PUBLIC_IP_COUNT_LIMIT_REACHED,
            ArmErrorCode::STANDARD_SKU_PUBLIC_IP_COUNT_LIMIT_REACHED,
        ],
    ),
    (
        ResourceType::LOAD_BALANCERS,
        &[ArmErrorCode::PUBLIC_IP_AND_LB_SKU_DO_NOT_MATCH],
    ),
    (
        ResourceType::SUBNETS,
        &[
            ArmErrorCode::SUBNET_IS_FULL,
            ArmErrorCode::IN_USE_SUBNET_CANNOT_BE_DELETED,
            ArmErrorCode::INSUFFICIENT_SUBNET_SIZE,
        ],
    ),
    (
        ResourceType::VIRTUAL_NETWORKS,
        &[
            ArmErrorCode::IN_USE_VIRTUAL_NETWORK_CANNOT_BE_DELETED,
            ArmErrorCode::VNET_ADDRESS_SPACE_CANNOT_CHANGE_DUE_TO_PEERINGS,
        ],
    ),
    (
        ResourceType::NETWORK_INTERFACES,
        &[
            ArmErrorCode::PRIVATE_IP_ADDRESS_IN_RESERVED_RANGE,
            ArmErrorCode::PRIVATE_IP_ADDRESS_IS_ALLOCATED,
            ArmErrorCode::PRIVATE_IP_ADDRESS_NOT_IN_SUBNET,
        ],
    ),
    (
        ResourceType::KEY_VAULTS,
        &[
            ArmErrorCode::VAULT_ALREADY_EXISTS,
            ArmErrorCode::VAULT_NAME_NOT_VALID,
            ArmErrorCode::FORBIDDEN_BY_POLICY,
        ],
    ),
    (
        ResourceType::ROLE_ASSIGNMENTS,
        &[
            ArmErrorCode::ROLE_ASSIGNMENT_LIMIT_EXCEEDED,
            ArmErrorCode::PRINCIPAL_TYPE_NOT_SUPPORTED,
            ArmErrorCode::INVALID_PRINCIPAL_ID,
        ],
    ),
    (
        ResourceType::STORAGE_ACCOUNTS,
        &[
            ArmErrorCode::STORAGE_ACCOUNT_ALREADY_TAKEN,
            ArmErrorCode::ACCOUNT_NAME_INVALID,
        ],
    ),
];

/// Upstream codes that are transient, per provider.
pub static RETRYABLE_ERROR_CODES_BY_PROVIDER: &[(ArmErrorCode, &[ResourceProvider])] = &[
    (ArmErrorCode::INTERNAL_SERVER_ERROR, &[ResourceProvider::ALL_PROVIDERS]),
    (ArmErrorCode::RETRYABLE_ERROR, &[ResourceProvider::ALL_PROVIDERS]),
    (ArmErrorCode::TOO_MANY_REQUESTS, &[ResourceProvider::ALL_PROVIDERS]),
    (ArmErrorCode::SERVICE_UNAVAILABLE, &[ResourceProvider::ALL_PROVIDERS]),
    (ArmErrorCode::GATEWAY_TIMEOUT, &[ResourceProvider::ALL_PROVIDERS]),
    (ArmErrorCode::INTERNAL_OPERATION_ERROR, &[ResourceProvider::ALL_PROVIDERS]),
    (
        ArmErrorCode::ANOTHER_OPERATION_IN_PROGRESS,
        &[ResourceProvider::NETWORK, ResourceProvider::COMPUTE],
    ),
    (ArmErrorCode::REFERENCED_RESOURCE_NOT_PROVISIONED, &[ResourceProvider::NETWORK]),
    (
        ArmErrorCode::CANCELED_AND_SUPERSEDED_DUE_TO_ANOTHER_OPERATION,
        &[ResourceProvider::NETWORK],
    ),
    (ArmErrorCode::NETWORKING_INTERNAL_OPERATION_ERROR, &[ResourceProvider::NETWORK]),
    (ArmErrorCode::OPERATION_PREEMPTED, &[ResourceProvider::COMPUTE]),
    (ArmErrorCode::INTERNAL_EXECUTION_ERROR, &[ResourceProvider::COMPUTE]),
    (ArmErrorCode::PRINCIPAL_NOT_FOUND, &[ResourceProvider::AUTHORIZATION]),
];

/// Linux extension handlers owned by the service; a non-transient failure in
/// one of them is our fault.
pub static DEFAULT_LINUX_EXTENSION_HANDLERS: &[&str] = &[
    "Microsoft.Azure.Extensions.CustomScript",
    "Microsoft.AKS.Compute.AKS.Linux.AKSNode",
    "Microsoft.AKS.Compute.AKS.Linux.Billing",
];

/// Windows counterpart of [`DEFAULT_LINUX_EXTENSION_HANDLERS`].
pub static DEFAULT_WINDOWS_EXTENSION_HANDLERS: &[&str] = &[
    "Microsoft.Compute.CustomScriptExtension",
    "Microsoft.AKS.Compute.AKS.Windows.Billing",
];

// Indexed views over the literal tables.

static VM_EXTENSION_EXIT_CODE_INDEX: Lazy<HashMap<i32, VmExtensionErrorCode>> =
    Lazy::new(|| VM_EXTENSION_EXIT_CODES.iter().cloned().collect());

static CLIENT_ERROR_INDEX: Lazy<HashMap<ResourceType, HashSet<ArmErrorCode>>> = Lazy::new(|| {
    let mut index: HashMap<ResourceType, HashSet<ArmErrorCode>> = HashMap::new();
    for (resource_type, codes) in CLIENT_ERROR_CODES_BY_RESOURCE_TYPE {
        index
            .entry(resource_type.clone())
            .or_default()
            .extend(codes.iter().cloned());
    }
    index
});

static RETRYABLE_INDEX: Lazy<HashMap<ArmErrorCode, HashSet<ResourceProvider>>> =
    Lazy::new(|| {
        let mut index: HashMap<ArmErrorCode, HashSet<ResourceProvider>> = HashMap::new();
        for (code, providers) in RETRYABLE_ERROR_CODES_BY_PROVIDER {
            index
                .entry(code.clone())
                .or_default()
                .extend(providers.iter().cloned());
        }
        index
    });

// Longest first so the naive scan prefers the most specific code.
static KNOWN_CLIENT_CODES: Lazy<Vec<ArmErrorCode>> = Lazy::new(|| {
    let mut codes: Vec<ArmErrorCode> = CLIENT_ERROR_CODES_BY_RESOURCE_TYPE
        .iter()
        .flat_map(|(_, codes)| codes.iter().cloned())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    codes.sort_by(|a, b| b.as_str().len().cmp(&a.as_str().len()).then_with(|| a.cmp(b)));
    codes
});

static KNOWN_CLIENT_CODE_SET: Lazy<HashSet<ArmErrorCode>> =
    Lazy::new(|| KNOWN_CLIENT_CODES.iter().cloned().collect());

/// Whether `code` is a client error for `resource_type`, either directly or
/// through the [`ResourceType::ALL_RESOURCES`] row.
pub fn is_client_error_code(resource_type: &ResourceType, code: &str) -> bool {
    [resource_type, &ResourceType::ALL_RESOURCES]
        .into_iter()
        .filter_map(|row| CLIENT_ERROR_INDEX.get(row))
        .any(|codes| codes.contains(code))
}

/// Client-error codes of a single row, empty when the resource type has none.
pub fn client_error_codes_for(resource_type: &ResourceType) -> Vec<ArmErrorCode> {
    let mut codes: Vec<ArmErrorCode> = CLIENT_ERROR_INDEX
        .get(resource_type)
        .map(|codes| codes.iter().cloned().collect())
        .unwrap_or_default();
    codes.sort();
    codes
}

/// Membership in the union of every client-error row.
pub fn is_known_client_code(code: &str) -> bool {
    KNOWN_CLIENT_CODE_SET.contains(code)
}

/// The union of every client-error row, longest code first.
pub fn known_client_codes() -> &'static [ArmErrorCode] {
    &KNOWN_CLIENT_CODES
}

/// Whether `code` is transient for `provider`, directly or through
/// [`ResourceProvider::ALL_PROVIDERS`].
pub fn is_retryable_for_provider(provider: &ResourceProvider, code: &str) -> bool {
    RETRYABLE_INDEX.get(code).is_some_and(|providers| {
        providers.contains(provider) || providers.contains(&ResourceProvider::ALL_PROVIDERS)
    })
}
