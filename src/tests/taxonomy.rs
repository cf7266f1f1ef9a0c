// Unit Tests for the Error Taxonomy
//
// UNIT UNDER TEST: taxonomy
//
// BUSINESS RESPONSIBILITY:
//   - Defines the identifiers every categorization is expressed in
//   - Holds the contract tables that attribute codes to callers or the service
//   - Maps node provisioning exit codes to symbolic reasons
//
// TEST COVERAGE:
//   - Identifier comparison, display and serialization
//   - Exit code lookup and the client-side extension set
//   - Table lookups through the AllResources and AllProviders rows
//   - Status-derived subcodes

use crate::taxonomy::*;
use reqwest::StatusCode;

#[cfg(test)]
mod identifier_tests {
    use super::*;

    #[test]
    fn test_identifiers_compare_by_value() {
        // Arrange
        let owned = Subcode::new("IOTimedout");

        // Assert
        assert_eq!(owned, Subcode::IO_TIMEDOUT);
        assert_eq!(owned, "IOTimedout");
        assert_eq!(Subcode::from(ArmErrorCode::QUOTA_EXCEEDED).as_str(), "QuotaExceeded");
        assert_eq!(ErrorCode::from(Subcode::EOF), ErrorCode::new("EOF"));
    }

    #[test]
    fn test_identifiers_serialize_as_plain_strings() {
        // Act
        let json = serde_json::to_string(&Dependency::ADAL).expect("serializable");
        let parsed: AksTeam = serde_json::from_str("\"control-plane\"").expect("deserializable");

        // Assert
        assert_eq!(json, "\"ADAL\"");
        assert_eq!(parsed.as_str(), "control-plane");
    }

    #[test]
    fn test_category_http_status() {
        // Assert
        assert_eq!(Category::ClientError.http_status(), 400);
        assert_eq!(Category::InternalError.http_status(), 500);
        assert_eq!(Category::InternalError.to_string(), "InternalError");
    }

    #[test]
    fn test_subcode_from_http_status() {
        // Assert
        assert_eq!(
            Subcode::from_http_status(StatusCode::SERVICE_UNAVAILABLE).as_str(),
            "ServiceUnavailable"
        );
        assert_eq!(
            Subcode::from_http_status(StatusCode::TOO_MANY_REQUESTS).as_str(),
            "TooManyRequests"
        );
        let unnamed = StatusCode::from_u16(599).expect("valid status");
        assert_eq!(Subcode::from_http_status(unnamed).as_str(), "599");
    }

    #[test]
    fn test_unknown_subcode_is_not_specific() {
        // Assert
        assert!(!Subcode::UNKNOWN.is_specific());
        assert!(!Subcode::default().is_specific());
        assert!(Subcode::EOF.is_specific());
    }

    #[test]
    fn test_resource_type_provider() {
        // Assert
        assert_eq!(ResourceType::VM_EXTENSIONS.provider(), ResourceProvider::COMPUTE);
        assert_eq!(
            ResourceType::new("Microsoft.Network").provider(),
            ResourceProvider::NETWORK
        );
        assert_eq!(
            Dependency::from(ResourceType::KEY_VAULTS).as_str(),
            "Microsoft.KeyVault/vaults"
        );
    }
}

#[cfg(test)]
mod vm_extension_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_lookup() {
        // Assert
        assert_eq!(
            VmExtensionErrorCode::from_exit_code(9),
            Some(VmExtensionErrorCode::APT_INSTALL_TIMEOUT)
        );
        assert_eq!(
            VmExtensionErrorCode::from_exit_code(50),
            Some(VmExtensionErrorCode::OUTBOUND_CONN_FAIL)
        );
        assert_eq!(VmExtensionErrorCode::from_exit_code(1), None);
    }

    #[test]
    fn test_exit_codes_are_unique() {
        // Arrange
        let mut codes: Vec<i32> = VM_EXTENSION_EXIT_CODES.iter().map(|(code, _)| *code).collect();
        let total = codes.len();

        // Act
        codes.sort_unstable();
        codes.dedup();

        // Assert
        assert_eq!(codes.len(), total, "Exit codes must map to one reason each");
    }

    #[test]
    fn test_client_side_set_is_exactly_network_and_dns() {
        // Test verifies the client-side set is not silently widened; SLO
        // attribution depends on it

        // Act
        let client_side: Vec<i32> = VM_EXTENSION_EXIT_CODES
            .iter()
            .filter(|(_, code)| code.is_client_side())
            .map(|(exit_code, _)| *exit_code)
            .collect();

        // Assert
        assert_eq!(client_side, vec![50, 52, 53]);
        assert_eq!(CLIENT_SIDE_VM_EXTENSION_ERRORS.len(), 3);
    }
}

#[cfg(test)]
mod contract_table_tests {
    use super::*;

    #[test]
    fn test_client_error_lookup_includes_all_resources_row() {
        // Assert
        assert!(is_client_error_code(
            &ResourceType::PUBLIC_IP_ADDRESSES,
            "PublicIPCountLimitReached"
        ));
        assert!(is_client_error_code(&ResourceType::DISKS, "AuthorizationFailed"));
        assert!(!is_client_error_code(&ResourceType::DISKS, "PublicIPCountLimitReached"));
        assert!(!is_client_error_code(
            &ResourceType::VM_EXTENSIONS,
            "VMExtensionProvisioningError"
        ));
    }

    #[test]
    fn test_known_client_codes_cover_every_row() {
        for (_, codes) in CLIENT_ERROR_CODES_BY_RESOURCE_TYPE {
            for code in *codes {
                assert!(is_known_client_code(code.as_str()), "{code} should be known");
            }
        }
        assert!(!is_known_client_code("InternalServerError"));
    }

    #[test]
    fn test_known_client_codes_are_longest_first() {
        // Act
        let lengths: Vec<usize> = known_client_codes()
            .iter()
            .map(|code| code.as_str().len())
            .collect();

        // Assert
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_client_error_codes_for_row() {
        // Act
        let codes = client_error_codes_for(&ResourceType::LOAD_BALANCERS);
        let none = client_error_codes_for(&ResourceType::VM_EXTENSIONS);

        // Assert
        assert_eq!(codes, vec![ArmErrorCode::PUBLIC_IP_AND_LB_SKU_DO_NOT_MATCH]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_retryable_lookup_includes_all_providers_row() {
        // Assert
        assert!(is_retryable_for_provider(&ResourceProvider::NETWORK, "AnotherOperationInProgress"));
        assert!(is_retryable_for_provider(&ResourceProvider::STORAGE, "InternalServerError"));
        assert!(!is_retryable_for_provider(&ResourceProvider::STORAGE, "AnotherOperationInProgress"));
        assert!(!is_retryable_for_provider(&ResourceProvider::COMPUTE, "QuotaExceeded"));
    }

    #[test]
    fn test_default_handler_lists_do_not_overlap() {
        // Assert
        assert!(DEFAULT_LINUX_EXTENSION_HANDLERS
            .iter()
            .all(|handler| !DEFAULT_WINDOWS_EXTENSION_HANDLERS.contains(handler)));
    }
}
