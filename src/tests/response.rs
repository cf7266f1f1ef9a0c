// Unit Tests for Wire Error Envelopes
//
// UNIT UNDER TEST: ErrorResponse, HttpErrorResponse
//
// BUSINESS RESPONSIBILITY:
//   - Produces the public API's error body in its contractual JSON shape
//   - Keeps internal fields (category, subcode, inner message) off the wire
//   - Pairs a response with the HTTP status its category implies
//
// TEST COVERAGE:
//   - Serialize/deserialize preserves code and message
//   - Optional wire fields are omitted when unset
//   - Constructor variants populate the right fields
//   - HTTP status derivation from category

use crate::response::{with_http_status_code, ErrorBody, ErrorResponse, HttpErrorResponse};
use crate::taxonomy::{Category, ErrorCode, Subcode};
use serde_json::{json, Value};

#[cfg(test)]
mod wire_format_tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_code_and_message() {
        // Arrange
        let original = ErrorResponse::new_with_subcode_and_inner_message(
            Category::ClientError,
            ErrorCode::INVALID_DNS_PREFIX,
            Subcode::new("DnsPrefixTooLong"),
            "dnsPrefix must be at most 54 characters",
            "validation failed at agentPool",
        );

        // Act
        let json = serde_json::to_string(&original).expect("serializable");
        let parsed: ErrorResponse = serde_json::from_str(&json).expect("deserializable");

        // Assert
        assert_eq!(parsed.code(), original.code());
        assert_eq!(parsed.body.message, original.body.message);
        assert!(parsed.body.details.is_empty());
        assert_eq!(parsed.category(), None, "Category is not a wire field");
        assert!(parsed.body.subcode.is_empty(), "Subcode is not a wire field");
        assert!(parsed.body.inner_message.is_empty());
    }

    #[test]
    fn test_internal_fields_are_never_serialized() {
        // Arrange
        let response = ErrorResponse::new_with_subcode(
            Category::InternalError,
            ErrorCode::INTERNAL_OPERATION_ERROR,
            Subcode::IO_TIMEDOUT,
            "Internal server error",
        )
        .with_inner_message("Category: InternalError; SubCode: IOTimedout");

        // Act
        let value = serde_json::to_value(&response).expect("serializable");

        // Assert
        assert_eq!(
            value,
            json!({"error": {"code": "InternalOperationError", "message": "Internal server error"}})
        );
    }

    #[test]
    fn test_target_and_details_are_emitted_when_set() {
        // Arrange
        let detail = ErrorBody {
            code: ErrorCode::SUBNET_IS_FULL,
            message: "Subnet aks-subnet is full".to_string(),
            ..ErrorBody::default()
        };
        let response = ErrorResponse::new_with_target(
            Category::ClientError,
            ErrorCode::INSUFFICIENT_SUBNET_SIZE,
            "Subnet too small",
            "agentPoolProfiles[0].vnetSubnetID",
        )
        .with_details(vec![detail]);

        // Act
        let value = serde_json::to_value(&response).expect("serializable");

        // Assert
        assert_eq!(value["error"]["target"], "agentPoolProfiles[0].vnetSubnetID");
        assert_eq!(value["error"]["details"][0]["code"], "SubnetIsFull");
        assert_eq!(value["error"]["details"][0].get("details"), None);
    }

    #[test]
    fn test_null_fields_deserialize_as_empty() {
        // Arrange
        let raw = json!({"error": {"code": null, "message": "boom", "details": null}});

        // Act
        let parsed: ErrorResponse = serde_json::from_value(raw).expect("deserializable");

        // Assert
        assert!(parsed.code().is_empty());
        assert_eq!(parsed.body.message, "boom");
        assert!(parsed.body.details.is_empty());
    }

    #[test]
    fn test_missing_error_object_is_rejected() {
        // Act
        let parsed = serde_json::from_value::<ErrorResponse>(Value::Object(Default::default()));

        // Assert
        assert!(parsed.is_err());
    }
}

#[cfg(test)]
mod http_status_tests {
    use super::*;

    #[test]
    fn test_status_follows_category() {
        // Arrange
        let client = ErrorResponse::new(Category::ClientError, ErrorCode::QUOTA_EXCEEDED, "quota");
        let internal = ErrorResponse::new(Category::InternalError, ErrorCode::UNKNOWN, "oops");

        // Act
        let client = HttpErrorResponse::from_error_response(client);
        let internal = HttpErrorResponse::from_error_response(internal);
        let uncategorized = HttpErrorResponse::from_error_response(ErrorResponse::default());

        // Assert
        assert_eq!(client.http_status_code, 400);
        assert_eq!(internal.http_status_code, 500);
        assert_eq!(uncategorized.http_status_code, 500);
    }

    #[test]
    fn test_explicit_status_is_kept() {
        // Arrange
        let response = ErrorResponse::new(Category::ClientError, ErrorCode::NOT_FOUND, "missing");

        // Act
        let http = with_http_status_code(404, response.clone());

        // Assert
        assert_eq!(http.http_status_code, 404);
        assert_eq!(http.error_response, response);
        assert!(http.to_string().starts_with("HTTPStatusCode: 404; Category: ClientError; Code: NotFound"));
    }
}
