// Unit Tests for Retry Advice
//
// UNIT UNDER TEST: retry::is_retriable, set_retriable_based_on_categorized_error
//
// BUSINESS RESPONSIBILITY:
//   - Prevents retrying failures the caller must fix
//   - Prevents retrying invalid parameters regardless of attribution
//   - Marks everything else as worth another attempt
//
// TEST COVERAGE:
//   - The fixed rule for each category/subcode combination
//   - The hint attached by the classifier across a spread of real failures

use super::helpers::categorize;
use crate::categorized::CategorizedError;
use crate::retry::{is_retriable, set_retriable_based_on_categorized_error};
use crate::taxonomy::{Category, Dependency, Subcode};

#[cfg(test)]
mod rule_tests {
    use super::*;

    #[test]
    fn test_client_errors_are_never_retriable() {
        // Assert
        assert!(!is_retriable(Some(Category::ClientError), &Subcode::IO_TIMEDOUT));
        assert!(!is_retriable(Some(Category::ClientError), &Subcode::UNKNOWN));
    }

    #[test]
    fn test_invalid_parameter_is_not_retriable_in_any_case() {
        // Assert
        assert!(!is_retriable(Some(Category::InternalError), &Subcode::INVALID_PARAMETER));
        assert!(!is_retriable(Some(Category::InternalError), &Subcode::new("invalidparameter")));
        assert!(!is_retriable(None, &Subcode::new("INVALIDPARAMETER")));
    }

    #[test]
    fn test_everything_else_is_retriable() {
        // Assert
        assert!(is_retriable(Some(Category::InternalError), &Subcode::UNKNOWN));
        assert!(is_retriable(None, &Subcode::EOF));
    }

    #[test]
    fn test_advisor_overwrites_previous_hint() {
        // Arrange
        let err = CategorizedError::new(
            Category::ClientError,
            Subcode::new("QuotaExceeded"),
            Dependency::ARM,
            "quota",
        )
        .with_retriable(true);

        // Act
        let err = set_retriable_based_on_categorized_error(err);

        // Assert
        assert_eq!(err.retriable(), Some(false));
    }
}

#[cfg(test)]
mod classifier_hint_tests {
    use super::*;

    #[test]
    fn test_every_categorized_result_follows_the_rule() {
        // Arrange
        let messages = [
            r#"Code="PublicIPCountLimitReached" Message="limit""#,
            r#"Code="InvalidParameter" Message="bad value""#,
            "dial tcp 10.0.0.1:443: i/o timeout",
            "vmssInstanceErrorCode=NoVMSSInstanceView;",
            "adal: Refresh request failed. Status Code = '503'.",
            "VM has reported a failure when processing extension 'custom'.",
            "something unexpected happened",
        ];

        for message in messages {
            // Act
            let err = categorize(message);

            // Assert
            let expected = err.category() != Some(Category::ClientError)
                && !err.subcode().as_str().eq_ignore_ascii_case("InvalidParameter");
            assert_eq!(err.retriable(), Some(expected), "Unexpected hint for {message}");
        }
    }
}
