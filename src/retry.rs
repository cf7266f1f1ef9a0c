//! Retry advice derived from a categorization.
//!
//! This crate never retries anything itself. It attaches a `retriable` hint
//! to every [`CategorizedError`] it produces:
//!
//! | Category / subcode | Retriable |
//! |---|---|
//! | `ClientError` | No |
//! | subcode `InvalidParameter` (any case) | No |
//! | anything else | Yes |
//!
//! Call sites may still override the hint with
//! [`CategorizedError::with_retriable`].

use crate::categorized::CategorizedError;
use crate::taxonomy::{Category, Subcode};

/// The fixed retry rule for a `(category, subcode)` pair.
pub fn is_retriable(category: Option<Category>, subcode: &Subcode) -> bool {
    if category == Some(Category::ClientError) {
        return false;
    }
    !subcode
        .as_str()
        .eq_ignore_ascii_case(Subcode::INVALID_PARAMETER.as_str())
}

/// Attach the retry hint for the error's current category and subcode.
pub fn set_retriable_based_on_categorized_error(err: CategorizedError) -> CategorizedError {
    let retriable = is_retriable(err.category(), err.subcode());
    err.with_retriable(retriable)
}
