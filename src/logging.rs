//! Structured logging for categorization decisions.
//!
//! The crate never installs a subscriber; the embedding service decides where
//! events go. Events use a fixed vocabulary of fields so decisions can be
//! queried across services: `category`, `subcode`, `dependency`, `aks_team`,
//! `operation_id`, and `error_type` for the crate's own failures.

pub use tracing::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};
