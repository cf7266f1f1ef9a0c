// Test modules for aks-errors crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities shared by the unit test modules
pub mod helpers;

pub mod response;
pub mod retry;
pub mod taxonomy;

// NOTE: The reqwest adapter is exercised against a mock server in
// tests/request_error_integration_tests.rs since it needs a runtime
