//! Integration tests
//!
//! HTTP-level tests for the health and diagnostics endpoints.

pub mod diagnostics_tests;
pub mod health_tests;
