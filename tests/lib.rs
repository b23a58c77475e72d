//! Test suite for docgraph-gateway
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! Shared test infrastructure: fake probes and pre-wired application state.
//!
//! ### 2. Integration Tests (`integration/`)
//! HTTP-level tests exercising the health and diagnostics endpoints
//! against fake dependencies.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all fast tests (default)
//! cargo test --all-features
//!
//! # Run only unit tests
//! cargo test --lib --all-features
//!
//! # Run integration tests
//! cargo test --test lib --all-features
//! ```

pub mod common;
pub mod integration;
