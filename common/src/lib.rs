pub mod config;
pub mod yaml_include;

/// Common utilities shared across the review guard workspace
///
/// This crate provides shared functionality that can be used across different
/// crates of the fake review detector, including:
///
/// - YAML configuration model and `!include` aware loading
/// - Shared test utilities, assertion macros and CSV fixtures

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{TestError, TestResult, review_csv};
