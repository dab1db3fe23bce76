//! Shared Test Helpers for Cross-Crate Use
//!
//! This module provides centralized test utilities that can be used across
//! both the `processing` and `reviews` crates to avoid code duplication.

use std::sync::atomic::{AtomicU64, Ordering};

// Global counter for unique test identifiers across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate unique test identifiers that won't conflict across parallel tests
///
/// # Arguments
/// * `prefix` - A string prefix to identify the test type (e.g., "USER", "PRODUCT")
///
/// # Returns
/// A unique string in the format: "{prefix}-{counter}"
pub fn generate_unique_id(prefix: &str) -> String {
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, counter)
}

// =============================================================================
// CSV FIXTURES
// =============================================================================

/// Build a CSV document from a header row and data rows.
///
/// Rows are written as given, so a row may be shorter or longer than the header.
pub fn csv_document(headers: &[&str], rows: &[Vec<&str>]) -> String {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer
        .write_record(headers)
        .expect("Failed to write CSV fixture header");
    for row in rows {
        writer
            .write_record(row)
            .expect("Failed to write CSV fixture row");
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .expect("Failed to flush CSV fixture");
    String::from_utf8(bytes).expect("CSV fixture is not valid UTF-8")
}

/// Build the smallest valid upload: `review_content,user_id` rows.
///
/// # Arguments
/// * `rows` - `(user_id, review_content)` pairs in upload order
pub fn review_csv(rows: &[(&str, &str)]) -> String {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|(user_id, content)| vec![*content, *user_id])
        .collect();
    csv_document(&["review_content", "user_id"], &rows)
}

/// A product-review upload with the columns the dashboard usually receives.
pub fn product_review_csv() -> String {
    csv_document(
        &[
            "product_id",
            "product_name",
            "category",
            "rating",
            "review_id",
            "review_title",
            "review_content",
            "user_id",
        ],
        &[
            vec!["P1", "Cable", "Electronics", "5", "R1", "Great", "best amazing fantastic cable", "U1"],
            vec!["P1", "Cable", "Electronics", "4", "R2", "Fine", "works as described", "U2"],
            vec!["P2", "Charger", "Electronics", "1", "R3", "Bad", "worst scam awful charger", "U3"],
            vec!["P2", "Charger", "Electronics", "3", "R4", "Okay", "it charges", "U2"],
            vec!["P3", "Mouse", "Computers", "5", "R5", "Nice", "works as described", "U4"],
            vec!["P3", "Mouse", "Computers", "", "R6", "Missing user", "good mouse", ""],
        ],
    )
}

// =============================================================================
// UNIFIED TEST ERROR HANDLING
// =============================================================================

/// Unified error type for all test failures
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("Assertion failed: {message}")]
    AssertionFailure { message: String },

    #[error("Serialization error: {source}")]
    SerializationError { #[from] source: serde_json::Error },

    #[error("HTTP error: {source}")]
    HttpError { #[from] source: http::Error },

    #[error("Generic test error: {message}")]
    Generic { message: String },
}

impl TestError {
    /// Create an assertion failure error
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        Self::AssertionFailure { message: message.into() }
    }

    /// Create a generic error
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic { message: message.into() }
    }
}

/// Alias for the standard test result type
pub type TestResult<T = ()> = Result<T, TestError>;

/// Helper macro for test assertions that return TestError instead of panicking
#[macro_export]
macro_rules! test_assert {
    ($condition:expr) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                format!("assertion failed: {}", stringify!($condition))
            ));
        }
    };
    ($condition:expr, $message:expr $(, $arg:expr)*) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                format!($message $(, $arg)*)
            ));
        }
    };
}

/// Helper macro for test assertions with equality
#[macro_export]
macro_rules! test_assert_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::test_helpers::TestError::assertion_failure(
                        format!("assertion failed: `(left == right)`\n  left: `{:?}`,\n right: `{:?}`",
                                left_val, right_val)
                    ));
                }
            }
        }
    };
    ($left:expr, $right:expr, $message:expr $(, $arg:expr)*) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::test_helpers::TestError::assertion_failure(
                        format!($message $(, $arg)*)
                    ));
                }
            }
        }
    };
}

/// Utility functions for common test operations
pub mod test_utils {
    use super::*;

    /// Safe HTTP request builder that returns TestError
    pub fn build_request(
        method: &str,
        uri: &str,
        content_type: &str,
        body: Option<String>,
    ) -> TestResult<http::Request<String>> {
        let mut builder = http::Request::builder().uri(uri).method(method);

        if body.is_some() {
            builder = builder.header("Content-Type", content_type);
        }

        let request = builder
            .body(body.unwrap_or_default())
            .map_err(TestError::from)?;

        Ok(request)
    }

    /// Build a `text/csv` upload request
    pub fn csv_upload(uri: &str, csv: impl Into<String>) -> TestResult<http::Request<String>> {
        build_request("POST", uri, "text/csv", Some(csv.into()))
    }

    /// Safe response status check
    pub fn check_status_code(actual: http::StatusCode, expected: http::StatusCode) -> TestResult<()> {
        if actual != expected {
            return Err(TestError::assertion_failure(
                format!("Status code mismatch: expected {}, got {}", expected, actual)
            ));
        }
        Ok(())
    }

    /// Safe error containment check
    pub fn check_error_contains(error: &dyn std::error::Error, expected_substring: &str) -> TestResult<()> {
        let error_msg = error.to_string();
        if !error_msg.contains(expected_substring) {
            return Err(TestError::assertion_failure(
                format!("Error message '{}' does not contain '{}'", error_msg, expected_substring)
            ));
        }
        Ok(())
    }
}
