pub mod review;
pub mod scored;

pub use review::{ReviewDataset, ReviewRecord};
pub use scored::{ReviewSignals, ScoredDataset, ScoredReview};

pub const REVIEW_CONTENT_COLUMN: &str = "review_content";
pub const USER_ID_COLUMN: &str = "user_id";
pub const RATING_COLUMN: &str = "rating";

/// Required columns, in the order they are validated.
pub const REQUIRED_COLUMNS: [&str; 2] = [REVIEW_CONTENT_COLUMN, USER_ID_COLUMN];

/// Columns appended by the scorer, in output order.
pub const DERIVED_COLUMNS: [&str; 9] = [
    "user_review_count",
    "repetitive_user",
    "positive_count",
    "too_positive",
    "negative_count",
    "too_negative",
    "one_time_reviewer",
    "score",
    "mostly_fake",
];

/// Columns shown in the review tables, kept only when present.
pub const DISPLAY_COLUMNS: [&str; 11] = [
    "product_id",
    "product_name",
    "category",
    RATING_COLUMN,
    "review_id",
    "review_title",
    REVIEW_CONTENT_COLUMN,
    USER_ID_COLUMN,
    "score",
    "mostly_fake",
    "user_review_count",
];

pub fn is_derived_column(column: &str) -> bool {
    DERIVED_COLUMNS.contains(&column)
}
