use std::collections::HashMap;

use super::{REVIEW_CONTENT_COLUMN, USER_ID_COLUMN};

/// One cleaned review row.
///
/// `review_content` and `user_id` are guaranteed to be present. Every other
/// input column is kept verbatim in `passthrough`; missing values are stored
/// as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub review_content: String,
    pub user_id: String,
    pub passthrough: HashMap<String, String>,
}

impl ReviewRecord {
    pub fn new(review_content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            review_content: review_content.into(),
            user_id: user_id.into(),
            passthrough: HashMap::new(),
        }
    }

    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.passthrough.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            REVIEW_CONTENT_COLUMN => Some(&self.review_content),
            USER_ID_COLUMN => Some(&self.user_id),
            _ => self.passthrough.get(column).map(String::as_str),
        }
    }
}

/// Cleaned input ready for scoring. `columns` keeps the input column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewDataset {
    pub columns: Vec<String>,
    pub records: Vec<ReviewRecord>,
}

impl ReviewDataset {
    pub fn new(columns: Vec<String>, records: Vec<ReviewRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
