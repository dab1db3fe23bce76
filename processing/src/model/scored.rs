use serde_json::Value;

use super::ReviewRecord;

/// Heuristic signals derived for a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewSignals {
    pub user_review_count: usize,
    pub repetitive_user: bool,
    pub positive_count: usize,
    pub too_positive: bool,
    pub negative_count: usize,
    pub too_negative: bool,
    pub one_time_reviewer: bool,
    pub score: u8,
    pub mostly_fake: bool,
}

impl ReviewSignals {
    /// Numeric value of a derived column; flags are 0/1.
    pub fn value(&self, column: &str) -> Option<u64> {
        let value = match column {
            "user_review_count" => self.user_review_count as u64,
            "repetitive_user" => self.repetitive_user as u64,
            "positive_count" => self.positive_count as u64,
            "too_positive" => self.too_positive as u64,
            "negative_count" => self.negative_count as u64,
            "too_negative" => self.too_negative as u64,
            "one_time_reviewer" => self.one_time_reviewer as u64,
            "score" => self.score as u64,
            "mostly_fake" => self.mostly_fake as u64,
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredReview {
    pub record: ReviewRecord,
    pub signals: ReviewSignals,
}

impl ScoredReview {
    /// Text value of any input or derived column.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.signals.value(column) {
            Some(v) => Some(v.to_string()),
            None => self.record.get(column).map(str::to_string),
        }
    }

    /// JSON value of any input or derived column. Derived columns are numbers.
    pub fn json(&self, column: &str) -> Option<Value> {
        match self.signals.value(column) {
            Some(v) => Some(Value::from(v)),
            None => self.record.get(column).map(Value::from),
        }
    }
}

/// Scorer output: the input columns plus one signal set per record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredDataset {
    pub columns: Vec<String>,
    pub reviews: Vec<ScoredReview>,
}

impl ScoredDataset {
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn fake_reviews(&self) -> impl Iterator<Item = &ScoredReview> {
        self.reviews.iter().filter(|r| r.signals.mostly_fake)
    }
}
