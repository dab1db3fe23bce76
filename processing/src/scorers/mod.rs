pub mod config;
pub mod heuristic;

pub use config::*;
pub use heuristic::*;

use crate::model::{ReviewRecord, ScoredReview};

/// Turns a cleaned, de-duplicated batch of reviews into scored reviews.
///
/// Implementations must return one result per input record, in input order.
pub trait Scorer: Send + Sync {
    fn score(&self, records: Vec<ReviewRecord>) -> Vec<ScoredReview>;
}
