use std::collections::HashMap;

use crate::{
    model::{ReviewRecord, ReviewSignals, ScoredReview},
    scorers::{Scorer, ScoringConfig},
};

/// Flags reviews from repetitive or one-time reviewers and reviews with
/// extreme sentiment vocabulary. Each triggered signal adds one point.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    config: ScoringConfig,
}

impl HeuristicScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    fn user_review_counts(records: &[ReviewRecord]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for record in records {
            *counts.entry(record.user_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn signals(&self, review_content: &str, user_review_count: usize) -> ReviewSignals {
        let thresholds = &self.config.thresholds;
        let lowered = review_content.to_lowercase();

        let positive_count = self.config.positive_words.count_matches(&lowered);
        let negative_count = self.config.negative_words.count_matches(&lowered);

        let repetitive_user = user_review_count > thresholds.repetitive_user_above;
        let too_positive = positive_count >= thresholds.too_positive_at_least;
        let too_negative = negative_count >= thresholds.too_negative_at_least;
        let one_time_reviewer = user_review_count == 1;

        let score = [repetitive_user, too_positive, too_negative, one_time_reviewer]
            .iter()
            .filter(|signal| **signal)
            .count() as u8;

        ReviewSignals {
            user_review_count,
            repetitive_user,
            positive_count,
            too_positive,
            negative_count,
            too_negative,
            one_time_reviewer,
            score,
            mostly_fake: score >= thresholds.fake_score_at_least,
        }
    }
}

impl Scorer for HeuristicScorer {
    fn score(&self, records: Vec<ReviewRecord>) -> Vec<ScoredReview> {
        let counts = Self::user_review_counts(&records);

        let scored: Vec<ScoredReview> = records
            .into_iter()
            .map(|record| {
                let user_review_count = counts.get(&record.user_id).copied().unwrap_or(1);
                let signals = self.signals(&record.review_content, user_review_count);
                ScoredReview { record, signals }
            })
            .collect();

        tracing::debug!(
            reviews = scored.len(),
            users = counts.len(),
            "Scored reviews"
        );
        scored
    }
}
