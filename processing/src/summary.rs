use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{RATING_COLUMN, ScoredDataset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    pub label: String,
    pub count: usize,
}

impl DistributionBucket {
    fn new(label: impl Into<String>, count: usize) -> Self {
        Self { label: label.into(), count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Summary {
    pub total_reviews: usize,
    pub fake_reviews: usize,
    pub fake_percentage: f64,
    pub average_score: f64,
    pub rating_distribution: Vec<DistributionBucket>,
    pub score_distribution: Vec<DistributionBucket>,
}

impl Summary {
    pub fn from_dataset(dataset: &ScoredDataset) -> Self {
        let total_reviews = dataset.len();
        let fake_reviews = dataset.fake_reviews().count();
        let score_sum: u64 = dataset.reviews.iter().map(|r| r.signals.score as u64).sum();

        let (fake_percentage, average_score) = if total_reviews == 0 {
            (0.0, 0.0)
        } else {
            (
                fake_reviews as f64 / total_reviews as f64 * 100.0,
                score_sum as f64 / total_reviews as f64,
            )
        };

        Self {
            total_reviews,
            fake_reviews,
            fake_percentage,
            average_score,
            rating_distribution: rating_distribution(dataset),
            score_distribution: score_distribution(dataset),
        }
    }

    pub fn fake_percentage_display(&self) -> String {
        format!("{:.2}%", self.fake_percentage)
    }

    pub fn average_score_display(&self) -> String {
        format!("{:.2}", self.average_score)
    }
}

/// Count per score value, ascending. Only scores that occur are listed.
pub fn score_distribution(dataset: &ScoredDataset) -> Vec<DistributionBucket> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for review in &dataset.reviews {
        *counts.entry(review.signals.score).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(score, count)| DistributionBucket::new(score.to_string(), count))
        .collect()
}

/// Count per `rating` value. When every rating is a number, equal values are
/// merged ("4", "4.0", " 4") and sorted numerically; otherwise ratings are
/// counted verbatim and sorted lexically. Empty ratings are skipped.
pub fn rating_distribution(dataset: &ScoredDataset) -> Vec<DistributionBucket> {
    if !dataset.has_column(RATING_COLUMN) {
        return Vec::new();
    }

    let ratings: Vec<&str> = dataset
        .reviews
        .iter()
        .filter_map(|review| review.record.get(RATING_COLUMN))
        .filter(|rating| !rating.is_empty())
        .collect();

    let numeric: Option<Vec<f64>> = ratings
        .iter()
        .map(|rating| rating.trim().parse::<f64>().ok())
        .collect();

    match numeric {
        Some(mut values) => {
            values.sort_by(f64::total_cmp);
            values
                .chunk_by(|a, b| a == b)
                .map(|same| DistributionBucket::new(same[0].to_string(), same.len()))
                .collect()
        }
        None => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for rating in ratings {
                *counts.entry(rating).or_insert(0) += 1;
            }
            counts
                .into_iter()
                .map(|(label, count)| DistributionBucket::new(label, count))
                .collect()
        }
    }
}
