use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use std::{io::Read, time::Instant};
#[cfg(not(test))]
use tracing::{debug, info};
#[cfg(test)]
use {println as debug, println as info};

use crate::{
    error::ProcessingError,
    importer::{self, CleaningReport},
    model::{ReviewDataset, ScoredDataset},
    scorers::Scorer,
    summary::Summary,
};

/// Result of one analysis pass over an upload.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub analyzed_at: DateTime<Utc>,
    pub cleaning: CleaningReport,
    pub summary: Summary,
    pub dataset: ScoredDataset,
}

pub struct ReviewProcessor<S: Scorer> {
    scorer: S,
}

impl<S: Scorer> ReviewProcessor<S> {
    pub fn new(scorer: S) -> Self {
        info!("Initializing new ReviewProcessor");
        Self { scorer }
    }

    /// Imports, cleans, scores and summarizes an upload. Nothing is returned
    /// unless the whole file was scored.
    pub fn analyze<R: Read>(&self, reader: R) -> Result<Analysis, ProcessingError> {
        let started = Instant::now();

        let (dataset, cleaning) = importer::import(reader)?;
        let scored = self.score_dataset(dataset)?;
        let summary = Summary::from_dataset(&scored);

        histogram!("review_guard_analysis_seconds").record(started.elapsed().as_secs_f64());
        counter!("review_guard_reviews_scored").increment(summary.total_reviews as u64);
        counter!("review_guard_reviews_flagged").increment(summary.fake_reviews as u64);

        info!(
            "Analyzed {} reviews, {} flagged as fake ({})",
            summary.total_reviews,
            summary.fake_reviews,
            summary.fake_percentage_display()
        );

        Ok(Analysis {
            analyzed_at: Utc::now(),
            cleaning,
            summary,
            dataset: scored,
        })
    }

    /// Scores an already cleaned dataset, keeping its column layout.
    pub fn score_dataset(&self, dataset: ReviewDataset) -> Result<ScoredDataset, ProcessingError> {
        debug!("Scoring {} reviews", dataset.len());
        let expected = dataset.len();
        let ReviewDataset { columns, records } = dataset;
        let reviews = self.scorer.score(records);

        if reviews.len() != expected {
            return Err(ProcessingError::ScorerMismatch {
                expected,
                found: reviews.len(),
            });
        }

        Ok(ScoredDataset { columns, reviews })
    }
}
