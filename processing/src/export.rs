use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Write;
use strum_macros::{Display, EnumString};

use crate::{
    error::ProcessingError,
    model::{DERIVED_COLUMNS, DISPLAY_COLUMNS, ScoredDataset, ScoredReview, is_derived_column},
};

pub const FAKE_REVIEWS_FILE_NAME: &str = "fake_reviews.csv";
pub const ALL_REVIEWS_FILE_NAME: &str = "reviews.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportView {
    /// The reviewer-facing subset of columns.
    #[default]
    Display,
    /// Every input column followed by every derived column.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RowFilter {
    All,
    #[default]
    Fake,
}

impl RowFilter {
    pub fn accepts(&self, review: &ScoredReview) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::Fake => review.signals.mostly_fake,
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            RowFilter::All => ALL_REVIEWS_FILE_NAME,
            RowFilter::Fake => FAKE_REVIEWS_FILE_NAME,
        }
    }
}

pub fn export_columns(dataset: &ScoredDataset, view: ExportView) -> Vec<String> {
    match view {
        ExportView::Display => DISPLAY_COLUMNS
            .iter()
            .filter(|column| is_derived_column(column) || dataset.has_column(column))
            .map(|column| column.to_string())
            .collect(),
        ExportView::Full => dataset
            .columns
            .iter()
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
            .collect(),
    }
}

/// Writes the selected rows as CSV with a header row. Returns the number of
/// data rows written.
pub fn write_csv<W: Write>(
    writer: W,
    dataset: &ScoredDataset,
    view: ExportView,
    filter: RowFilter,
) -> Result<usize, ProcessingError> {
    let columns = export_columns(dataset, view);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;

    let mut written = 0;
    for review in dataset.reviews.iter().filter(|r| filter.accepts(r)) {
        let row: Vec<String> = columns
            .iter()
            .map(|column| review.text(column).unwrap_or_default())
            .collect();
        csv_writer.write_record(&row)?;
        written += 1;
    }

    csv_writer.flush()?;
    Ok(written)
}

pub fn to_csv_string(
    dataset: &ScoredDataset,
    view: ExportView,
    filter: RowFilter,
) -> Result<String, ProcessingError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, dataset, view, filter)?;
    Ok(String::from_utf8(buffer)?)
}

/// Rows as JSON objects keyed by column name.
pub fn to_json_rows(
    dataset: &ScoredDataset,
    view: ExportView,
    filter: RowFilter,
) -> Vec<Map<String, Value>> {
    let columns = export_columns(dataset, view);
    dataset
        .reviews
        .iter()
        .filter(|r| filter.accepts(r))
        .map(|review| {
            columns
                .iter()
                .map(|column| (column.clone(), review.json(column).unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}
