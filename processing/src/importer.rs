use serde::Serialize;
use std::{
    collections::{HashMap, HashSet},
    io::Read,
};

use crate::{
    error::ProcessingError,
    model::{REQUIRED_COLUMNS, ReviewDataset, ReviewRecord, is_derived_column},
};

/// Field values treated as missing, matching common tabular readers.
pub const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    NA_MARKERS.contains(&value)
}

/// Parsed upload before validation. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct CleaningReport {
    pub original_count: usize,
    pub missing_dropped: usize,
    pub duplicates_dropped: usize,
    pub cleaned_count: usize,
    pub rows_removed: usize,
}

impl CleaningReport {
    pub fn message(&self) -> String {
        format!(
            "File successfully loaded and processed. {} rows were removed during cleaning.",
            self.rows_removed
        )
    }
}

/// Parses delimited text with a header row.
///
/// Short rows are padded with missing values, rows longer than the header are
/// rejected.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, ProcessingError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(csv_reader.headers()?.iter());
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(ProcessingError::MalformedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }

        let row: Vec<Option<String>> = (0..headers.len())
            .map(|i| {
                record
                    .get(i)
                    .filter(|value| !is_missing(value))
                    .map(str::to_string)
            })
            .collect();
        rows.push(row);
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "Read review table");
    Ok(RawTable { headers, rows })
}

// Repeated names get a ".N" suffix, bumped until the name is unused, so every
// column stays addressable. `tag,tag,tag.1` reads as `tag,tag.1,tag.1.1`.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    headers
        .enumerate()
        .map(|(i, header)| {
            let mut name = if i == 0 {
                header.trim_start_matches('\u{feff}').to_string()
            } else {
                header.to_string()
            };
            let mut count = counts.get(&name).copied().unwrap_or_default();
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{}.{}", name, count);
                count = counts.get(&name).copied().unwrap_or_default();
            }
            counts.insert(name.clone(), count + 1);
            name
        })
        .collect()
}

/// Returns the indices of `review_content` and `user_id`.
pub fn validate_columns(table: &RawTable) -> Result<(usize, usize), ProcessingError> {
    let [content, user] = REQUIRED_COLUMNS.map(|column| {
        table
            .column_index(column)
            .ok_or_else(|| ProcessingError::missing_column(column))
    });
    Ok((content?, user?))
}

/// Drops rows missing a required value, then rows repeating an earlier
/// `review_content`. Derived columns present in the input are discarded.
pub fn clean(table: RawTable) -> Result<(ReviewDataset, CleaningReport), ProcessingError> {
    let (content_idx, user_idx) = validate_columns(&table)?;

    let kept: Vec<(usize, &String)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !is_derived_column(header))
        .collect();
    let columns: Vec<String> = kept.iter().map(|(_, h)| (*h).clone()).collect();
    let passthrough: Vec<(usize, &String)> = kept
        .into_iter()
        .filter(|(i, _)| *i != content_idx && *i != user_idx)
        .collect();

    let mut report = CleaningReport {
        original_count: table.rows.len(),
        ..Default::default()
    };
    let mut seen_content: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let (Some(content), Some(user_id)) = (&row[content_idx], &row[user_idx]) else {
            report.missing_dropped += 1;
            continue;
        };
        if !seen_content.insert(content.clone()) {
            report.duplicates_dropped += 1;
            continue;
        }

        let mut record = ReviewRecord::new(content.clone(), user_id.clone());
        for (i, header) in &passthrough {
            let value = row[*i].clone().unwrap_or_default();
            record.passthrough.insert((*header).clone(), value);
        }
        records.push(record);
    }

    report.cleaned_count = records.len();
    report.rows_removed = report.original_count - report.cleaned_count;

    Ok((ReviewDataset::new(columns, records), report))
}

/// Reads, validates and cleans an upload.
pub fn import<R: Read>(reader: R) -> Result<(ReviewDataset, CleaningReport), ProcessingError> {
    let table = read_table(reader)?;
    let (dataset, report) = clean(table)?;

    tracing::info!(
        original = report.original_count,
        cleaned = report.cleaned_count,
        missing = report.missing_dropped,
        duplicates = report.duplicates_dropped,
        "Imported reviews"
    );
    Ok((dataset, report))
}
