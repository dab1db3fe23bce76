use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("The required column '{column}' was not found in the uploaded file.")]
    MissingColumn { column: String },

    #[error("Row {line} has {found} fields but the header has {expected}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Scorer returned {found} results for {expected} reviews")]
    ScorerMismatch { expected: usize, found: usize },

    #[error("Failed to parse CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Exported CSV is not valid UTF-8: {source}")]
    Utf8 {
        #[from]
        source: std::string::FromUtf8Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl ProcessingError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn { column: column.into() }
    }

    /// Whether the upload itself is at fault, as opposed to the service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. } | Self::MalformedRow { .. } | Self::Csv { .. }
        )
    }
}
