use thiserror::Error;

/// Closed failure taxonomy for one ingestion call.
///
/// Every variant is terminal for the current call; the core never retries.
/// Re-uploading a corrected file is a caller concern.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input could not be parsed as delimited text at all.
    #[error("unreadable input: {0}")]
    Format(String),

    /// A required column is absent after header normalization.
    #[error("missing required column '{column}'")]
    Schema { column: String },

    /// A numeric field failed to parse as a finite number.
    #[error("row {row}, column '{column}': cannot parse '{value}' as a finite number")]
    Parse {
        /// 1-based data row number (the header row is not counted).
        row: usize,
        column: String,
        value: String,
    },

    /// The file was well-formed but carried zero data rows.
    #[error("dataset contains no data rows")]
    EmptyDataset,

    /// The history repository failed to load or save entries.
    #[error("history persistence failed: {0}")]
    Persistence(String),
}

impl IngestError {
    /// Stable machine-readable kind, for callers that dispatch on failure
    /// class rather than message text.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Format(_) => "format",
            IngestError::Schema { .. } => "schema",
            IngestError::Parse { .. } => "parse",
            IngestError::EmptyDataset => "empty_dataset",
            IngestError::Persistence(_) => "persistence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_row_and_column() {
        let err = IngestError::Parse {
            row: 3,
            column: "flowrate".to_string(),
            value: "abc".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("row 3"));
        assert!(message.contains("'flowrate'"));
        assert!(message.contains("'abc'"));
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            IngestError::Format("bad".into()),
            IngestError::Schema {
                column: "pressure".into(),
            },
            IngestError::Parse {
                row: 1,
                column: "pressure".into(),
                value: "x".into(),
            },
            IngestError::EmptyDataset,
            IngestError::Persistence("disk full".into()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }
}
