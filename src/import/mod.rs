//! CSV import and export of leads.

use std::fmt::Display;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod batch;
pub mod columns;
pub mod export;
pub mod reader;

pub use batch::{IMPORT_BATCH_SIZE, create_in_batches, import_leads};
pub use columns::resolve_field;
pub use export::{export_leads_csv, template_csv};
pub use reader::{ParsedImport, parse_leads};

/// Failure that aborts a whole import or export.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single row was left out of an import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowErrorKind {
    #[error("name is missing")]
    MissingName,

    #[error("email is missing")]
    MissingEmail,

    #[error("{0}")]
    Invalid(#[from] TypeConstraintError),

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("could not be saved: {0}")]
    NotSaved(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct RowError {
    /// One-based line in the source file, `0` when unknown.
    pub line: u64,
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(line: u64, kind: impl Into<RowErrorKind>) -> Self {
        Self {
            line,
            kind: kind.into(),
        }
    }
}

/// Outcome of an import: how many rows became leads and why the rest did not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

impl Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} added, {} skipped", self.added, self.skipped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reads_added_and_skipped() {
        let summary = ImportSummary {
            added: 7,
            errors: vec![
                RowError::new(2, RowErrorKind::MissingName),
                RowError::new(5, RowErrorKind::MissingName),
                RowError::new(9, RowErrorKind::MissingEmail),
            ],
        };
        assert_eq!(summary.to_string(), "7 added, 3 skipped");
    }

    #[test]
    fn row_error_mentions_line() {
        let err = RowError::new(4, TypeConstraintError::InvalidPhone);
        assert_eq!(err.to_string(), "line 4: invalid phone number");
    }
}
