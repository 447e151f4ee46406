//! # Error Handling
//!
//! Failures of the materialization run. Data-level absences (unresolvable
//! criteria, missing destinations, unmatched enrichments) are not errors and
//! never reach this module; they are counted and logged by the stages.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading sources, reading reference files or writing views.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A nested JSON column could not be decoded into its expected shape.
    #[error("malformed {column} in {table} row {id}: {source}")]
    MalformedColumn {
        table: &'static str,
        column: &'static str,
        id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read reference file {}: {source}", path.display())]
    ReferenceFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid value in reference file {} at line {line}: {message}", path.display())]
    ReferenceRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl PipelineError {
    pub fn malformed(
        table: &'static str,
        column: &'static str,
        id: i64,
        source: serde_json::Error,
    ) -> Self {
        Self::MalformedColumn {
            table,
            column,
            id,
            source,
        }
    }

    /// Stable code used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::MalformedColumn { .. } => "MALFORMED_COLUMN",
            Self::ReferenceFile { .. } => "REFERENCE_FILE_UNREADABLE",
            Self::ReferenceRecord { .. } => "REFERENCE_RECORD_INVALID",
        }
    }
}
