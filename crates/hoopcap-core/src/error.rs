// Error type shared by the loader, joiner and writer stages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to access file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// A column the pipeline cannot run without is absent.
    #[error("expected '{column}' column in the {table} table")]
    MissingColumn { table: String, column: String },

    #[error("no salary column found in the salaries table (columns: {})", .columns.join(", "))]
    NoSalaryColumn { columns: Vec<String> },
}

impl PipelineError {
    /// True for the configuration errors: a required column could not be
    /// resolved in one of the input tables.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingColumn { .. } | PipelineError::NoSalaryColumn { .. }
        )
    }

    pub(crate) fn missing_column(table: &str, column: &str) -> Self {
        PipelineError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}
