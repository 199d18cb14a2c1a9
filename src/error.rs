use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in `{path}`: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("`{path}` has no `{column}` column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid expiration date `{value}` (expected DD/MM/YYYY)")]
    InvalidExpiration { value: String },

    #[error("Unsupported chart format `{extension}`. Use: png, svg")]
    UnsupportedFormat { extension: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Viewer `{program}` failed: {reason}")]
    Viewer { program: String, reason: String },
}

pub type Result<T> = std::result::Result<T, VolChartError>;

impl VolChartError {
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}
