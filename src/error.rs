use thiserror::Error;

use crate::schema::TableId;

/// Failures that stop an analysis pass for one table.
///
/// An empty result is reported through the same type so callers display it
/// the same way as a connectivity problem.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("data source for {table} is unavailable: {source}")]
    Unavailable {
        table: TableId,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {table}: {source}")]
    Read {
        table: TableId,
        #[source]
        source: csv::Error,
    },

    #[error("{table} is missing required columns: {}", missing.join(", "))]
    Malformed { table: TableId, missing: Vec<String> },

    #[error("{table} returned no rows")]
    Empty { table: TableId },
}

impl ProviderError {
    pub fn table(&self) -> TableId {
        match self {
            ProviderError::Unavailable { table, .. }
            | ProviderError::Read { table, .. }
            | ProviderError::Malformed { table, .. }
            | ProviderError::Empty { table } => *table,
        }
    }
}

/// Failures while writing exports.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("configuration validation error: {0}")]
    Validation(String),
}
