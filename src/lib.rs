//! Tourism explorer: loads the four tourism tables, derives the dashboard
//! metrics (growth rates, gender gaps, popularity and value rankings, fee
//! buckets) and exports chart-ready datasets with a JSON summary.

pub mod charts;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod reports;
pub mod schema;
pub mod types;
pub mod util;

pub use config::Settings;
pub use error::{ConfigError, OutputError, ProviderError};
pub use loader::{CsvDirSource, LoadReport, MemorySource, TableSource};
pub use schema::TableId;
