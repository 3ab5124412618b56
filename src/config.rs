// Runtime settings read from the environment (and `.env`, loaded by `main`).
//
// Command-line flags take precedence; `main` applies them on top of the
// values returned by `Settings::from_env`.
use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::metrics::places::DEFAULT_TOP_N;

pub const DATA_DIR_VAR: &str = "TOURISM_DATA_DIR";
pub const OUT_DIR_VAR: &str = "TOURISM_OUT_DIR";
pub const TOP_N_VAR: &str = "TOURISM_TOP_N";
pub const PREVIEW_ROWS_VAR: &str = "TOURISM_PREVIEW_ROWS";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding one `<TABLE_NAME>.csv` export per table.
    pub data_dir: PathBuf,
    /// Where CSV datasets and JSON summaries are written.
    pub out_dir: PathBuf,
    /// How many places the popularity ranking keeps.
    pub top_n: usize,
    /// Rows shown in each console preview.
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("out"),
            top_n: DEFAULT_TOP_N,
            preview_rows: 5,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let settings = Settings {
            data_dir: lookup(DATA_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            out_dir: lookup(OUT_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.out_dir),
            top_n: parse_count(TOP_N_VAR, lookup(TOP_N_VAR))?.unwrap_or(defaults.top_n),
            preview_rows: parse_count(PREVIEW_ROWS_VAR, lookup(PREVIEW_ROWS_VAR))?
                .unwrap_or(defaults.preview_rows),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Validation(format!("{TOP_N_VAR} must be at least 1")));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!("{DATA_DIR_VAR} must not be empty")));
        }
        Ok(())
    }
}

fn parse_count(key: &'static str, raw: Option<String>) -> Result<Option<usize>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
