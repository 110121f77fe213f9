//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing.

pub mod rules;

use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet or JSON file holding the meeting log.
    pub source: PathBuf,
    /// Worksheet to read; first sheet when unset.
    pub sheet: Option<String>,
    /// Optional TOML file overriding the insight rule parameters.
    pub rules_path: Option<PathBuf>,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`Config::from_env`], but `source` (when given) stands in for
    /// `INSIGHTS_SOURCE`.
    pub fn load(source: Option<PathBuf>) -> Result<Self> {
        let source = match source {
            Some(path) => path,
            None => PathBuf::from(required_var("INSIGHTS_SOURCE")?),
        };
        Ok(Self {
            source,
            sheet: optional_var("INSIGHTS_SHEET"),
            rules_path: optional_var("INSIGHTS_RULES").map(PathBuf::from),
            otel_endpoint: optional_var("OTEL_ENDPOINT"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("required environment variable {name} is not set")))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
