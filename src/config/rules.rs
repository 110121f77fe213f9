//! Tunable parameters of the insight rules, loaded from TOML.
//!
//! ```toml
//! [rules]
//! friction_categories = ["Risk/Incident Management", "Projects/Execution"]
//! next_deadlines = 5
//! ```
//!
//! Every field is optional; the defaults reproduce the stock rule set.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Categories whose non-positive records count as friction.
pub const DEFAULT_FRICTION_CATEGORIES: [&str; 3] = [
    "Risk/Incident Management",
    "Process/Quality Metrics",
    "Projects/Execution",
];

/// Top-level TOML wrapper.
#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: InsightRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InsightRules {
    pub friction_categories: Vec<String>,
    /// How many upcoming deadlines the urgency rule lists.
    pub next_deadlines: usize,
}

impl Default for InsightRules {
    fn default() -> Self {
        Self {
            friction_categories: DEFAULT_FRICTION_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            next_deadlines: 3,
        }
    }
}

impl InsightRules {
    /// Parse rules from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::parse(content).map_err(|e| Error::Config(format!("bad rules config: {e}")))
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read rules file {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("bad rules config {}: {e}", path.display())))
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<RulesFile>(content).map(|file| file.rules)
    }

    /// Rules from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn is_friction_category(&self, category: &str) -> bool {
        self.friction_categories.iter().any(|c| c == category)
    }
}
