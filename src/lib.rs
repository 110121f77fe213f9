//! # oneonone-insights
//!
//! Analytics engine for one-on-one meeting logs.
//!
//! Loads meeting records from a spreadsheet or JSON file, filters them by
//! person, category, and sentiment, and derives KPI counts, urgency
//! trackers, and deterministic insight lines from the resulting view.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod filter;
pub mod insights;
pub mod kpi;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod source;
pub mod telemetry;
pub mod trackers;

pub use dataset::{Dataset, DatasetCache};
pub use engine::{Engine, Snapshot};
pub use error::{Error, Result};
pub use filter::{FilterSelection, filter};
pub use insights::insights;
pub use kpi::aggregate;
pub use lookup::lookup;
pub use model::{KpiSummary, Record, Sentiment, Status};
