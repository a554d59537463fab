//! Shared reference data, filter model and dataset derivation for the
//! AccessTrial dashboards.

pub mod classify;
pub mod config;
pub mod derive;
pub mod errors;
pub mod pages;
pub mod presentation;
pub mod reference;
pub mod types;

#[cfg(feature = "server")]
pub mod metrics;

pub use derive::derive_metrics;
pub use errors::{InsightError, Result};
pub use reference::ReferenceData;
pub use types::{DerivedMetrics, FilterState, Period, Selection};
