//! Clock port.

use chrono::NaiveDate;

/// Source of "today". Computed once per run so every subscription in a run is
/// evaluated against the same date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
