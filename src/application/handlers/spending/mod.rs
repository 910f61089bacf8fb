//! Spending handlers.

mod get_spending_summary;

pub use get_spending_summary::{
    GetSpendingSummaryHandler, GetSpendingSummaryQuery, GetSpendingSummaryResult,
};
