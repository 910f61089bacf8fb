//! Spending module - upcoming payments and spend totals.

mod exchange;
mod summary;
mod upcoming;

pub use exchange::{convert, format_amount, units_per_usd};
pub use summary::{
    monthly_equivalent, summarize, CategorySpend, SpendingSummary, SubscriptionSpend,
};
pub use upcoming::{sort_upcoming, upcoming_payment, UpcomingPayment};
