//! Static currency conversion.
//!
//! Rates are hardcoded approximations. Good enough for "what do I spend per
//! month", not for accounting.

use rust_decimal::Decimal;

use crate::domain::subscription::Currency;

/// Units of `currency` per one US dollar.
pub fn units_per_usd(currency: Currency) -> Decimal {
    match currency {
        Currency::Usd => Decimal::ONE,
        Currency::Eur => Decimal::new(109, 2),
        Currency::Gbp => Decimal::new(127, 2),
    }
}

/// Converts `amount` from one currency to another through USD.
///
/// 10 EUR is 10 / 1.09 = 9.17 USD; 100 USD is 100 * 1.27 = 127 GBP.
pub fn convert(amount: Decimal, from: Currency, to: Currency) -> Decimal {
    if from == to {
        return amount;
    }
    amount / units_per_usd(from) * units_per_usd(to)
}

/// Formats an amount with its currency symbol and two decimals.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount.round_dp(2))
}
