//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` so that sums like `19.99 * 3` stay
//! exact. Rounding only happens when an amount is formatted for display.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Parse a price as it is shown on a product card (e.g., `"$19.99"`).
    ///
    /// Leading currency symbols and surrounding whitespace are ignored.
    /// Returns `None` when the remaining text is not a decimal number.
    #[must_use]
    pub fn parse_display(text: &str) -> Option<Self> {
        let trimmed = text.trim().trim_start_matches(['$', '€', '£']).trim();
        trimmed.parse::<Decimal>().ok().map(Self::usd)
    }

    /// Amount rounded to cents.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_to_cents(self.amount)
    }

    /// Format for display (e.g., `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

/// Format a USD amount as `"$x.yz"`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    Price::usd(amount).display()
}

/// Round half away from zero and pin the scale to exactly two places.
fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(format_money(dec("59.9")), "$59.90");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(format_money(dec("12")), "$12.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(format_money(dec("4.7976")), "$4.80");
        assert_eq!(format_money(dec("64.7676")), "$64.77");
        assert_eq!(format_money(dec("0.005")), "$0.01");
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(Price::parse_display("$19.99").unwrap().amount, dec("19.99"));
        assert_eq!(Price::parse_display("  $ 5 ").unwrap().amount, dec("5"));
        assert_eq!(Price::parse_display("7.50").unwrap().amount, dec("7.50"));
        assert!(Price::parse_display("free").is_none());
        assert!(Price::parse_display("").is_none());
    }

    #[test]
    fn test_currency_symbols() {
        let eur = Price::new(dec("3.5"), CurrencyCode::EUR);
        assert_eq!(eur.to_string(), "€3.50");
        assert_eq!(Price::new(dec("12"), CurrencyCode::GBP).display(), "£12.00");
        assert_eq!(CurrencyCode::default(), CurrencyCode::USD);
    }
}
