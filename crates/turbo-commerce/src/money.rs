//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents). Remote prices arrive as decimal
//! numbers and are converted once, at the boundary; every later computation
//! is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use turbo_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Clamp negative amounts to zero.
    pub fn non_negative(self) -> Self {
        Self::new(self.amount_cents.max(0), self.currency)
    }

    /// Convert to a decimal value. Display and wire use only.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    ///
    /// Built from the integer amount so no float rounding can leak into
    /// what the user sees.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        if places == 0 {
            return format!("{}{}", sign, abs);
        }
        let divisor = self.currency.minor_per_major() as u64;
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }

    /// Try to add another Money value.
    ///
    /// Returns None if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by an integer factor (e.g. a quantity).
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Apply a rate expressed in basis points (1/100 of a percent),
    /// rounding half away from zero to the nearest minor unit.
    ///
    /// ```
    /// use turbo_commerce::money::{Money, Currency};
    /// let tax = Money::new(1999, Currency::USD).try_apply_rate_bps(1000).unwrap();
    /// assert_eq!(tax.amount_cents, 200); // 199.9 cents
    /// ```
    pub fn try_apply_rate_bps(&self, bps: u32) -> Option<Money> {
        let scaled = i128::from(self.amount_cents) * i128::from(bps);
        let half = if scaled < 0 { -5_000 } else { 5_000 };
        let amount = (scaled + half) / 10_000;
        i64::try_from(amount)
            .ok()
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        // 0.1 + 0.2 style drift must not survive conversion
        let m = Money::from_decimal(0.1 + 0.2, Currency::USD);
        assert_eq!(m.amount_cents, 30);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(22000, Currency::USD).display(), "$220.00");
        assert_eq!(Money::new(5, Currency::USD).display_amount(), "0.05");
        assert_eq!(Money::new(-150, Currency::USD).display_amount(), "-1.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::new(i64::MAX, Currency::USD);
        assert!(big.try_add(&Money::new(1, Currency::USD)).is_none());
        assert!(big.try_multiply(2).is_none());
    }

    #[test]
    fn test_apply_rate_bps_rounding() {
        let ten_percent = |cents| {
            Money::new(cents, Currency::USD)
                .try_apply_rate_bps(1000)
                .unwrap()
                .amount_cents
        };
        assert_eq!(ten_percent(20000), 2000);
        assert_eq!(ten_percent(5), 1); // 0.5 rounds up
        assert_eq!(ten_percent(4), 0);
        assert_eq!(ten_percent(0), 0);
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::USD),
            Money::new(250, Currency::USD),
        ];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 350);
        assert!(Money::try_sum(std::iter::empty(), Currency::USD)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
