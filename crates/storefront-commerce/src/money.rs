//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront trades
//! in a single currency (USD), so no currency tag is carried.
//!
//! On the wire and in persisted records a `Money` is a plain decimal number
//! (`49.99`), matching what the catalog API speaks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary value in US cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal dollar amount, rounding to the
    /// nearest cent.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// Zero dollars.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal dollar value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Multiply by a whole quantity. Saturates at the `i64` bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Multiply by a decimal factor (e.g. a tax rate), rounding to the
    /// nearest cent.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::new((self.amount_cents as f64 * factor).round() as i64)
    }

    /// Format as en-US currency, e.g. `$1,234.56`.
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!(
            "{}${}.{:02}",
            sign,
            group_thousands(cents / 100),
            cents % 100
        )
    }

    /// Format without symbol or grouping, e.g. `1234.56`.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }
}

/// Insert `,` between groups of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a dollar amount the way the storefront displays prices.
pub fn format_currency(amount: Money) -> String {
    amount.display()
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.amount_cents = self.amount_cents.saturating_add(other.amount_cents);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.multiply(i64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("money amount must be finite"));
        }
        Ok(Money::from_decimal(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).amount_cents, 4999);
        assert_eq!(Money::from_decimal(299.99).amount_cents, 29999);
        assert_eq!(Money::from_decimal(0.1 + 0.2).amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(), "$49.99");
        assert_eq!(Money::new(123456).display(), "$1,234.56");
        assert_eq!(Money::new(100000000).display(), "$1,000,000.00");
        assert_eq!(Money::new(5).display(), "$0.05");
        assert_eq!(Money::new(-1500).display(), "-$15.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);
        assert_eq!((a + b).amount_cents, 1500);
        assert_eq!((a - b).amount_cents, 500);
        assert_eq!((a * 3).amount_cents, 3000);
    }

    #[test]
    fn test_money_arithmetic_saturates() {
        let huge = Money::from_decimal(1e17);
        assert_eq!((huge * 2).amount_cents, i64::MAX);
        assert_eq!((Money::new(i64::MAX) + Money::new(1)).amount_cents, i64::MAX);
        assert_eq!((Money::new(i64::MIN) - Money::new(1)).amount_cents, i64::MIN);

        let total: Money = [huge * 10, huge * 10].into_iter().sum();
        assert_eq!(total.amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_multiply_decimal_rounds() {
        // 8% of $19.99 is 159.92 cents
        assert_eq!(Money::new(1999).multiply_decimal(0.08).amount_cents, 160);
        assert_eq!(Money::new(10000).multiply_decimal(0.08).amount_cents, 800);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::new(100), Money::new(250)].into_iter().sum();
        assert_eq!(total.amount_cents, 350);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_money_serializes_as_decimal() {
        let json = serde_json::to_string(&Money::new(4999)).unwrap();
        assert_eq!(json, "49.99");

        let back: Money = serde_json::from_str("299.99").unwrap();
        assert_eq!(back.amount_cents, 29999);

        let whole: Money = serde_json::from_str("15").unwrap();
        assert_eq!(whole.amount_cents, 1500);
    }
}
