//! # Money Module
//!
//! Listed unit prices and exact cart totals.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Page script / stored record         Cart internals                     │
//! │  ───────────────────────────         ──────────────                     │
//! │                                                                         │
//! │  "price": 0.1   ──UnitPrice::new()─► UnitPrice(0.1)   (as listed)       │
//! │  "price": 0.2   ──UnitPrice::new()─► UnitPrice(0.2)                     │
//! │                                          │ Σ price × qty                │
//! │  "total": 0.3   ◄──to_decimal()────  Money(30)  ◄── Money::rounded()    │
//! │                                                                         │
//! │  Rounding happens once, on the summed total (half away from zero),     │
//! │  so 0.30000000000000004 comes out as 0.3 and 2 × 0.125 as 0.25.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::{Money, UnitPrice};
//!
//! let price = UnitPrice::new(0.125).unwrap();
//! assert_eq!(Money::rounded(price.amount() * 2.0), Money::from_cents(25));
//! assert!(UnitPrice::new(0.0).is_none());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// An amount in cents.
///
/// Signed so that differences stay representable. Plain serde writes the
/// cent count; the [`decimal`] helper writes `19.99` for the wire formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a cent count.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2999).to_string(), "$29.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Quantises a decimal amount to the nearest cent, half away from zero.
    ///
    /// `None` for NaN, infinities and amounts beyond the i64 cent range.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(0.1).unwrap().cents(), 10);
    /// assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Decimal amount for JSON and display.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole currency units, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Leftover cents, 0..=99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Rounds a decimal amount to whole cents, half away from zero.
    ///
    /// Never fails: amounts beyond the i64 cent range saturate and NaN
    /// becomes zero (the semantics of an `as` cast).
    #[inline]
    pub fn rounded(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// A product's price per unit, kept exactly as listed.
///
/// Not rounded to cents: sub-cent prices are legal and only the cart total
/// is rounded. Always finite and strictly positive once constructed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(f64);

impl UnitPrice {
    /// `None` unless `amount` is finite and greater than zero.
    ///
    /// ```rust
    /// use storefront_core::money::UnitPrice;
    ///
    /// assert!(UnitPrice::new(0.004).is_some());
    /// assert!(UnitPrice::new(-1.0).is_none());
    /// assert!(UnitPrice::new(f64::NAN).is_none());
    /// ```
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount > 0.0).then_some(UnitPrice(amount))
    }

    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Price × quantity, unrounded.
    #[inline]
    pub fn times(&self, quantity: i64) -> f64 {
        self.0 * quantity as f64
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$12.34` / `-$5.50`. The app swaps in its configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Decimal Serde Helper
// =============================================================================

/// `#[serde(with = "money::decimal")]`: reads and writes `19.99`.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use storefront_core::money::{self, Money};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "money::decimal")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price":19.99}"#).unwrap();
/// assert_eq!(line.price.cents(), 1999);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":19.99}"#);
/// ```
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("{amount} is not a representable amount")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let m = Money::from_cents(-1205);
        assert_eq!(m.dollars(), -12);
        assert_eq!(m.cents_part(), 5);
        assert_eq!(m.cents(), -1205);
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(0.125).map(|m| m.cents()), Some(13));
        assert_eq!(Money::from_decimal(-0.125).map(|m| m.cents()), Some(-13));
        assert_eq!(Money::from_decimal(29.99).map(|m| m.cents()), Some(2999));
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e300).is_none());
    }

    #[test]
    fn test_rounded_sum_has_no_float_artifacts() {
        assert_eq!(Money::rounded(0.1 + 0.2).to_decimal(), 0.3);
        assert_eq!(Money::rounded(0.125 * 2.0).cents(), 25);
        assert_eq!(Money::rounded(0.125).cents(), 13);
        assert_eq!(Money::rounded(-0.125).cents(), -13);
    }

    #[test]
    fn test_rounded_saturates() {
        assert_eq!(Money::rounded(f64::INFINITY).cents(), i64::MAX);
        assert_eq!(Money::rounded(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_unit_price_keeps_sub_cent_amounts() {
        let price = UnitPrice::new(0.004).unwrap();
        assert_eq!(price.amount(), 0.004);
        assert_eq!(price.times(3), 0.004 * 3.0);
        assert_eq!(serde_json::to_string(&price).unwrap(), "0.004");
    }

    #[test]
    fn test_unit_price_rejects_non_positive() {
        assert!(UnitPrice::new(0.0).is_none());
        assert!(UnitPrice::new(-0.01).is_none());
        assert!(UnitPrice::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(400).to_string(), "$4.00");
        assert_eq!(Money::from_cents(-7).to_string(), "-$0.07");
    }

    #[test]
    fn test_decimal_serde_rejects_garbage() {
        #[derive(Debug, Deserialize)]
        struct Line {
            #[serde(with = "decimal")]
            #[allow(dead_code)]
            price: Money,
        }

        assert!(serde_json::from_str::<Line>(r#"{"price":"cheap"}"#).is_err());
        assert!(serde_json::from_str::<Line>(r#"{"price":1e400}"#).is_err());
    }
}
