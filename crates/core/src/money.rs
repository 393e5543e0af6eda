//! Money in minor units.
//!
//! Every monetary value is persisted as an integer count of minor units
//! (cents). Form input arrives in major units ("45.50") and is scaled by 100
//! exactly once, here.

use serde::Serialize;
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// Largest minor-unit count that survives the trip through `f64` unchanged.
pub const MAX_MINOR_UNITS: i64 = 9_007_199_254_740_991;

const MINOR_PER_MAJOR: f64 = 100.0;

/// Why a submitted amount was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    #[error("Please enter a valid amount.")]
    NotANumber,

    #[error("Please enter an amount greater than $0.")]
    NotPositive,

    #[error("Please enter a smaller amount.")]
    TooLarge,
}

/// A strictly positive amount of money, in minor units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Coerce a major-unit form value ("45.50") into minor units.
    ///
    /// Whitespace is trimmed and an empty string counts as zero, matching
    /// how browsers coerce numeric form fields. The result is
    /// `round(value * 100)`, which must be positive.
    pub fn parse_major(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            0.0
        } else {
            trimmed.parse::<f64>().map_err(|_| AmountError::NotANumber)?
        };

        if !value.is_finite() {
            return Err(AmountError::NotANumber);
        }

        let minor = (value * MINOR_PER_MAJOR).round();
        if minor <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        if minor > MAX_MINOR_UNITS as f64 {
            return Err(AmountError::TooLarge);
        }

        Ok(Self(minor as i64))
    }

    /// Rehydrate an amount read back from storage.
    pub fn from_minor_units(minor: i64) -> DomainResult<Self> {
        if minor <= 0 {
            return Err(DomainError::invariant(format!(
                "amount must be positive, got {minor} minor units"
            )));
        }
        Ok(Self(minor))
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

/// Renders as US currency, e.g. `$1,234.56`.
impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let whole = (self.0 / 100).to_string();
        let cents = self.0 % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "${grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scales_major_units_by_one_hundred() {
        assert_eq!(Amount::parse_major("45.50").unwrap().minor_units(), 4550);
        assert_eq!(Amount::parse_major("1").unwrap().minor_units(), 100);
        assert_eq!(Amount::parse_major(" 0.01 ").unwrap().minor_units(), 1);
    }

    #[test]
    fn rounds_fractions_of_a_cent() {
        assert_eq!(Amount::parse_major("10.006").unwrap().minor_units(), 1001);
        assert_eq!(Amount::parse_major("10.004").unwrap().minor_units(), 1000);
    }

    #[test]
    fn rejects_zero_negative_and_empty() {
        assert_eq!(Amount::parse_major("0"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse_major("-3"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse_major(""), Err(AmountError::NotPositive));
        // Rounds down to zero cents.
        assert_eq!(Amount::parse_major("0.004"), Err(AmountError::NotPositive));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(Amount::parse_major("abc"), Err(AmountError::NotANumber));
        assert_eq!(Amount::parse_major("NaN"), Err(AmountError::NotANumber));
        assert_eq!(Amount::parse_major("inf"), Err(AmountError::NotANumber));
    }

    #[test]
    fn rejects_amounts_beyond_exact_range() {
        assert_eq!(Amount::parse_major("1e300"), Err(AmountError::TooLarge));
    }

    #[test]
    fn stored_amounts_must_be_positive() {
        assert!(Amount::from_minor_units(0).is_err());
        assert!(Amount::from_minor_units(-1).is_err());
        assert_eq!(Amount::from_minor_units(4550).unwrap().minor_units(), 4550);
    }

    #[test]
    fn displays_as_currency() {
        assert_eq!(Amount::from_minor_units(4550).unwrap().to_string(), "$45.50");
        assert_eq!(Amount::from_minor_units(5).unwrap().to_string(), "$0.05");
        assert_eq!(
            Amount::from_minor_units(123_456_789).unwrap().to_string(),
            "$1,234,567.89"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Any two-decimal input is persisted as exactly its cent count.
        #[test]
        fn two_decimal_input_maps_to_exact_cents(cents in 1i64..100_000_000_000i64) {
            let raw = format!("{}.{:02}", cents / 100, cents % 100);
            let amount = Amount::parse_major(&raw).unwrap();
            prop_assert_eq!(amount.minor_units(), cents);
        }

        /// Stored value is always round(input * 100).
        #[test]
        fn persisted_amount_is_rounded_product(value in 0.01f64..1_000_000_000.0f64) {
            let amount = Amount::parse_major(&value.to_string()).unwrap();
            prop_assert_eq!(amount.minor_units(), (value * 100.0).round() as i64);
        }

        #[test]
        fn non_positive_input_is_rejected(value in -1_000_000.0f64..=0.0f64) {
            prop_assert_eq!(
                Amount::parse_major(&value.to_string()),
                Err(AmountError::NotPositive)
            );
        }
    }
}
