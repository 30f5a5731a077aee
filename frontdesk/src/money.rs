//! Monetary amounts as integer cents.
//!
//! Prices are stored and computed in whole cents to keep nightly-rate
//! multiplication exact; floating point is never involved in billing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A monetary amount in cents.
///
/// Amounts are non-negative. Rates and totals are both represented with
/// this type; a zero amount is valid (a same-day stay prices at zero
/// nights).
///
/// # Examples
///
/// ```
/// use frontdesk::Money;
///
/// let rate = Money::parse("100.00").unwrap();
/// assert_eq!(rate.cents(), 10_000);
/// assert_eq!(format!("{rate}"), "100.00");
///
/// let total = rate.checked_mul(2).unwrap();
/// assert_eq!(format!("{total}"), "200.00");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a number of cents.
    ///
    /// # Errors
    ///
    /// Returns an error if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self, InvalidMoneyError> {
        if cents < 0 {
            return Err(InvalidMoneyError {
                input: cents.to_string(),
                reason: "amount must not be negative".into(),
            });
        }
        Ok(Self(cents))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplies the amount by a count (e.g. nights), checking for overflow.
    ///
    /// Returns `None` on overflow or when `count` is negative.
    #[must_use]
    pub fn checked_mul(self, count: i64) -> Option<Self> {
        if count < 0 {
            return None;
        }
        self.0.checked_mul(count).map(Self)
    }

    /// Adds two amounts, checking for overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Parses an amount from a decimal string like `"100.00"` or `"75.5"`.
    ///
    /// At most two fractional digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error for negative amounts, malformed input, or more than
    /// two fractional digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontdesk::Money;
    ///
    /// assert_eq!(Money::parse("100").unwrap().cents(), 10_000);
    /// assert_eq!(Money::parse("75.5").unwrap().cents(), 7_550);
    /// assert_eq!(Money::parse("0.99").unwrap().cents(), 99);
    /// assert!(Money::parse("-1").is_err());
    /// assert!(Money::parse("1.234").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, InvalidMoneyError> {
        let err = |reason: &str| InvalidMoneyError {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.starts_with('-') {
            return Err(err("amount must not be negative"));
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(err("empty amount"));
        }
        if frac.len() > 2 {
            return Err(err("at most two fractional digits"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err("invalid whole part"))?
        };
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<2}");
            padded.parse().map_err(|_| err("invalid fractional part"))?
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Self)
            .ok_or_else(|| err("amount out of range"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Error type for invalid monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMoneyError {
    /// The offending input.
    pub input: String,
    /// The reason the amount is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidMoneyError {}
