//! Fixed-point salary amounts.
//!
//! Salaries are exact decimals with two fractional digits, held as a count of
//! cents. The wire form is a JSON number (a numeric string is also accepted
//! on input); the persisted form is canonical decimal text such as
//! `75000.00`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const CENTS_PER_UNIT: u64 = 100;
const MAX_FRACTION_DIGITS: usize = 2;

/// Validation errors returned when parsing a [`Salary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SalaryValidationError {
    /// No digits were supplied.
    #[error("salary must not be empty")]
    Empty,
    /// The amount was below zero.
    #[error("salary must not be negative")]
    Negative,
    /// The text was not a plain decimal number.
    #[error("salary must be a decimal number")]
    Invalid,
    /// More than two fractional digits were supplied.
    #[error("salary must have at most {MAX_FRACTION_DIGITS} decimal places")]
    TooPrecise,
    /// The amount does not fit the supported range.
    #[error("salary is too large")]
    TooLarge,
}

/// Non-negative salary amount with cent precision.
///
/// # Examples
/// ```
/// use records_backend::domain::Salary;
///
/// let salary: Salary = "75000.5".parse().expect("valid salary");
/// assert_eq!(salary.cents(), 7_500_050);
/// assert_eq!(salary.to_string(), "75000.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salary {
    cents: u64,
}

impl Salary {
    /// A zero salary.
    pub const ZERO: Self = Self { cents: 0 };

    /// Build a salary from a whole number of currency units.
    pub fn from_units(units: u32) -> Self {
        Self {
            cents: u64::from(units) * CENTS_PER_UNIT,
        }
    }

    /// Build a salary from a count of cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// The amount expressed in cents.
    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Add two salaries, returning `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.cents.checked_add(other.cents).map(Self::from_cents)
    }

    fn is_whole(&self) -> bool {
        self.cents % CENTS_PER_UNIT == 0
    }
}

fn parse_digits(digits: &str) -> Result<u64, SalaryValidationError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SalaryValidationError::Invalid);
    }
    digits.parse().map_err(|_| SalaryValidationError::TooLarge)
}

impl FromStr for Salary {
    type Err = SalaryValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SalaryValidationError::Empty);
        }
        if text.starts_with('-') {
            return Err(SalaryValidationError::Negative);
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };
        let units = parse_digits(whole)?;
        let fraction_cents = match fraction {
            None => 0,
            Some(digits) if digits.len() > MAX_FRACTION_DIGITS => {
                parse_digits(digits)?;
                return Err(SalaryValidationError::TooPrecise);
            }
            Some(digits) => {
                let value = parse_digits(digits)?;
                if digits.len() == 1 { value * 10 } else { value }
            }
        };

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self::from_cents)
            .ok_or(SalaryValidationError::TooLarge)
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }
}

impl std::iter::Sum for Salary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |total, next| {
            Self::from_cents(total.cents.saturating_add(next.cents))
        })
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            return serializer.serialize_u64(self.cents / CENTS_PER_UNIT);
        }
        let value: f64 = self
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SalaryInput {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match SalaryInput::deserialize(deserializer)? {
            SalaryInput::Number(number) => number.to_string(),
            SalaryInput::Text(text) => text,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
