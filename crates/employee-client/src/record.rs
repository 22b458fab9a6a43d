//! Wire types exchanged with the records service.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

const CENTS_PER_UNIT: u64 = 100;
const MAX_FRACTION_DIGITS: usize = 2;

/// Reasons a salary text or number is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SalaryError {
    /// Not a plain non-negative decimal such as `75000` or `91000.5`.
    #[error("salary must be a non-negative decimal number")]
    Invalid,
    /// More than two fractional digits.
    #[error("salary must have at most {MAX_FRACTION_DIGITS} decimal places")]
    TooPrecise,
    /// Does not fit in a count of cents.
    #[error("salary is too large")]
    TooLarge,
}

/// Exact salary amount held as a count of cents.
///
/// Parsed from the service's JSON number (or a numeric string) without going
/// through floating point, so sums stay exact.
///
/// # Examples
/// ```
/// use employee_client::Salary;
///
/// let salary: Salary = "91000.5".parse().expect("valid salary");
/// assert_eq!(salary.cents(), 9_100_050);
/// assert_eq!(salary.to_string(), "91000.5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salary {
    cents: u64,
}

impl Salary {
    /// A zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Build an amount from a count of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Build an amount from whole currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self::from_cents(u64::from(units) * CENTS_PER_UNIT)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Whole currency units, discarding cents.
    #[must_use]
    pub const fn units(self) -> u64 {
        self.cents.div_euclid(CENTS_PER_UNIT)
    }

    /// Cents beyond the whole units, `0..100`.
    #[must_use]
    pub const fn fraction_cents(self) -> u64 {
        self.cents.rem_euclid(CENTS_PER_UNIT)
    }

    /// Add two amounts, clamping at the largest representable value.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(other.cents))
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

impl FromStr for Salary {
    type Err = SalaryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((units, digits)) if !digits.is_empty() => (units, digits),
            Some(_) => return Err(SalaryError::Invalid),
            None => (text, ""),
        };
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(SalaryError::Invalid);
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(SalaryError::TooPrecise);
        }

        let units: u64 = whole.parse().map_err(|_| SalaryError::TooLarge)?;
        let extra_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| SalaryError::Invalid)? * 10,
            _ => fraction.parse::<u64>().map_err(|_| SalaryError::Invalid)?,
        };
        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|cents| cents.checked_add(extra_cents))
            .map(Self::from_cents)
            .ok_or(SalaryError::TooLarge)
    }
}

/// Shortest exact decimal: `75000`, `91000.5`, `91000.25`.
impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.fraction_cents();
        if cents == 0 {
            write!(f, "{}", self.units())
        } else if cents.rem_euclid(10) == 0 {
            write!(f, "{}.{}", self.units(), cents.div_euclid(10))
        } else {
            write!(f, "{}.{cents:02}", self.units())
        }
    }
}

impl Sum for Salary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.fraction_cents() == 0 {
            return serializer.serialize_u64(self.units());
        }
        let number: Number = serde_json::from_str(&self.to_string()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => number.to_string().parse(),
            Value::String(text) => text.parse(),
            _ => Err(SalaryError::Invalid),
        }
        .map_err(D::Error::custom)
    }
}

/// Employee record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Identifier assigned by the service.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Department label.
    pub department: String,
    /// Salary amount.
    pub salary: Salary,
}

/// Request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeInput {
    /// Display name; must not be blank.
    pub name: String,
    /// Department label; must not be blank.
    pub department: String,
    /// Salary amount; whole amounts go on the wire as integers.
    pub salary: Salary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(75000), 7_500_000)]
    #[case(json!(91000.5), 9_100_050)]
    #[case(json!("65000.00"), 6_500_000)]
    #[case(json!(0.25), 25)]
    fn record_reads_service_payload(#[case] salary: Value, #[case] cents: u64) {
        let record: EmployeeRecord = serde_json::from_value(
            json!({ "id": 1, "name": "John Doe", "department": "IT", "salary": salary }),
        )
        .expect("record decodes");
        assert_eq!(record.salary.cents(), cents);
    }

    #[rstest]
    #[case("-1", SalaryError::Invalid)]
    #[case("1e5", SalaryError::Invalid)]
    #[case("12.", SalaryError::Invalid)]
    #[case(".5", SalaryError::Invalid)]
    #[case("1.234", SalaryError::TooPrecise)]
    #[case("99999999999999999999", SalaryError::TooLarge)]
    fn malformed_amounts_are_rejected(#[case] raw: &str, #[case] expected: SalaryError) {
        assert_eq!(raw.parse::<Salary>(), Err(expected));
    }

    #[rstest]
    #[case(Salary::from_units(75_000), "75000")]
    #[case(Salary::from_cents(9_100_050), "91000.5")]
    #[case(Salary::from_cents(9_100_025), "91000.25")]
    #[case(Salary::from_cents(5), "0.05")]
    fn display_is_shortest_exact_decimal(#[case] salary: Salary, #[case] expected: &str) {
        assert_eq!(salary.to_string(), expected);
    }

    #[rstest]
    #[case(Salary::from_units(91_000), r#"{"name":"Ada","department":"R&D","salary":91000}"#)]
    #[case(
        Salary::from_cents(9_100_050),
        r#"{"name":"Ada","department":"R&D","salary":91000.5}"#
    )]
    fn input_sends_salary_as_number(#[case] salary: Salary, #[case] expected: &str) {
        let input = EmployeeInput {
            name: "Ada".to_owned(),
            department: "R&D".to_owned(),
            salary,
        };
        assert_eq!(serde_json::to_string(&input).expect("encodes"), expected);
    }

    #[rstest]
    fn sums_stay_exact() {
        let total: Salary = ["0.1", "0.2", "75000.7"]
            .iter()
            .map(|raw| raw.parse::<Salary>().expect("valid"))
            .sum();
        assert_eq!(total, Salary::from_cents(7_500_100));
    }
}
