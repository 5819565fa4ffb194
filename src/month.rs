//! Calendar months used to bucket records, written as `YYYY-MM`.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::Error;

/// A calendar month, e.g. `2024-06`.
///
/// Records are grouped by the month of their date. [MonthKey::from_date] is
/// the single place where that derivation happens in Rust code, and it
/// matches the generated `month` columns in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    /// Create a key for `month` of `year`.
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// The month before this one.
    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        }
    }

    /// The `count` consecutive months that end with this month, oldest first.
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut current = *self;

        for _ in 0..count {
            months.push(current);
            current = current.previous();
        }

        months.reverse();
        months
    }

    /// The three letter English abbreviation of the month, e.g. "Jan".
    pub fn short_label(&self) -> &'static str {
        match self.month {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromSql for MonthKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::Error;

    use super::MonthKey;

    #[test]
    fn derives_from_date() {
        let key = MonthKey::from_date(date!(2024 - 03 - 15));

        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), Month::March);
    }

    #[test]
    fn parses_valid_key() {
        assert_eq!(
            "2025-01".parse::<MonthKey>(),
            Ok(MonthKey::new(2025, Month::January))
        );
    }

    #[test]
    fn rejects_invalid_keys() {
        for invalid in ["", "2024", "2024-13", "2024-00", "24-01", "2024-1", "2024/01", "abcd-ef"] {
            assert_eq!(
                invalid.parse::<MonthKey>(),
                Err(Error::InvalidMonth(invalid.to_owned())),
                "{invalid} should be rejected"
            );
        }
    }

    #[test]
    fn previous_crosses_year_boundary() {
        let key = MonthKey::new(2025, Month::January);

        assert_eq!(key.previous(), MonthKey::new(2024, Month::December));
    }

    #[test]
    fn trailing_months_end_with_self() {
        let months: Vec<String> = MonthKey::new(2025, Month::February)
            .trailing(6)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            months,
            ["2024-09", "2024-10", "2024-11", "2024-12", "2025-01", "2025-02"]
        );
    }

    #[test]
    fn serializes_as_string() {
        let key = MonthKey::new(2024, Month::June);

        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06\"");
        assert_eq!(
            serde_json::from_str::<MonthKey>("\"2024-06\"").unwrap(),
            key
        );
    }
}
