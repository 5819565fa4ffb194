//! Serde helpers for dates written as `YYYY-MM-DD`.
//!
//! Dates may also arrive as ISO 8601 date-times, e.g. `2024-03-15T00:00:00.000Z`,
//! in which case only the date part is kept.

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Parse a date from `text`, see the module docs for the accepted formats.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` does not start with a valid date,
/// or if the year is not written as exactly four digits.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let date_part = match text.split_once('T') {
        Some((date, _)) => date,
        None => text,
    };
    let date_part = date_part.trim();

    // Stored dates must keep `YYYY-MM` as their first seven characters.
    if !has_four_digit_year(date_part) {
        return Err(Error::InvalidDate(text.to_owned()));
    }

    Date::parse(date_part, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

fn has_four_digit_year(date_part: &str) -> bool {
    match date_part.as_bytes() {
        [y1, y2, y3, y4, b'-', ..] => [y1, y2, y3, y4].iter().all(|byte| byte.is_ascii_digit()),
        _ => false,
    }
}

/// Format `date` as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text).map_err(serde::de::Error::custom)
}

/// The same as the parent module for optional dates.
///
/// A missing value, `null`, or an empty string all become `None`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::{format_date, parse_date};

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => parse_date(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::{format_date, parse_date};

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_date("2024-03-15"), Ok(date!(2024 - 03 - 15)));
    }

    #[test]
    fn parses_date_time() {
        assert_eq!(
            parse_date("2024-07-02T00:00:00.000Z"),
            Ok(date!(2024 - 07 - 02))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_date("next tuesday"),
            Err(Error::InvalidDate("next tuesday".to_owned()))
        );
        assert_eq!(
            parse_date("2024-02-30"),
            Err(Error::InvalidDate("2024-02-30".to_owned()))
        );
    }

    #[test]
    fn rejects_signed_and_long_years() {
        for text in ["-0001-03-15", "+2024-03-15", "10000-03-15", "24-03-15"] {
            assert_eq!(
                parse_date(text),
                Err(Error::InvalidDate(text.to_owned())),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_padding() {
        assert_eq!(format_date(date!(2024 - 01 - 02)), "2024-01-02");
    }
}
