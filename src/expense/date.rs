//! Validated ISO-8601 date strings for expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DATE_TIME_FORMATS: [&[BorrowedFormatItem<'_>]; 3] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
];

const OFFSET_DATE_TIME_FORMATS: [&[BorrowedFormatItem<'_>]; 3] = [
    format_description!(
        "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
    ),
    format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
    ),
    format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
    ),
];

/// The date (and optionally time) of an expense.
///
/// Accepts ISO-8601 calendar dates such as `2024-01-31`, and date-times with
/// minute, second or fractional second precision such as `2024-01-31T09:30`
/// or `2024-01-31 09:30:15.250+13:00`. A `Z` suffix means UTC.
/// These are the same forms SQLite's date functions understand, which keeps
/// the database ordering consistent with what is accepted here.
///
/// The original string is kept as is, so an expense's date is echoed back
/// exactly as it was submitted. Past and future dates are both allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseDate(String);

impl ExpenseDate {
    /// Validate `date` as an ISO-8601 date or date-time.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidDate] if `date` cannot be parsed.
    pub fn new(date: &str) -> Result<Self, Error> {
        if is_iso_8601(date) {
            Ok(Self(date.to_owned()))
        } else {
            Err(Error::InvalidDate(date.to_owned()))
        }
    }

    /// Create a date without validation.
    ///
    /// The caller should ensure that the string is a valid ISO-8601 date.
    pub fn new_unchecked(date: &str) -> Self {
        Self(date.to_owned())
    }
}

fn is_iso_8601(date: &str) -> bool {
    if Date::parse(date, DATE_FORMAT).is_ok() {
        return true;
    }

    // The date and time may be separated by a space instead of a 'T'.
    let normalized = match date.as_bytes().get(10) {
        Some(b' ') => format!("{}T{}", &date[..10], &date[11..]),
        _ => date.to_owned(),
    };

    if let Some(utc) = normalized.strip_suffix('Z') {
        let with_offset = format!("{utc}+00:00");

        return OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|format| OffsetDateTime::parse(&with_offset, format).is_ok());
    }

    DATE_TIME_FORMATS
        .iter()
        .any(|format| PrimitiveDateTime::parse(&normalized, format).is_ok())
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|format| OffsetDateTime::parse(&normalized, format).is_ok())
}

impl AsRef<str> for ExpenseDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpenseDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseDate::new(s)
    }
}

impl TryFrom<String> for ExpenseDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ExpenseDate::new(&value)
    }
}

impl From<ExpenseDate> for String {
    fn from(value: ExpenseDate) -> Self {
        value.0
    }
}

impl Display for ExpenseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for ExpenseDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for ExpenseDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(ExpenseDate::new_unchecked)
    }
}
