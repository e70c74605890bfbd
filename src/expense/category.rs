//! The fixed set of spending categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A spending classification for an expense.
///
/// Each category has a short code (used in forms, JSON and the database) and
/// a human readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries, takeaways and eating out.
    Food,
    /// Rent or mortgage payments.
    Rent,
    Health,
    Fun,
    /// Fuel, repairs and other vehicle costs.
    Auto,
    /// Work or study related spending.
    Work,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Rent,
        Category::Health,
        Category::Fun,
        Category::Auto,
        Category::Work,
        Category::Other,
    ];

    /// The short code for the category, e.g. "food".
    pub fn code(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Rent => "rent",
            Category::Health => "health",
            Category::Fun => "fun",
            Category::Auto => "auto",
            Category::Work => "work",
            Category::Other => "other",
        }
    }

    /// The label shown to users, e.g. "Work/Education".
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Health => "Health",
            Category::Fun => "Fun",
            Category::Auto => "Auto",
            Category::Work => "Work/Education",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category code.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCategory] if `s` is not one of the category codes.
    /// Codes are case sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.code() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;

        code.parse().map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
