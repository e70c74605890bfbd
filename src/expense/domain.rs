//! Core expense domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{Category, ExpenseDate},
};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single recorded monetary outflow.
///
/// Expenses are never edited, only created and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent, always greater than zero.
    ///
    /// Written to JSON as a number with the same digits it was created with.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// When the money was spent.
    pub date: ExpenseDate,
}

/// A validated expense that has not been saved yet.
///
/// To create a new `NewExpense`, use [NewExpense::new].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    category: Category,
    amount: Decimal,
    date: ExpenseDate,
}

impl NewExpense {
    /// Validate the fields of a new expense.
    ///
    /// The amount is checked first, then the category, then the date.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative,
    /// - or [Error::InvalidCategory] if `category` is not a category code,
    /// - or [Error::InvalidDate] if `date` is not an ISO-8601 date or date-time.
    pub fn new(category: &str, amount: Decimal, date: &str) -> Result<Self, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount);
        }

        let category = category.parse()?;
        let date = ExpenseDate::new(date)?;

        Ok(Self {
            category,
            amount,
            date,
        })
    }

    /// The category of the expense.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The amount spent, always greater than zero.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The date of the expense.
    pub fn date(&self) -> &ExpenseDate {
        &self.date
    }
}

/// The JSON body for creating an expense.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub category: String,
    /// Either a JSON number or a string such as `"12.50"`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub date: String,
}

/// Form data for creating an expense from the listing page.
///
/// The amount is kept as text so that a malformed number is reported like
/// any other invalid field.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub category: String,
    pub amount: String,
    pub date: String,
}
