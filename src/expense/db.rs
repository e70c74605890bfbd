//! Database operations for expenses.

use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, Row, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
};

/// Save a new expense and return it with its generated ID.
///
/// The insert and the read back happen in one statement, so the returned
/// expense is exactly what was stored.
///
/// # Errors
/// Returns an [Error::SqlError] if the expense could not be written.
pub fn create_expense(expense: &NewExpense, connection: &Connection) -> Result<Expense, Error> {
    // An INSERT ... RETURNING always yields the inserted row, so a missing row
    // is reported as an SQL error rather than a missing expense.
    let expense = connection
        .prepare(
            "INSERT INTO expense (category, amount, date)
             VALUES (?1, ?2, ?3)
             RETURNING id, category, amount, date",
        )?
        .query_row(
            (
                expense.category(),
                expense.amount().to_string(),
                expense.date(),
            ),
            map_row,
        )?;

    tracing::debug!("Created expense {expense:?}");

    Ok(expense)
}

/// Retrieve all expenses, most recent first.
///
/// Expenses with the same date are returned in the order they were created.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, date FROM expense
             ORDER BY datetime(date) DESC, id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a single expense by ID, or `None` if there is no such expense.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Option<Expense>, Error> {
    connection
        .prepare("SELECT id, category, amount, date FROM expense WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// The sum of all expense amounts.
///
/// Returns `None` when there are no expenses, rather than zero.
///
/// # Errors
/// Returns an [Error::TotalOverflow] if the sum does not fit in a [Decimal].
pub fn get_total(connection: &Connection) -> Result<Option<Decimal>, Error> {
    let amounts = connection
        .prepare("SELECT amount FROM expense;")?
        .query_map([], |row| parse_amount(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;

    if amounts.is_empty() {
        return Ok(None);
    }

    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .map(Some)
        .ok_or(Error::TotalOverflow)
}

/// Delete an expense by ID.
///
/// Deleting an expense that does not exist is not an error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    tracing::debug!("Deleted expense {id} ({rows_affected} rows affected)");

    Ok(())
}

/// Create the expense table if it does not already exist.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            amount TEXT NOT NULL,
            date TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn parse_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw_amount: String = row.get(index)?;

    Decimal::from_str(&raw_amount)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: parse_amount(row, 2)?,
        date: row.get(3)?,
    })
}
