//! Database set up for the application's SQLite file.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the application's tables if they do not already exist.
///
/// Safe to call on every start up.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    tracing::info!("Database is ready");

    Ok(())
}
