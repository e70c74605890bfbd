//! Expense Tracker is a web app for recording personal expenses.
//!
//! This library provides a JSON API alongside server-rendered HTML pages for
//! creating, listing and deleting expenses stored in a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{Category, Expense, ExpenseDate, ExpenseId, NewExpense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{html::error_view, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of an expense was zero or negative.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    /// The amount submitted through a form could not be parsed as a decimal number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The category code is not one of the known categories.
    #[error("Invalid category \"{0}\"")]
    InvalidCategory(String),

    /// The date string is not an ISO-8601 date or date-time.
    #[error("Invalid date format \"{0}\"")]
    InvalidDate(String),

    /// The sum of the stored amounts is too large to represent.
    #[error("the total of all expenses is too large to calculate")]
    TotalOverflow,

    /// The requested expense was not found.
    #[error("Expense not found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NonPositiveAmount
            | Error::InvalidAmount(_)
            | Error::InvalidCategory(_)
            | Error::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError | Error::TotalOverflow => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to clients. Server-side errors get a generic message.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            _ => self.to_string(),
        }
    }

    /// Render the error as a JSON body of the form `{"detail": "..."}`.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status_code, Json(json!({ "detail": self.client_message() }))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.status_code() {
            StatusCode::BAD_REQUEST => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Invalid Expense",
                    "400",
                    &self.to_string(),
                    "Go back and check the category, amount and date.",
                ),
            )
                .into_response(),
            StatusCode::NOT_FOUND => (
                StatusCode::NOT_FOUND,
                error_view(
                    "Not Found",
                    "404",
                    "Expense not found",
                    "It may have already been deleted.",
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            _ => {
                tracing::error!("An unexpected error occurred: {}", self);
                InternalServerError::default().into_response()
            }
        }
    }
}
