//! The HTML form and link handlers for adding and deleting expenses.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since it handles repeated and empty fields
// instead of rejecting the request like axum::Form.
use axum_extra::extract::Form;
use rust_decimal::Decimal;

use crate::{
    Error, endpoints,
    expense::{
        ExpenseId, ExpenseState, NewExpense, create_expense, delete_expense,
        domain::ExpenseFormData,
    },
};

/// Browsers follow a 301 after a form POST with a GET, which lands the user
/// back on the listing page.
fn redirect_to_list_page() -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(LOCATION, endpoints::LIST_VIEW)],
    )
        .into_response()
}

/// Validate and save an expense from the listing page form, then redirect to
/// the listing page.
///
/// Invalid fields are reported with a 400 error page.
pub async fn add_expense_form_endpoint(
    State(state): State<ExpenseState>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    match save_form(&state, &form) {
        Ok(()) => redirect_to_list_page(),
        Err(error) => {
            tracing::debug!("Rejected expense form {form:?}: {error}");
            error.into_response()
        }
    }
}

fn save_form(state: &ExpenseState, form: &ExpenseFormData) -> Result<(), Error> {
    let amount = Decimal::from_str(form.amount.trim())
        .map_err(|_| Error::InvalidAmount(form.amount.clone()))?;
    let new_expense = NewExpense::new(&form.category, amount, &form.date)?;

    let connection = state.connection()?;
    create_expense(&new_expense, &connection)?;

    Ok(())
}

/// Delete an expense from a link on the listing page, then redirect back to it.
pub async fn delete_expense_link_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let result = state
        .connection()
        .and_then(|connection| delete_expense(expense_id, &connection));

    match result {
        Ok(()) => redirect_to_list_page(),
        Err(error) => error.into_response(),
    }
}
