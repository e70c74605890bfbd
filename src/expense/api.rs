//! JSON endpoints for expenses.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::{
    Error,
    expense::{
        Category, ExpenseId, ExpenseState, NewExpense, create_expense, delete_expense,
        domain::CreateExpenseRequest, get_all_expenses, get_expense, get_total,
    },
};

/// Render `result` as JSON, or as a JSON error body.
fn json_response<T: Serialize>(result: Result<T, Error>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// List every expense, most recent first, as `{"data": [...]}`.
pub async fn get_expenses_endpoint(State(state): State<ExpenseState>) -> Response {
    let result = state.connection().and_then(|connection| {
        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))
    });

    json_response(result.map(|expenses| json!({ "data": expenses })))
}

/// Validate and save a new expense, responding with the saved expense.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Response {
    let new_expense = match NewExpense::new(&request.category, request.amount, &request.date) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("Rejected expense {request:?}: {error}");
            return error.into_json_response();
        }
    };

    json_response(
        state
            .connection()
            .and_then(|connection| create_expense(&new_expense, &connection)),
    )
}

/// Get a single expense, or a 404 if it does not exist.
pub async fn get_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let result = state
        .connection()
        .and_then(|connection| get_expense(expense_id, &connection))
        .and_then(|maybe_expense| maybe_expense.ok_or(Error::NotFound));

    json_response(result)
}

/// Delete an expense. Responds with `null` whether or not the expense existed.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    json_response(
        state
            .connection()
            .and_then(|connection| delete_expense(expense_id, &connection)),
    )
}

#[derive(Debug, Serialize)]
struct TotalResponse {
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    total: Option<Decimal>,
}

/// The sum of all expenses as `{"total": 12.50}`, or `{"total": null}` with no expenses.
pub async fn get_total_endpoint(State(state): State<ExpenseState>) -> Response {
    let result = state
        .connection()
        .and_then(|connection| get_total(&connection))
        .map(|total| TotalResponse { total });

    json_response(result)
}

/// A category code and its label.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// The code used in forms, JSON and the database, e.g. "work".
    pub code: &'static str,
    /// The name shown to users, e.g. "Work/Education".
    pub label: &'static str,
}

/// The category codes and their labels.
pub async fn get_categories_endpoint() -> Json<Vec<CategoryResponse>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|category| CategoryResponse {
                code: category.code(),
                label: category.label(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod expense_api_tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        expense::{
            Expense, ExpenseState, NewExpense, create_expense, get_all_expenses,
            state::get_test_state,
        },
    };

    use super::{
        create_expense_endpoint, delete_expense_endpoint, get_categories_endpoint,
        get_expense_endpoint, get_expenses_endpoint, get_total_endpoint,
    };

    fn get_test_server(state: ExpenseState) -> TestServer {
        let app = Router::new()
            .route(
                endpoints::EXPENSES_API,
                get(get_expenses_endpoint).post(create_expense_endpoint),
            )
            .route(endpoints::TOTAL_API, get(get_total_endpoint))
            .route(
                endpoints::EXPENSE_API,
                get(get_expense_endpoint).delete(delete_expense_endpoint),
            )
            .route(endpoints::CATEGORIES_API, get(get_categories_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    fn insert(state: &ExpenseState, category: &str, amount: Decimal, date: &str) -> Expense {
        let new_expense = NewExpense::new(category, amount, date).unwrap();

        create_expense(&new_expense, &state.db_connection.lock().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn create_expense_succeeds() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"category": "food", "amount": 12.50, "date": "2024-01-01"}))
            .await;

        response.assert_status_ok();
        let expense = response.json::<Expense>();
        assert!(expense.id > 0);
        assert_eq!(expense.amount, dec!(12.50));
        assert_eq!(expense.date.as_ref(), "2024-01-01");
        assert_eq!(
            get_all_expenses(&state.db_connection.lock().unwrap()).unwrap(),
            vec![expense]
        );
    }

    #[tokio::test]
    async fn create_expense_returns_amount_digits_unchanged() {
        let server = get_test_server(get_test_state());
        let body: Value =
            serde_json::from_str(r#"{"category": "food", "amount": 12.50, "date": "2024-01-01"}"#)
                .unwrap();

        let response = server.post(endpoints::EXPENSES_API).json(&body).await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains(r#""amount":12.50"#), "got {text}");
        assert!(text.contains(r#""category":"food""#), "got {text}");
        assert!(text.contains(r#""date":"2024-01-01""#), "got {text}");
    }

    #[tokio::test]
    async fn create_expense_accepts_amount_as_string() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"category": "rent", "amount": "1500.00", "date": "2024-01-01"}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Expense>().amount, dec!(1500));
    }

    #[track_caller]
    fn assert_detail(body: &Value, want_prefix: &str) {
        let detail = body["detail"].as_str().expect("detail missing from body");

        assert!(
            detail.starts_with(want_prefix),
            "want detail starting with {want_prefix:?}, got {detail:?}"
        );
    }

    #[tokio::test]
    async fn create_expense_rejects_negative_amount() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"category": "food", "amount": -5, "date": "2024-01-01"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_detail(&response.json::<Value>(), "Amount must be greater than 0");
        assert!(
            get_all_expenses(&state.db_connection.lock().unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn create_expense_rejects_unknown_category() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"category": "bogus", "amount": 5, "date": "2024-01-01"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_detail(&response.json::<Value>(), "Invalid category");
    }

    #[tokio::test]
    async fn create_expense_rejects_invalid_date() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"category": "food", "amount": 5, "date": "not-a-date"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_detail(&response.json::<Value>(), "Invalid date format");
    }

    #[tokio::test]
    async fn get_expenses_wraps_list_in_data() {
        let state = get_test_state();
        let january = insert(&state, "food", dec!(1), "2024-01-01");
        let february = insert(&state, "fun", dec!(2), "2024-02-01");
        let server = get_test_server(state);

        let response = server.get(endpoints::EXPENSES_API).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let expenses: Vec<Expense> = serde_json::from_value(body["data"].clone()).unwrap();
        assert_eq!(expenses, vec![february, january]);
    }

    #[tokio::test]
    async fn get_expense_by_id() {
        let state = get_test_state();
        let expense = insert(&state, "health", dec!(42.42), "2024-05-06");
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_API, expense.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Expense>(), expense);
    }

    #[tokio::test]
    async fn get_missing_expense_is_not_found() {
        let server = get_test_server(get_test_state());

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_API, 404))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_detail(&response.json::<Value>(), "Expense not found");
    }

    #[tokio::test]
    async fn delete_expense_returns_null() {
        let state = get_test_state();
        let expense = insert(&state, "auto", dec!(60), "2024-01-01");
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_API, expense.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), Value::Null);
        assert!(
            get_all_expenses(&state.db_connection.lock().unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn delete_missing_expense_leaves_store_unchanged() {
        let state = get_test_state();
        let expense = insert(&state, "auto", dec!(60), "2024-01-01");
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_API, expense.id + 1))
            .await;

        response.assert_status_ok();
        assert_eq!(
            get_all_expenses(&state.db_connection.lock().unwrap()).unwrap(),
            vec![expense]
        );
    }

    #[tokio::test]
    async fn total_is_null_without_expenses() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::TOTAL_API).await;

        response.assert_status_ok();
        response.assert_json(&json!({"total": null}));
    }

    #[tokio::test]
    async fn total_sums_expenses() {
        let state = get_test_state();
        insert(&state, "food", dec!(10.00), "2024-01-01");
        insert(&state, "rent", dec!(20.00), "2024-01-02");
        let server = get_test_server(state);

        let response = server.get(endpoints::TOTAL_API).await;

        response.assert_status_ok();
        response.assert_text(r#"{"total":30.00}"#);
    }

    #[tokio::test]
    async fn total_overflow_is_a_server_error_and_store_keeps_working() {
        let state = get_test_state();
        let server = get_test_server(state);
        for _ in 0..2 {
            server
                .post(endpoints::EXPENSES_API)
                .json(&json!({
                    "category": "food",
                    "amount": "79228162514264337593543950335",
                    "date": "2024-01-01"
                }))
                .await
                .assert_status_ok();
        }

        server
            .get(endpoints::TOTAL_API)
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let response = server.get(endpoints::EXPENSES_API).await;
        response.assert_status_ok();
        let expenses: Vec<Expense> =
            serde_json::from_value(response.json::<Value>()["data"].clone()).unwrap();
        assert_eq!(expenses.len(), 2);
        assert!(expenses.iter().all(|expense| expense.amount == Decimal::MAX));
    }

    #[tokio::test]
    async fn categories_have_labels() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::CATEGORIES_API).await;

        response.assert_status_ok();
        let categories = response.json::<Vec<Value>>();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[5], json!({"code": "work", "label": "Work/Education"}));
    }
}
