//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The page listing all expenses with the running total.
pub const LIST_VIEW: &str = "/list";

/// The route to list or create expenses as JSON.
pub const EXPENSES_API: &str = "/expenses";
/// The route to get or delete a single expense as JSON.
pub const EXPENSE_API: &str = "/expenses/{expense_id}";
/// The route for the sum of all expense amounts as JSON.
pub const TOTAL_API: &str = "/expenses/total";
/// The route for the category codes and their labels as JSON.
pub const CATEGORIES_API: &str = "/categories";
/// The route for the add expense form submission.
pub const ADD_EXPENSE_FORM: &str = "/add-expense";
/// The route for the delete links on the listing page.
pub const DELETE_EXPENSE_LINK: &str = "/delete-expense/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
