//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        add_expense_form_endpoint, create_expense_endpoint, delete_expense_endpoint,
        delete_expense_link_endpoint, get_categories_endpoint, get_expense_endpoint,
        get_expenses_endpoint, get_list_page, get_total_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Paths that do not match a route are served from the static files
/// directory, with `index.html` used for directories.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir).append_index_html_on_directories(true);

    Router::new()
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
        .route(endpoints::LIST_VIEW, get(get_list_page))
        .route(endpoints::ADD_EXPENSE_FORM, post(add_expense_form_endpoint))
        .route(
            endpoints::DELETE_EXPENSE_LINK,
            get(delete_expense_link_endpoint),
        )
        .fallback_service(static_files)
        .with_state(state)
}
