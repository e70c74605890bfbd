//! Expense management: the domain types, the SQLite store and the route handlers.

mod api;
mod category;
mod date;
mod db;
mod domain;
mod form;
mod list_page;
mod state;

pub use api::{
    create_expense_endpoint, delete_expense_endpoint, get_categories_endpoint,
    get_expense_endpoint, get_expenses_endpoint, get_total_endpoint,
};
pub use category::Category;
pub use date::ExpenseDate;
pub use db::{
    create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense, get_total,
};
pub use domain::{Expense, ExpenseId, NewExpense};
pub use form::{add_expense_form_endpoint, delete_expense_link_endpoint};
pub use list_page::get_list_page;
pub use state::ExpenseState;
