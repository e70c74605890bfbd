//! Expense listing page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    Error, endpoints,
    expense::{Category, Expense, ExpenseState, get_all_expenses, get_total},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, NUMERIC_CELL_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
};

/// Render the listing page with every expense, the total and the add expense form.
pub async fn get_list_page(State(state): State<ExpenseState>) -> Result<Response, Error> {
    let (expenses, total) = {
        let connection = state.connection()?;

        let expenses = get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

        let total = get_total(&connection)
            .inspect_err(|error| tracing::error!("Failed to calculate total: {error}"))?;

        (expenses, total)
    };

    Ok(list_view(&expenses, total).into_response())
}

fn list_view(expenses: &[Expense], total: Option<Decimal>) -> Markup {
    let table_row = |expense: &Expense| {
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE_LINK, expense.id);

        html!(
            tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
            {
                td class=(TABLE_CELL_STYLE) { (expense.date) }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (expense.category.label()) }
                }

                td class=(NUMERIC_CELL_STYLE)
                {
                    (format_currency(expense.amount))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    a href=(delete_url) class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        )
    };

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="content"
            {
                h1 class="page-title" { "Expenses" }

                (add_expense_form_view())

                table class="expense-table"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            (table_row(expense))
                        }

                        @if expenses.is_empty() {
                            tr
                            {
                                td colspan="4" class="table-cell empty"
                                {
                                    "No expenses recorded yet."
                                }
                            }
                        }
                    }

                    tfoot
                    {
                        tr class="total-row"
                        {
                            th scope="row" colspan="2" class=(TABLE_CELL_STYLE) { "Total" }
                            td id="total" class=(NUMERIC_CELL_STYLE)
                            {
                                @match total {
                                    Some(total) => { (format_currency(total)) }
                                    None => { "-" }
                                }
                            }
                            td {}
                        }
                    }
                }
            }
        }
    );

    base("Expenses", &content)
}

fn add_expense_form_view() -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ADD_EXPENSE_FORM)
            class="expense-form"
        {
            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category.code()) { (category.label()) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    min="0.01"
                    step="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}
