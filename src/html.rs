//! Shared page layout, styles and formatting helpers for the HTML views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::endpoints;

// Class names defined in static/main.css

pub const LINK_STYLE: &str = "link";

pub const BUTTON_PRIMARY_STYLE: &str = "button-primary";

pub const BUTTON_DELETE_STYLE: &str = "link link-delete";

pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";

pub const TABLE_HEADER_STYLE: &str = "table-header";

pub const TABLE_ROW_STYLE: &str = "table-row";

pub const TABLE_CELL_STYLE: &str = "table-cell";

pub const NUMERIC_CELL_STYLE: &str = "table-cell numeric";

pub const CATEGORY_BADGE_STYLE: &str = "category-badge";

pub const PAGE_CONTAINER_STYLE: &str = "page";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expenses" }
                link href="/main.css" rel="stylesheet";
            }

            body
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="error"
            {
                h1 class="error-code" { (header) }

                p class="error-description" { (description) }

                p class="error-fix" { (fix) }

                a href=(endpoints::LIST_VIEW) class=(LINK_STYLE)
                {
                    "Back to Expenses"
                }
            }
        }
    );

    base(title, &content)
}

/// Format `amount` as dollars with thousands separators and two decimal places.
pub fn format_currency(amount: Decimal) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let amount = amount.round_dp(2);

    if amount.is_zero() {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let mut formatted_string = format!(
        "{sign}{}",
        fmt.fmt_string(amount.abs().to_f64().unwrap_or_default())
    );

    // numfmt omits trailing zeros, so we must add them ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        Some(dot) => {
            let decimals = formatted_string.len() - dot - 1;
            for _ in decimals..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
