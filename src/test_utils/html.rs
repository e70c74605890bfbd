use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");
    let text = String::from_utf8_lossy(&body).to_string();

    parse_html_document_text(&text)
}

pub(crate) fn parse_html_document_text(text: &str) -> Html {
    Html::parse_document(text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

const STYLESHEET: &str = include_str!("../../static/main.css");

/// Assert that every class used in `html` has a rule in the stylesheet.
#[track_caller]
pub(crate) fn assert_classes_have_styles(html: &Html) {
    let selector = Selector::parse("[class]").unwrap();

    for element in html.select(&selector) {
        for class in element.value().classes() {
            let rule = format!(".{class}");
            let is_defined = STYLESHEET.match_indices(&rule).any(|(start, _)| {
                STYLESHEET[start + rule.len()..]
                    .chars()
                    .next()
                    .is_some_and(|next| !next.is_alphanumeric() && next != '-' && next != '_')
            });

            assert!(is_defined, "class {class:?} has no rule in main.css");
        }
    }
}
