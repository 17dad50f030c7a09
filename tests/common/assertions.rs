//! Common assertion helpers for CLI output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Checks the pretty-printed status code of a classified error
pub fn has_status_code(code: u16) -> impl Predicate<str> {
    predicates::str::contains(format!("\"statusCode\": {code}"))
}

/// Checks the pretty-printed error kind of a classified error
pub fn has_error_kind(kind: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\"errorKind\": \"{kind}\""))
}

/// Checks the page name of an activation call-to-action
pub fn has_activation_page(page: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\"pageName\": \"{page}\""))
}

pub fn no_redirect() -> impl Predicate<str> {
    predicates::str::contains("No redirect")
}
