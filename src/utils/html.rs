//! Thin helpers over `scraper` used by every extractor.
//!
//! A selector that fails to parse behaves like a selector that matches
//! nothing, so a bad selector degrades one field instead of the request.

use scraper::{ElementRef, Selector};
use url::Url;

use super::normalize_ws;

/// All elements under `scope` matching `css`.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => vec![],
    }
}

/// First element under `scope` matching `css`.
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// Whitespace-normalized text content of an element.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Trimmed text of the first match, if any.
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).map(text_of)
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).filter(|v| !v.trim().is_empty())
}

/// Resolves a (possibly relative) href against the forum base URL.
pub fn absolute_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}
