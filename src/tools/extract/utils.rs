use scraper::{ElementRef, Html, Selector};

use crate::selectors::PARAGRAPH_SELECTOR;

/// Collapse whitespace runs to one space and trim.
pub(super) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Elements whose boundaries separate words in rendered text.
const BREAKING_TAGS: &[&str] = &[
    "br", "p", "div", "li", "dd", "dt", "tr", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6",
    "ul", "ol", "dl", "section", "article", "blockquote",
];

fn push_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let breaks = BREAKING_TAGS.contains(&child_el.value().name());
            if breaks {
                out.push(' ');
            }
            push_text(child_el, out);
            if breaks {
                out.push(' ');
            }
        }
    }
}

/// Normalized text; `<br>` and block boundaries become spaces, inline tags do not.
fn element_text(el: ElementRef) -> String {
    let mut raw = String::new();
    push_text(el, &mut raw);
    normalize_ws(&raw)
}

/// Text of the first element, across the fallback selectors, with any text.
pub(super) fn first_text(doc: &Html, sels: &[Selector]) -> Option<String> {
    sels.iter()
        .flat_map(|sel| doc.select(sel))
        .map(element_text)
        .find(|t| !t.is_empty())
}

/// Like [`first_text`] but prefers a `datetime` attribute over the text.
pub(super) fn first_date(doc: &Html, sels: &[Selector]) -> Option<String> {
    sels.iter()
        .flat_map(|sel| doc.select(sel))
        .filter_map(|el| {
            let from_attr = el
                .value()
                .attr("datetime")
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            let value = from_attr.unwrap_or_else(|| element_text(el));
            (!value.is_empty()).then_some(value)
        })
        .next()
}

/// Paragraphs of the first matching body container, blank-line separated.
/// Falls back to the container's whole text when it has no `<p>`.
pub(super) fn body_text(doc: &Html, sels: &[Selector]) -> Option<String> {
    for sel in sels {
        let Some(container) = doc.select(sel).next() else {
            continue;
        };
        let paragraphs: Vec<String> = container
            .select(&PARAGRAPH_SELECTOR)
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return Some(paragraphs.join("\n\n"));
        }
        let whole = element_text(container);
        if !whole.is_empty() {
            return Some(whole);
        }
    }
    None
}

/// Every value matched by the first selector that yields any, de-duplicated.
pub(super) fn list_values(doc: &Html, sels: &[Selector]) -> Vec<String> {
    for sel in sels {
        let mut values = Vec::new();
        for el in doc.select(sel) {
            let text = element_text(el);
            if !text.is_empty() {
                push_unique(&mut values, text);
            }
        }
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

pub(super) fn push_unique(items: &mut Vec<String>, value: String) {
    if !items.iter().any(|existing| existing == &value) {
        items.push(value);
    }
}
