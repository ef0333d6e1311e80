use scraper::{Html, Selector};

use crate::types::ReviewLink;

/// Select result rows and read their `href`; rows without one are skipped.
pub fn parse_listing(html: &str, row_selector: &Selector) -> Vec<ReviewLink> {
    let doc = Html::parse_document(html);
    doc.select(row_selector)
        .filter_map(|row| {
            let href = row.value().attr("href")?.trim();
            if href.is_empty() {
                None
            } else {
                Some(ReviewLink(href.to_string()))
            }
        })
        .collect()
}
