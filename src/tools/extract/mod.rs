//! Extractor: one review document in, five record sets out.

mod tests;
pub mod types;
mod utils;

pub use types::*;
use utils::*;

use scraper::Html;
use tracing::debug;

use crate::selectors::CompiledSelectors;

/// Extract the main row and the four association lists from a parsed page.
///
/// Fields the page does not carry are left as `None` (scalars) or empty
/// (lists); that is never an error here. Whether such a review is kept is
/// decided by the caller from [`Extraction::missing_fields`].
pub fn extract_document(
    doc: &Html,
    review_id: &str,
    source: &str,
    sels: &CompiledSelectors,
) -> Extraction {
    let main = MainRow {
        review_id: review_id.to_string(),
        source: source.to_string(),
        title: first_text(doc, &sels.title),
        subtitle: first_text(doc, &sels.subtitle),
        score: first_text(doc, &sels.score),
        author: first_text(doc, &sels.author),
        date: first_date(doc, &sels.date),
        text: body_text(doc, &sels.body),
    };

    let assoc = |values: Vec<String>| -> Vec<AssocRow> {
        values
            .into_iter()
            .map(|value| AssocRow {
                review_id: review_id.to_string(),
                value,
            })
            .collect()
    };

    let extraction = Extraction {
        main,
        platforms: assoc(list_values(doc, &sels.platforms)),
        developers: assoc(list_values(doc, &sels.developers)),
        publishers: assoc(list_values(doc, &sels.publishers)),
        genres: assoc(list_values(doc, &sels.genres)),
    };
    debug!(
        review_id,
        platforms = extraction.platforms.len(),
        developers = extraction.developers.len(),
        publishers = extraction.publishers.len(),
        genres = extraction.genres.len(),
        "extracted review"
    );
    extraction
}

/// Parse `html` as a full document, then [`extract_document`].
pub fn extract_html(html: &str, review_id: &str, source: &str, sels: &CompiledSelectors) -> Extraction {
    let doc = Html::parse_document(html);
    extract_document(&doc, review_id, source, sels)
}
