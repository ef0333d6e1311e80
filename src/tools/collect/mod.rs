//! Link Collector

mod utils;

pub use utils::parse_listing;

use tracing::info;
use url::Url;

use crate::config::{Config, SiteConfig};
use crate::error::{Result, ReviewError};
use crate::services::fetch::Fetcher;
use crate::types::ReviewLink;

/// Listing page URL, e.g. `http://www.gamespot.com/reviews/?page=155`.
pub fn listing_url(site: &SiteConfig, page: u32) -> Result<String> {
    if page == 0 {
        return Err(ReviewError::InvalidArgument(
            "listing pages start at 1".into(),
        ));
    }
    let origin = site.origin();
    let base = Url::parse(&origin).map_err(|_| ReviewError::InvalidUrl(origin.clone()))?;
    let mut url = base
        .join(&site.listing_path)
        .map_err(|_| ReviewError::InvalidUrl(format!("{origin}{}", site.listing_path)))?;
    url.query_pairs_mut()
        .append_pair(&site.page_param, &page.to_string());
    Ok(url.to_string())
}

/// Fetch one listing page and return the review links on it, in page order.
///
/// Every call returns a fresh list; accumulating across pages is the
/// caller's job.
pub fn collect_links(fetcher: &dyn Fetcher, config: &Config, page: u32) -> Result<Vec<ReviewLink>> {
    let url = listing_url(&config.site, page)?;
    let selector = crate::selectors::compile(&config.collect.listing_selector)?;
    let html = fetcher.fetch_text(&url)?;
    let links = parse_listing(&html, &selector);
    info!(page, url = %url, links = links.len(), "collected listing page");
    Ok(links)
}
