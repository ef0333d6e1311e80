//! Page Fetcher

mod tests;

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::info;
use url::Url;

use crate::config::SiteConfig;
use crate::error::{Result, ReviewError};
use crate::services::fetch::Fetcher;
use crate::services::store::PageStore;
use crate::types::{PageId, RawPage, ReviewLink};

static PAGE_ID_IN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([0-9]+-[0-9]+)/$").expect("valid page id regex"));

/// Pull the `<digits>-<digits>` token out of a URL ending in `/<token>/`.
pub fn page_id_from_url(url: &str) -> Result<PageId> {
    let caps = PAGE_ID_IN_URL
        .captures(url)
        .ok_or_else(|| ReviewError::MissingPageId(url.to_string()))?;
    PageId::parse(&caps[1])
}

/// Join a listing link onto the site origin. Absolute links pass through.
pub fn absolute_url(site: &SiteConfig, link: &ReviewLink) -> Result<String> {
    let origin = site.origin();
    let base = Url::parse(&origin).map_err(|_| ReviewError::InvalidUrl(origin.clone()))?;
    base.join(link.as_str())
        .map(|u| u.to_string())
        .map_err(|_| ReviewError::InvalidUrl(format!("{origin}{}", link.as_str())))
}

/// Download `url` and save it as `<id>.html`, overwriting any previous copy.
///
/// The id is derived before any request is made, so a URL without one never
/// touches the network or the disk.
pub fn fetch_page(fetcher: &dyn Fetcher, store: &dyn PageStore, url: &str) -> Result<PathBuf> {
    let id = page_id_from_url(url)?;
    let html = fetcher.fetch_text(url)?;
    let path = store.save(&RawPage { id, html })?;
    info!(url, path = %path.display(), "saved review page");
    Ok(path)
}
