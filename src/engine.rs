use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{Config, MissingField, OnDocumentError};
use crate::error::*;
use crate::selectors::CompiledSelectors;
use crate::services::{fetch::Fetcher, store::PageStore};
use crate::tools::{collect, extract, pages, tables::{Blank, Tables}};
use crate::types::*;

#[derive(Debug, Clone, Serialize)]
pub struct CollectReport {
    pub pages: Vec<u32>,
    pub links_found: usize,
    pub links_fetched: usize,
    pub saved: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedDocument {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub documents: usize,
    pub reviews: usize,
    pub skipped: Vec<SkippedDocument>,
    pub outputs: Vec<PathBuf>,
}

/// Drives both pipelines over one store, one fetcher and one config.
pub struct Engine<'a, PS: PageStore> {
    pub store: &'a PS,
    pub fetcher: &'a dyn Fetcher,
    pub config: &'a Config,
}

impl<'a, PS: PageStore> Engine<'a, PS> {
    pub fn new(store: &'a PS, fetcher: &'a dyn Fetcher, config: &'a Config) -> Self {
        Self { store, fetcher, config }
    }

    /// Links from every listing page, concatenated in page order.
    /// Duplicates are dropped (first wins) when `collect.dedupe_links` is set.
    pub fn gather_links(&self, listing_pages: &[u32]) -> Result<Vec<ReviewLink>> {
        let mut links = Vec::new();
        for &page in listing_pages {
            links.extend(collect::collect_links(self.fetcher, self.config, page)?);
        }
        if self.config.collect.dedupe_links {
            let before = links.len();
            links = crate::dedupe!(links);
            if links.len() < before {
                info!(dropped = before - links.len(), "dropped duplicate review links");
            }
        }
        Ok(links)
    }

    /// Collect links from `listing_pages` and save every review page.
    /// Stops at the first failure; pages already saved stay on disk.
    pub fn collect(&self, listing_pages: &[u32]) -> Result<CollectReport> {
        let links = self.gather_links(listing_pages)?;
        let mut saved = Vec::with_capacity(links.len());
        for link in &links {
            let url = pages::absolute_url(&self.config.site, link)?;
            saved.push(pages::fetch_page(self.fetcher, self.store, &url)?);
        }
        Ok(CollectReport {
            pages: listing_pages.to_vec(),
            links_found: links.len(),
            links_fetched: saved.len(),
            saved,
        })
    }

    /// Run the extractor over every saved page, in sorted id order.
    pub fn extract_tables(&self) -> Result<(Tables, Vec<SkippedDocument>, usize)> {
        let ex_cfg = &self.config.extract;
        let sels = CompiledSelectors::compile(&ex_cfg.selectors)?;
        let ids = self.store.list()?;
        let mut tables = Tables::new();
        let mut skipped = Vec::new();

        for id in &ids {
            let page = match self.store.load(id) {
                Ok(page) => page,
                Err(e) => {
                    let e = e.in_document(id.as_str());
                    match ex_cfg.on_error {
                        OnDocumentError::Abort => return Err(e),
                        OnDocumentError::Skip => {
                            warn!(id = %id, error = %e, "skipping unreadable document");
                            skipped.push(SkippedDocument {
                                id: id.to_string(),
                                reason: e.to_string(),
                            });
                            continue;
                        }
                    }
                }
            };

            let extraction = extract::extract_html(
                &page.html,
                id.as_str(),
                &self.config.site.source_label,
                &sels,
            );

            if ex_cfg.missing_field == MissingField::SkipReview {
                let missing = extraction.missing_fields(&ex_cfg.required_fields);
                if !missing.is_empty() {
                    let reason = format!("missing required fields: {}", missing.join(", "));
                    warn!(id = %id, %reason, "skipping review");
                    skipped.push(SkippedDocument {
                        id: id.to_string(),
                        reason,
                    });
                    continue;
                }
            }

            tables.push(extraction);
        }

        Ok((tables, skipped, ids.len()))
    }

    /// Extract every saved page and write the five tables to `paths.data_dir`.
    pub fn extract_all(&self) -> Result<ExtractReport> {
        let (tables, skipped, documents) = self.extract_tables()?;
        if tables.is_empty() {
            warn!(documents, "no reviews extracted; writing header-only tables");
        }
        let blank = Blank::from_policy(
            self.config.extract.missing_field,
            &self.config.extract.missing_marker,
        );
        let outputs = tables.write_all(&self.config.paths.data_dir, &blank)?;
        Ok(ExtractReport {
            documents,
            reviews: tables.len(),
            skipped,
            outputs,
        })
    }
}
