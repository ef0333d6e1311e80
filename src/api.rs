use crate::config::Config;
use crate::services::{ActivityLogger, Fetcher, LocalFsStore, ReqwestFetcher};
use crate::{engine::*, error::*, types::*};
use serde::Serialize;
use std::time::Instant;

// Helper function for logging - ignores errors to not break main operations
fn log_info(config: &Config, event: &str, details: &str) {
    if let Ok(logger) = ActivityLogger::new(&config.paths.data_dir) {
        let _ = logger.info(Some(&config.site.domain().0), event, Some(details));
    }
}

fn log_error(config: &Config, event: &str, details: &str) {
    if let Ok(logger) = ActivityLogger::new(&config.paths.data_dir) {
        let _ = logger.error(Some(&config.site.domain().0), event, Some(details));
    }
}

fn journal<T>(config: &Config, event: &str, start: Instant, result: &Result<T>) {
    let ms = start.elapsed().as_millis();
    match result {
        Ok(_) => log_info(config, event, &format!("succeeded in {ms}ms")),
        Err(e) => log_error(config, event, &format!("failed in {ms}ms: {e}")),
    }
}

/* ------------ public facade components ------------ */

pub struct Components {
    pub fetcher: Box<dyn Fetcher>,
}

impl Components {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Box::new(ReqwestFetcher::new(&config.fetch)?),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub collect: CollectReport,
    pub extract: ExtractReport,
}

/* ------------ entrypoints ------------ */

/// Review links found on one listing page; nothing is saved.
pub fn listing_links(config: &Config, components: &Components, page: u32) -> Result<Vec<ReviewLink>> {
    crate::tools::collect::collect_links(&*components.fetcher, config, page)
}

/// Collection driver. `pages` overrides `collect.pages` when given.
pub fn collect(config: &Config, components: &Components, pages: Option<&[u32]>) -> Result<CollectReport> {
    let start = Instant::now();
    let result = (|| {
        let store = LocalFsStore::open(&config.paths.raw_dir)?;
        let engine = Engine::new(&store, &*components.fetcher, config);
        engine.collect(pages.unwrap_or(config.collect.pages.as_slice()))
    })();
    journal(config, "collect", start, &result);
    result
}

/// Extraction driver over everything in `paths.raw_dir`.
pub fn extract(config: &Config, components: &Components) -> Result<ExtractReport> {
    let start = Instant::now();
    let result = (|| {
        let store = LocalFsStore::open(&config.paths.raw_dir)?;
        let engine = Engine::new(&store, &*components.fetcher, config);
        engine.extract_all()
    })();
    journal(config, "extract", start, &result);
    result
}

/// Lines of `<data_dir>/activity.log`, newest first.
pub fn activity(config: &Config, errors_only: bool) -> Result<Vec<String>> {
    ActivityLogger::new(&config.paths.data_dir)?.read_logs(errors_only)
}

/// Collect, then extract.
pub fn run(config: &Config, components: &Components, pages: Option<&[u32]>) -> Result<RunReport> {
    let collect = collect(config, components, pages)?;
    let extract = extract(config, components)?;
    Ok(RunReport { collect, extract })
}
