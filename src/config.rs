use crate::{error::*, types::*};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scheme: String,
    pub host: String,
    pub listing_path: String,
    pub page_param: String,
    /// Label stored in the `source` column of every main row.
    pub source_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scheme: "http".into(),
            host: "www.gamespot.com".into(),
            listing_path: "/reviews/".into(),
            page_param: "page".into(),
            source_label: "GameSpot".into(),
        }
    }
}

impl SiteConfig {
    /// `<scheme>://<host>`, the prefix every relative review link is joined onto.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn domain(&self) -> Domain {
        Domain::from_raw(&self.host)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        );
        headers.insert("Accept-Language".to_string(), "en-US,en;q=0.9".to_string());
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36".into(),
            headers,
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    pub pages: Vec<u32>,
    pub dedupe_links: bool,
    pub listing_selector: Sel,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            pages: vec![155, 156],
            dedupe_links: true,
            listing_selector: Sel("#js-sort-filter-results .js-event-tracking".into()),
        }
    }
}

/// What to do with a scalar field the document does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    /// Write an empty cell.
    #[default]
    Empty,
    /// Write `missing_marker`.
    Marker,
    /// Drop the whole review when a required field is absent.
    SkipReview,
}

/// What to do when a single saved document cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnDocumentError {
    #[default]
    Abort,
    Skip,
}

/// Ordered fallback selectors per field; first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectors {
    pub title: Vec<Sel>,
    pub subtitle: Vec<Sel>,
    pub score: Vec<Sel>,
    pub author: Vec<Sel>,
    pub date: Vec<Sel>,
    pub body: Vec<Sel>,
    pub platforms: Vec<Sel>,
    pub developers: Vec<Sel>,
    pub publishers: Vec<Sel>,
    pub genres: Vec<Sel>,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            title: vec![
                Sel(".kubrick-info__title".into()),
                Sel("h1.news-title".into()),
                Sel("h1".into()),
            ],
            subtitle: vec![Sel(".news-deck".into()), Sel("p.news-deck".into())],
            score: vec![
                Sel(".gs-score__cell span".into()),
                Sel(".gs-score__cell".into()),
                Sel("[itemprop='ratingValue']".into()),
            ],
            author: vec![
                Sel(".news-byline a[href*='/profile/']".into()),
                Sel("[itemprop='author']".into()),
            ],
            date: vec![
                Sel(".news-byline time".into()),
                Sel("time[datetime]".into()),
            ],
            body: vec![
                Sel(".js-content-entity-body".into()),
                Sel("[itemprop='reviewBody']".into()),
                Sel("article".into()),
            ],
            platforms: vec![
                Sel(".pod-objectStats-info__systems li".into()),
                Sel(".system-list li".into()),
            ],
            developers: vec![Sel(".pod-objectStats-additional a[href*='/developer/']".into())],
            publishers: vec![Sel(".pod-objectStats-additional a[href*='/publisher/']".into())],
            genres: vec![Sel(".pod-objectStats-additional a[href*='/genre/']".into())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub missing_field: MissingField,
    pub missing_marker: String,
    pub required_fields: Vec<String>,
    pub on_error: OnDocumentError,
    pub selectors: FieldSelectors,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            missing_field: MissingField::default(),
            missing_marker: "NA".into(),
            required_fields: vec!["title".into()],
            on_error: OnDocumentError::default(),
            selectors: FieldSelectors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("../data/raw"),
            data_dir: PathBuf::from("../data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetch: FetchConfig,
    pub collect: CollectConfig,
    pub extract: ExtractConfig,
    pub paths: PathsConfig,
}

pub const SCALAR_FIELDS: [&str; 6] = ["title", "subtitle", "score", "author", "date", "text"];

pub fn validate_config(c: &Config) -> Result<()> {
    if c.site.host.trim().is_empty() {
        return Err(ReviewError::config_error("site.host cannot be empty"));
    }
    if !matches!(c.site.scheme.as_str(), "http" | "https") {
        return Err(ReviewError::config_error(format!(
            "site.scheme must be http or https, got {:?}",
            c.site.scheme
        )));
    }
    if let Some(bad) = c.collect.pages.iter().find(|p| **p == 0) {
        return Err(ReviewError::config_error(format!(
            "collect.pages must be positive, got {bad}"
        )));
    }
    for field in &c.extract.required_fields {
        if !SCALAR_FIELDS.contains(&field.as_str()) {
            return Err(ReviewError::config_error(format!(
                "extract.required_fields: unknown field {field:?}"
            )));
        }
    }
    // Compiling surfaces every bad selector before any network traffic.
    crate::selectors::compile(&c.collect.listing_selector)?;
    crate::selectors::CompiledSelectors::compile(&c.extract.selectors)?;
    Ok(())
}

/// Default location: `<platform config dir>/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("io", "reviewcrawl", "reviewcrawl")
        .ok_or_else(|| ReviewError::config_error("could not resolve config dir"))?;
    Ok(proj.config_dir().join(CONFIG_FILE))
}

/// Load from an explicit path, else the default path if it exists, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let file = fs::File::open(&path).map_err(|e| {
        ReviewError::config_error(format!("cannot open {}: {e}", path.display()))
    })?;
    let config: Config = serde_json::from_reader(file)?;
    validate_config(&config)?;
    Ok(config)
}

/// Write `config` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ReviewError::config_error(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: Config = serde_json::from_str(r#"{"collect": {"pages": [3]}}"#).unwrap();
        assert_eq!(c.collect.pages, vec![3]);
        assert!(c.collect.dedupe_links);
        assert_eq!(c.site.host, "www.gamespot.com");
        assert_eq!(c.extract.missing_field, MissingField::Empty);
    }

    #[test]
    fn policy_enums_use_snake_case() {
        let c: Config = serde_json::from_str(
            r#"{"extract": {"missing_field": "skip_review", "on_error": "skip"}}"#,
        )
        .unwrap();
        assert_eq!(c.extract.missing_field, MissingField::SkipReview);
        assert_eq!(c.extract.on_error, OnDocumentError::Skip);
    }

    #[test]
    fn rejects_zero_page_and_bad_selector() {
        let mut c = Config::default();
        c.collect.pages = vec![1, 0];
        assert!(matches!(validate_config(&c), Err(ReviewError::Config(_))));

        let mut c = Config::default();
        c.extract.selectors.score = vec![Sel("div[".into())];
        assert!(matches!(validate_config(&c), Err(ReviewError::Selector { .. })));
    }

    #[test]
    fn rejects_unknown_required_field() {
        let mut c = Config::default();
        c.extract.required_fields = vec!["rating".into()];
        assert!(validate_config(&c).is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut c = Config::default();
        c.collect.pages = vec![7, 8];
        save_config(&path, &c, false).unwrap();
        assert!(save_config(&path, &c, false).is_err());
        save_config(&path, &c, true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), c);
    }
}
