use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ReviewError};

static PAGE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("valid page id regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain(pub String);

impl Domain {
    /// Canonicalize host to a stable key: lowercase + IDNA/Punycode
    fn canonicalize(host: &str) -> String {
        let lower = host.to_ascii_lowercase();
        idna::domain_to_ascii(&lower).unwrap_or(lower)
    }


    /// Build a Domain from raw user text (config, CLI)
    pub fn from_raw(host: &str) -> Self {
        Domain(Self::canonicalize(host))
    }
}

/// A CSS selector as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sel(pub String);

/// Href of one review detail page as found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewLink(pub String);

impl ReviewLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The `<digits>-<digits>` token naming one review page on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(String);

impl PageId {
    pub fn parse(token: &str) -> Result<Self> {
        if PAGE_ID_RE.is_match(token) {
            Ok(PageId(token.to_string()))
        } else {
            Err(ReviewError::InvalidArgument(format!(
                "not a page id: {token:?}"
            )))
        }
    }

    /// Id of a saved page from its file stem. Any non-blank stem is accepted;
    /// only ids derived from review URLs must match `<digits>-<digits>`.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let stem = stem.trim();
        (!stem.is_empty()).then(|| PageId(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub id: PageId,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
