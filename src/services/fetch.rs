use crate::config::FetchConfig;
use crate::error::*;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

const REDIRECT_LIMIT: usize = 10;

/// One blocking GET returning the body as text. No retries.
pub trait Fetcher {
    fn name(&self) -> &'static str;
    fn fetch_text(&self, url: &str) -> Result<String>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let mut headers = to_headermap(&cfg.headers)?;
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&cfg.user_agent).map_err(|e| {
                ReviewError::config_error(format!("invalid user agent {:?}: {e}", cfg.user_agent))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    fn name(&self) -> &'static str {
        "reqwest-blocking"
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ReviewError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes()?;
        debug!(url, bytes = bytes.len(), "fetched");
        decode_utf8(url, bytes.to_vec())
    }
}

/// Strict UTF-8 decode; invalid bytes are an error rather than replaced.
pub(crate) fn decode_utf8(url: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| ReviewError::Decode {
        url: url.to_string(),
    })
}

fn to_headermap(hs: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (k, v) in hs {
        let kn = HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
            ReviewError::config_error(format!("invalid header name {k:?}: {e}"))
        })?;
        let vv = HeaderValue::from_str(v).map_err(|e| {
            ReviewError::config_error(format!("invalid header value for {k:?}: {e}"))
        })?;
        headers.insert(kn, vv);
    }
    Ok(headers)
}
