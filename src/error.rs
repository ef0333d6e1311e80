use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The URL path does not end in `/<digits>-<digits>/`.
    #[error("no review id in url: {0}")]
    MissingPageId(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("body of {url} is not valid UTF-8")]
    Decode { url: String },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("document {id}: {source}")]
    Document {
        id: String,
        #[source]
        source: Box<ReviewError>,
    },
}

impl ReviewError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ReviewError::Config(msg.into())
    }

    pub fn selector_error(selector: &str, reason: impl ToString) -> Self {
        ReviewError::Selector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the raw page id to an error raised while handling that page.
    pub fn in_document(self, id: &str) -> Self {
        ReviewError::Document {
            id: id.to_string(),
            source: Box::new(self),
        }
    }
}
