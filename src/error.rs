use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("Upstream unavailable at {url}: {reason}")]
    UpstreamUnavailable { url: String, reason: FetchFailure },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

/// Why a single GET did not produce a usable page.
///
/// Soft failures are values, not errors: callers decide whether the branch
/// ends the crawl (root page) or only truncates it (every later fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Final response status after retries were exhausted.
    Status(u16),
    Timeout,
    Transport(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "HTTP status {}", code),
            FetchFailure::Timeout => write!(f, "request timed out"),
            FetchFailure::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

/// A record-level parse failure. Logged and absorbed by the crawl.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("malformed field `{field}`: {value:?}")]
    Malformed { field: &'static str, value: String },
}
