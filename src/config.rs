use std::time::Duration;

use url::Url;

pub const SITE_ORIGIN: &str = "https://www.syntax.eco";
pub const CATALOG_PATH: &str = "/catalog/";
pub const GAMES_PATH: &str = "/games/popular/view";

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Statuses that trigger another attempt before a fetch is given up.
pub const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Browser user agents picked from when the caller supplies none.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
];

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// Retry schedule applied to every GET issued by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,
    pub retry_statuses: Vec<u16>,
    /// Delay after the first failed attempt; doubles on each further failure.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_statuses: RETRY_STATUSES.to_vec(),
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Whether a response with `status` should be retried.
    pub fn should_retry(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Sleep before attempt `failed + 1`, where `failed` counts failed attempts (1-based).
    pub fn backoff(&self, failed: u32) -> Duration {
        let exp = failed.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exp)
    }
}

// ---------------------------------------------------------------------------
// CrawlConfig
// ---------------------------------------------------------------------------

/// Immutable per-client crawl settings, threaded into every crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Scheme and host every relative link is resolved against.
    pub origin: Url,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Fixed user agent; overrides the pool when set.
    pub user_agent: Option<String>,
    pub user_agents: Vec<String>,
    /// Number of game detail pages fetched at once (order is preserved).
    pub detail_concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            user_agent: None,
            user_agents: USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            detail_concurrency: 1,
        }
    }
}

impl CrawlConfig {
    /// Resolve a site-relative path (`/catalog/123`) against the origin.
    ///
    /// Absolute URLs pass through unchanged.
    pub fn absolute(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        self.origin.join(path).ok().map(String::from)
    }

    pub fn catalog_url(&self) -> Result<Url, url::ParseError> {
        self.origin.join(CATALOG_PATH)
    }

    pub fn games_url(&self) -> Result<Url, url::ParseError> {
        self.origin.join(GAMES_PATH)
    }
}

fn default_origin() -> Url {
    Url::parse(SITE_ORIGIN).expect("SITE_ORIGIN is a valid URL")
}
