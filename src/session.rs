//! Outbound HTTP session carrying the caller's upstream cookies.
//!
//! A [`Session`] is built once per crawl and dropped when the crawl returns,
//! on success and on every error path alike.

use std::fmt;

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Client;

use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Opaque upstream tokens, forwarded verbatim as cookies.
///
/// Never parsed or validated here. `Debug` output is redacted.
#[derive(Clone, Default)]
pub struct Credentials {
    pub session_token: String,
    pub security_token: String,
    /// Per-call user agent; takes precedence over the client configuration.
    pub user_agent: Option<String>,
}

impl Credentials {
    pub fn new(session_token: impl Into<String>, security_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            security_token: security_token.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The composite `Cookie` header value.
    pub fn cookie_header(&self) -> String {
        format!(
            ".ROBLOSECURITY={}; session={}",
            self.security_token, self.session_token
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("session_token", &"<redacted>")
            .field("security_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A configured HTTP client scoped to one crawl.
pub struct Session<'a> {
    pub(crate) client: Client,
    pub(crate) config: &'a CrawlConfig,
    user_agent: String,
}

impl<'a> Session<'a> {
    /// Build the client: cookie + user-agent headers and the configured timeout.
    ///
    /// The user agent is the per-call override, else the configured fixed
    /// agent, else a random pick from the configured pool.
    pub fn acquire(config: &'a CrawlConfig, credentials: &Credentials) -> Result<Self> {
        let user_agent = credentials
            .user_agent
            .clone()
            .or_else(|| config.user_agent.clone())
            .or_else(|| config.user_agents.choose(&mut rand::thread_rng()).cloned())
            .ok_or_else(|| CrawlError::InvalidArgument("user agent pool is empty".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user agent", &user_agent)?);
        let mut cookie = header_value("credentials", &credentials.cookie_header())?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        tracing::debug!(user_agent = %user_agent, "session acquired");
        Ok(Self {
            client,
            config,
            user_agent,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn config(&self) -> &CrawlConfig {
        self.config
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        tracing::debug!("session released");
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| CrawlError::InvalidArgument(format!("{} contains invalid header characters", what)))
}
