//! Domain types for the batch fetcher: configuration, errors, and the
//! settled-join report.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinError;
use url::Url;

/// Configuration for one batch run.
///
/// Built programmatically; the binary never reads flags, environment
/// variables, or config files. Unset fields fall back to the `DEFAULT_*`
/// constants through the accessor methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchConfig {
    /// Base URL the target list is derived from.
    pub base_url: Option<String>,

    /// Number of targets (`base_url/1` through `base_url/post_count`).
    pub post_count: Option<u32>,

    /// User-Agent string for all requests.
    pub user_agent: Option<String>,

    /// Total per-request timeout in seconds. Default: 20.
    pub timeout_seconds: Option<u32>,

    /// TCP connect timeout in seconds. Default: 10.
    pub connect_timeout_seconds: Option<u32>,
}

impl FetchConfig {
    /// Default base URL.
    pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

    /// Default number of targets.
    pub const DEFAULT_POST_COUNT: u32 = 10;

    /// Default per-request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECONDS: u32 = 20;

    /// Default connect timeout in seconds.
    pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u32 = 10;

    /// Default User-Agent.
    pub const DEFAULT_USER_AGENT: &str = concat!("batchdl/", env!("CARGO_PKG_VERSION"));

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn post_count(&self) -> u32 {
        self.post_count.unwrap_or(Self::DEFAULT_POST_COUNT)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(Self::DEFAULT_USER_AGENT)
    }

    #[must_use]
    pub fn timeout_seconds(&self) -> u32 {
        self.timeout_seconds
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    #[must_use]
    pub fn connect_timeout_seconds(&self) -> u32 {
        self.connect_timeout_seconds
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECONDS)
    }
}

/// Failure of a batch run.
///
/// There is one failure class: any variant aborts the batch at the join
/// point. The variants exist for diagnostics, not for recovery decisions.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A target URL could not be constructed from the base template.
    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request never produced a usable response (DNS, connect, timeout,
    /// or a body read error).
    #[error("GET {url} failed")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: Url, status: StatusCode },

    /// A fetch task panicked or was cancelled before reaching a terminal
    /// state.
    #[error("fetch task did not complete")]
    Join(#[from] JoinError),
}

/// Outcome of a settled join: every task driven to a terminal state.
#[derive(Debug, Default)]
#[must_use]
pub struct BatchReport {
    /// Tasks that fetched and stored a body.
    pub succeeded: usize,

    /// Tasks that ended in any [`FetchError`].
    pub failed: usize,

    /// The error from each failed task, in completion order.
    pub errors: Vec<FetchError>,
}

impl BatchReport {
    /// Total number of tasks that reached a terminal state.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// True when no task failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url(), FetchConfig::DEFAULT_BASE_URL);
        assert_eq!(config.post_count(), 10);
        assert_eq!(config.timeout_seconds(), 20);
        assert_eq!(config.connect_timeout_seconds(), 10);
        assert!(config.user_agent().starts_with("batchdl/"));
    }

    #[test]
    fn config_overrides_win() {
        let config = FetchConfig {
            base_url: Some("http://localhost:8080/items".to_string()),
            post_count: Some(3),
            timeout_seconds: Some(5),
            ..FetchConfig::default()
        };
        assert_eq!(config.base_url(), "http://localhost:8080/items");
        assert_eq!(config.post_count(), 3);
        assert_eq!(config.timeout_seconds(), 5);
    }

    #[test]
    fn report_tallies() {
        let report = BatchReport {
            succeeded: 9,
            failed: 1,
            errors: Vec::new(),
        };
        assert_eq!(report.total(), 10);
        assert!(!report.is_clean());
        assert!(BatchReport::default().is_clean());
    }
}
