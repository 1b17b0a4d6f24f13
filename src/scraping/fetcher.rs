//! Record fetcher
//!
//! Issues one HTTP GET per well identifier and classifies the response.
//! Two retryable conditions are handled inside the fetcher with bounded
//! exponential backoff: the upstream "site busy" page (served with a 200
//! status) and transport-level failures. Retries are a bounded loop on
//! the calling task; the fetcher introduces no concurrency of its own.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

/// Marker string in a response body signaling upstream throttling,
/// distinct from any HTTP error status.
pub const RATE_LIMIT_MARKER: &str = "Site Busy - Rate Limit Reached";

/// Default well detail URL template; `{api}` is replaced per request.
pub const DEFAULT_BASE_URL: &str =
    "https://wwwapps.emnrd.nm.gov/OCD/OCDPermitting/Data/WellDetails.aspx?api={api}";

/// Errors surfaced by the fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("rate limited on every attempt ({attempts} tries)")]
    RateLimitExhausted { attempts: u32 },
    #[error("fetch failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// URL template with an `{api}` placeholder.
    pub base_url: String,
    /// Maximum attempts per identifier.
    pub max_retries: u32,
    /// Base backoff duration; attempt `n` sleeps `base * 2^(n-1)`.
    /// Zero is permitted (used by tests).
    pub backoff_factor: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 5,
            backoff_factor: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            user_agent: concat!("wellscrape/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Outcome of a single attempt that did not produce a body.
enum AttemptFailure {
    RateLimited,
    Transport(String),
}

/// Fetches well detail pages with bounded retry.
pub struct WellFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl WellFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn request_url(&self, api: &str) -> String {
        self.config.base_url.replace("{api}", api)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.config.backoff_factor * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Fetch the detail page for one identifier, returning the raw body.
    ///
    /// Classification per attempt, in priority order: rate-limit marker
    /// in the body (retryable), transport failure or non-2xx status
    /// (retryable), otherwise success. Exhausting the attempt budget
    /// returns an error; the caller counts it and moves on.
    pub async fn fetch(&self, api: &str) -> Result<String, FetchError> {
        let url = self.request_url(api);
        let max_retries = self.config.max_retries.max(1);
        let mut last_failure = AttemptFailure::Transport("no attempts made".to_string());

        for attempt in 1..=max_retries {
            let failure = match self.attempt(&url).await {
                Ok(body) => {
                    if attempt > 1 {
                        info!(api, attempt, "retry succeeded");
                    }
                    return Ok(body);
                }
                Err(failure) => failure,
            };

            if attempt < max_retries {
                let wait = self.backoff(attempt);
                match &failure {
                    AttemptFailure::RateLimited => {
                        warn!(
                            api,
                            attempt,
                            "rate limit page detected, backing off {:?}",
                            wait
                        );
                    }
                    AttemptFailure::Transport(e) => {
                        warn!(api, attempt, error = %e, "fetch attempt failed, backing off {:?}", wait);
                    }
                }
                tokio::time::sleep(wait).await;
            }
            last_failure = failure;
        }

        Err(match last_failure {
            AttemptFailure::RateLimited => FetchError::RateLimitExhausted {
                attempts: max_retries,
            },
            AttemptFailure::Transport(last_error) => FetchError::Exhausted {
                attempts: max_retries,
                last_error,
            },
        })
    }

    /// One GET. The rate-limit marker takes priority over the status
    /// code: the upstream serves its throttle page with a 200.
    async fn attempt(&self, url: &str) -> Result<String, AttemptFailure> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Err(AttemptFailure::Transport(e.to_string())),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(AttemptFailure::Transport(e.to_string())),
        };

        if body.contains(RATE_LIMIT_MARKER) {
            return Err(AttemptFailure::RateLimited);
        }
        if !status.is_success() {
            return Err(AttemptFailure::Transport(format!(
                "unexpected status {}",
                status
            )));
        }

        Ok(body)
    }
}
