//! HTTP fetch against the rendering endpoint.
//!
//! [`Fetcher`] is the seam between the exporter and the network. Production
//! runs use [`HttpFetcher`], a blocking `ureq` agent with native-tls and a
//! global per-request timeout. Tests plug in closures instead.

use std::time::Duration;

use diagram_export_config::ExportConfig;
use thiserror::Error;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Maximum accepted response body size (50 MB).
pub const MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Why a single fetch failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// DNS, connection, TLS or protocol failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The server answered with something other than 200 OK.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The body could not be read, or exceeded [`MAX_RESPONSE_SIZE`].
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Fetches raw response bytes for a request URL.
///
/// Implementations must be `Sync` so one fetcher can serve every export
/// worker.
pub trait Fetcher: Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Sync,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Create an HTTP agent configured with native-tls and a global timeout.
///
/// Non-2xx statuses are returned as responses rather than errors so the
/// fetcher can report the exact code.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Blocking GET fetcher backed by a shared `ureq` agent.
pub struct HttpFetcher {
    agent: Agent,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.user_agent.as_str(), config.timeout())
    }

    fn map_error(&self, error: ureq::Error) -> FetchError {
        match error {
            ureq::Error::Timeout(_) => FetchError::Timeout(self.timeout),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {url}");

        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status(status));
        }

        response
            .into_body()
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_vec()
            .map_err(|e| match e {
                ureq::Error::Timeout(_) => FetchError::Timeout(self.timeout),
                other => FetchError::Body(other.to_string()),
            })
    }
}
