//! USGS FDSN event service client.
//!
//! Provides blocking HTTP access to the earthquake query endpoint.
//! Uses reqwest with rustls for TLS.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::errors::QuakewatchError;

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("quakewatch/", env!("CARGO_PKG_VERSION"));

/// USGS event query endpoint.
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Host probed for connectivity before a fetch is attempted.
const PROBE_HOST: &str = "earthquake.usgs.gov";
const PROBE_PORT: u16 = 443;
const PROBE_TIMEOUT_SECS: u64 = 3;

/// Query parameters for the event endpoint.
///
/// `min_magnitude` and `order_by` come from the settings store as opaque
/// strings and are passed through unvalidated.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub min_magnitude: String,
    pub order_by: String,
    pub limit: u32,
}

impl QueryParams {
    /// Build the request URL for these parameters.
    ///
    /// Parameters are appended in a fixed order (`format`, `limit`,
    /// `minmag`, `orderby`), so the same inputs always produce a
    /// byte-identical string.
    #[must_use]
    pub fn request_url(&self, base_url: &str) -> String {
        format!(
            "{base_url}?format=geojson&limit={}&minmag={}&orderby={}",
            self.limit, self.min_magnitude, self.order_by
        )
    }
}

/// Source of raw feed bytes.
///
/// The orchestrator fetches through this trait so tests can substitute a
/// canned response for the network.
pub trait FeedSource: Send + Sync {
    /// Fetch the raw response body for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server responds with
    /// a non-success status. Never retries.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, QuakewatchError>;
}

/// Blocking client for the USGS event service.
pub struct UsgsClient {
    client: Client,
}

impl UsgsClient {
    /// Create a new USGS client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, QuakewatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

impl FeedSource for UsgsClient {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str) -> Result<Vec<u8>, QuakewatchError> {
        debug!("fetching feed from {}", url);

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            // Keep timeout and connect failures distinguishable from
            // other transport errors
            Err(e) if e.is_timeout() => {
                return Err(QuakewatchError::Timeout(e.to_string()));
            }
            Err(e) if e.is_connect() => {
                return Err(QuakewatchError::Connect(e.to_string()));
            }
            Err(e) => return Err(QuakewatchError::Http(e)),
        };

        // Check status before reading the body
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QuakewatchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes()?;
        debug!("fetched {} bytes", body.len());
        Ok(body.to_vec())
    }
}

/// Network reachability check, consulted before a fetch starts.
pub trait Connectivity: Send + Sync {
    /// Whether a network path to the feed host appears to exist.
    fn is_online(&self) -> bool;
}

/// Connectivity probe that opens a short-lived TCP connection.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl TcpProbe {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Probe the host named in `url`, falling back to the USGS host when
    /// the URL carries no resolvable host.
    #[must_use]
    pub fn for_url(url: &str) -> Self {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return Self::default();
        };
        match (parsed.host_str(), parsed.port_or_known_default()) {
            (Some(host), Some(port)) => {
                Self::new(host, port, Duration::from_secs(PROBE_TIMEOUT_SECS))
            }
            _ => Self::default(),
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(
            PROBE_HOST,
            PROBE_PORT,
            Duration::from_secs(PROBE_TIMEOUT_SECS),
        )
    }
}

impl Connectivity for TcpProbe {
    fn is_online(&self) -> bool {
        // DNS failure counts as offline
        let Ok(addrs) = (self.host.as_str(), self.port).to_socket_addrs() else {
            return false;
        };

        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_fixed_order() {
        let params = QueryParams {
            min_magnitude: "6.5".to_string(),
            order_by: "time".to_string(),
            limit: 10,
        };

        assert_eq!(
            params.request_url(USGS_QUERY_URL),
            "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&limit=10&minmag=6.5&orderby=time"
        );
    }

    #[test]
    fn test_request_url_is_deterministic() {
        let params = QueryParams {
            min_magnitude: "4".to_string(),
            order_by: "magnitude".to_string(),
            limit: 25,
        };

        let first = params.request_url("http://localhost:9999/query");
        let second = params.request_url("http://localhost:9999/query");
        assert_eq!(first, second);
    }

    #[test]
    fn test_params_pass_through_unvalidated() {
        // Settings values are opaque strings; the builder does not
        // second-guess them
        let params = QueryParams {
            min_magnitude: "not-a-number".to_string(),
            order_by: "time-asc".to_string(),
            limit: 1,
        };

        let url = params.request_url(USGS_QUERY_URL);
        assert!(url.contains("minmag=not-a-number"));
        assert!(url.contains("orderby=time-asc"));
    }

    #[test]
    fn test_probe_for_url() {
        let probe = TcpProbe::for_url("http://localhost:8080/query");
        assert_eq!(probe.host, "localhost");
        assert_eq!(probe.port, 8080);

        let probe = TcpProbe::for_url(USGS_QUERY_URL);
        assert_eq!(probe.host, "earthquake.usgs.gov");
        assert_eq!(probe.port, 443);

        // Garbage falls back to the default host
        let probe = TcpProbe::for_url("not a url");
        assert_eq!(probe.host, PROBE_HOST);
    }
}
