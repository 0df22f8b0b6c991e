//! Blocking client for the Is-OSM-up-to-date backend API.
//!
//! The backend exposes three read-only endpoints:
//!
//! - `/api/getData` streams a GeoJSON feature collection for a bounding box;
//! - `/api/getStats` summarises the same features per mode;
//! - `/api/getFeature` forwards the OSM API answer for one element.
//!
//! The client bridges async `reqwest` calls to a synchronous interface by
//! blocking on a Tokio runtime it owns, so callers such as the CLI stay
//! synchronous.

use std::future::Future;
use std::time::Duration;

use geo::Rect;
use log::debug;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use uptodate_core::{ElementKind, Feature, Statistics, Summary};
use url::Url;

use super::response::{ElementResponse, OsmElement};
use super::{ApiError, ClientBuildError, FeatureSource};
use crate::geojson::{days_between_edits, parse_feature_collection};

/// Default user agent for backend requests.
pub const DEFAULT_USER_AGENT: &str = "uptodate/0.1";

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://is-osm-uptodate.frafra.eu";

/// Default request timeout in seconds.
///
/// Large bounding boxes are assembled tile by tile on the server, so answers
/// can take minutes.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Body the backend sends with a `503` when ohsome is unavailable.
const OHSOME_UNAVAILABLE_BODY: &str = "ohsome";

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL of the backend (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking HTTP client for the backend API.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it blocks on the caller's handle
/// through [`tokio::task::block_in_place`]. Inside a `current_thread`
/// runtime it falls back to its own runtime, which may deadlock if the
/// caller's runtime drives IO this request depends on.
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl ApiClient {
    /// Create a client with default configuration for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(ApiClientConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: ApiClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Return the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Fetch the features inside `bounds`, optionally narrowed by an ohsome
    /// filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::OhsomeUnavailable`] when the history service is
    /// down, and other [`ApiError`] variants for transport, status and
    /// decoding failures.
    pub fn get_data(&self, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Vec<Feature>, ApiError> {
        let url = self.bbox_url("getData", bounds, filter)?;
        let body = self.block_on(self.fetch_text(&url))?;
        parse_feature_collection(&body).map_err(|err| ApiError::Decode {
            url: url.into(),
            message: err.to_string(),
        })
    }

    /// Fetch per-mode statistics for the features inside `bounds`.
    ///
    /// Modes without values are returned as empty summaries. The backend
    /// summarises frequency in edits per year; it is returned in days
    /// between edits like every locally computed summary.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_data`].
    pub fn get_stats(&self, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Statistics, ApiError> {
        let url = self.bbox_url("getStats", bounds, filter)?;
        let body = self.block_on(self.fetch_text(&url))?;
        let mut statistics: Statistics =
            serde_json::from_str(&body).map_err(|err| ApiError::Decode {
                url: url.into(),
                message: err.to_string(),
            })?;
        statistics.frequency = frequency_in_days(statistics.frequency);
        Ok(statistics)
    }

    /// Fetch the current version of one OSM element.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ElementNotFound`] when the answer holds no element,
    /// and other [`ApiError`] variants for transport, status and decoding
    /// failures.
    pub fn get_feature(&self, kind: ElementKind, id: u64) -> Result<OsmElement, ApiError> {
        let url = self.endpoint_url(
            "getFeature",
            &[
                ("feature_type", kind.as_str().to_owned()),
                ("feature_id", id.to_string()),
            ],
        )?;
        let body = self.block_on(self.fetch_text(&url))?;
        let response: ElementResponse = serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            url: url.into(),
            message: err.to_string(),
        })?;
        response
            .elements
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ElementNotFound {
                kind: kind.as_str().to_owned(),
                id,
            })
    }

    /// Build the URL of a bounding-box endpoint.
    fn bbox_url(&self, endpoint: &str, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Url, ApiError> {
        let (min, max) = (bounds.min(), bounds.max());
        let mut params = vec![
            ("minx", min.x.to_string()),
            ("miny", min.y.to_string()),
            ("maxx", max.x.to_string()),
            ("maxy", max.y.to_string()),
        ];
        if let Some(expression) = filter.filter(|text| !text.trim().is_empty()) {
            params.push(("filter", expression.to_owned()));
        }
        self.endpoint_url(endpoint, &params)
    }

    /// Build `{base_url}/api/{endpoint}?{params}`.
    fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}/api/{endpoint}", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(&raw, params).map_err(|err| ApiError::InvalidUrl {
            url: raw,
            message: err.to_string(),
        })
    }

    /// Send a GET request and return the body of a successful answer.
    async fn fetch_text(&self, url: &Url) -> Result<String, ApiError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        check_status(url.as_str(), status, body)
    }

    /// Convert a reqwest error to an `ApiError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ApiError {
        if error.is_timeout() {
            return ApiError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ApiError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ApiError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Block on `future`, reusing the caller's multi-threaded runtime when
    /// there is one.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Map an HTTP status and body to the request outcome.
fn check_status(url: &str, status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }
    if status == 503 && body.trim() == OHSOME_UNAVAILABLE_BODY {
        return Err(ApiError::OhsomeUnavailable {
            url: url.to_owned(),
        });
    }
    Err(ApiError::Http {
        url: url.to_owned(),
        status,
        message: body,
    })
}

/// Re-express a frequency summary in edits per year as days between edits.
///
/// Inverting reverses the order, so the bounds and the outer quartiles swap.
/// Interpolated quartiles are converted pointwise and only approximate the
/// quartiles of the days themselves.
fn frequency_in_days(rates: Summary) -> Summary {
    let days = |rate: Option<f64>| rate.and_then(days_between_edits);
    Summary {
        count: rates.count,
        min: days(rates.max),
        first_quartile: days(rates.third_quartile),
        median: days(rates.median),
        third_quartile: days(rates.first_quartile),
        max: days(rates.min),
    }
}

impl FeatureSource for ApiClient {
    fn features(&self, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Vec<Feature>, ApiError> {
        self.get_data(bounds, filter)
    }
}
