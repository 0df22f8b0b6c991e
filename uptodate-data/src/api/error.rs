//! Error types for the backend HTTP client.

use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient) requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The upstream ohsome service is unavailable.
    ///
    /// The backend answers `503` with the body `ohsome` when the history
    /// service it queries is down or overloaded.
    #[error("the ohsome history service is unavailable ({url})")]
    OhsomeUnavailable {
        /// Requested URL.
        url: String,
    },
    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The backend answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },
    /// The request could not be sent or the response could not be read.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error description.
        message: String,
    },
    /// The configured base URL could not be combined into a request URL.
    #[error("invalid request URL '{url}': {message}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parser error description.
        message: String,
    },
    /// The OSM element lookup returned no element.
    #[error("{kind} {id} was not found")]
    ElementNotFound {
        /// Requested element kind.
        kind: String,
        /// Requested element identifier.
        id: u64,
    },
}

/// Error type for [`ApiClient`](super::ApiClient) construction failures.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
