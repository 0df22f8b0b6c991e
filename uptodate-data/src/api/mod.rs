//! Access to the Is-OSM-up-to-date backend.
//!
//! [`ApiClient`] talks to the backend over HTTP. Code that only needs
//! features for a bounding box depends on the [`FeatureSource`] trait instead,
//! so it can be exercised with [`test_support::StubFeatureSource`].
//!
//! # Example
//!
//! ```no_run
//! use geo::{Coord, Rect};
//! use std::time::Duration;
//! use uptodate_data::api::{ApiClient, ApiClientConfig, FeatureSource};
//!
//! let config = ApiClientConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(120))
//!     .with_user_agent("my-app/1.0");
//! let client = ApiClient::with_config(config)?;
//!
//! let bounds = Rect::new(Coord { x: 9.18, y: 45.46 }, Coord { x: 9.20, y: 45.47 });
//! let features = client.features(&bounds, Some("amenity=drinking_water"))?;
//! println!("fetched {} features", features.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod error;
mod response;

#[doc(hidden)]
pub mod test_support;

use geo::Rect;
use uptodate_core::Feature;

pub use client::{ApiClient, ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, ClientBuildError};
pub use response::{ElementResponse, OsmElement};

/// Source of features for a bounding box.
pub trait FeatureSource {
    /// Return the features inside `bounds`, optionally narrowed by an ohsome
    /// filter expression.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the features cannot be retrieved.
    fn features(&self, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Vec<Feature>, ApiError>;
}
