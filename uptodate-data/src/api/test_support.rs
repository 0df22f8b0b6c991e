//! Test utilities for feature sources.
//!
//! [`StubFeatureSource`] returns a pre-configured answer without making HTTP
//! requests, and records the last query it received.

use std::cell::RefCell;

use geo::Rect;
use uptodate_core::Feature;

use super::{ApiError, FeatureSource};

/// Query received by a [`StubFeatureSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    /// Requested bounding box.
    pub bounds: Rect<f64>,
    /// Requested filter expression.
    pub filter: Option<String>,
}

/// Stub [`FeatureSource`] for testing.
///
/// # Example
///
/// ```
/// use geo::{Coord, Rect};
/// use uptodate_data::api::FeatureSource;
/// use uptodate_data::api::test_support::StubFeatureSource;
///
/// let source = StubFeatureSource::with_features(Vec::new());
/// let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
///
/// assert!(source.features(&bounds, None).is_ok());
/// assert_eq!(source.last_query().map(|query| query.bounds), Some(bounds));
/// ```
#[derive(Debug, Clone)]
pub struct StubFeatureSource {
    response: Result<Vec<Feature>, ApiError>,
    last_query: RefCell<Option<RecordedQuery>>,
}

impl StubFeatureSource {
    /// Create a source that returns the given features.
    #[must_use]
    pub const fn with_features(features: Vec<Feature>) -> Self {
        Self {
            response: Ok(features),
            last_query: RefCell::new(None),
        }
    }

    /// Create a source that fails with the given error.
    #[must_use]
    pub const fn with_error(error: ApiError) -> Self {
        Self {
            response: Err(error),
            last_query: RefCell::new(None),
        }
    }

    /// Return the last query received.
    #[must_use]
    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.last_query.borrow().clone()
    }
}

impl FeatureSource for StubFeatureSource {
    fn features(&self, bounds: &Rect<f64>, filter: Option<&str>) -> Result<Vec<Feature>, ApiError> {
        *self.last_query.borrow_mut() = Some(RecordedQuery {
            bounds: *bounds,
            filter: filter.map(str::to_owned),
        });
        self.response.clone()
    }
}
