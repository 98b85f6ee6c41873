//! Fetch optimized trips from a routing service.
//!
//! The [`TripProvider`] trait abstracts the remote optimization service:
//! callers supply the ordered waypoints placed so far and receive the
//! decoded geometry of a trip visiting all of them. The trait is
//! synchronous so it can be driven from event-loop callbacks; HTTP
//! implementations bridge to async internally.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::RoutePath;

/// Errors from [`TripProvider::optimized_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// Fewer than two waypoints were provided.
    ///
    /// A trip needs an origin and at least one stop. Callers should gate
    /// requests until a second marker exists.
    #[error("at least two waypoints are required for an optimized trip")]
    NotEnoughWaypoints,
    /// The request never reached the routing service.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Endpoint the request was addressed to.
        url: String,
        /// Transport-level failure description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint the request was addressed to.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Endpoint the request was addressed to.
        url: String,
        /// HTTP status code received.
        status: u16,
        /// Status-line description.
        message: String,
    },
    /// The service reported a failure in its response body.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoTrips"`.
        code: String,
        /// Accompanying error message, possibly empty.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// What failed to parse.
        message: String,
    },
}

/// A decoded optimized trip over the requested waypoints.
///
/// The service chooses the visit order; `path` is the travel geometry of
/// that order, not a straight line through the input sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedTrip {
    /// Route geometry in visit order, `x` longitude and `y` latitude.
    pub path: RoutePath,
    /// Total trip distance in metres.
    pub distance: f64,
    /// Total trip duration.
    pub duration: Duration,
}

/// Fetch a single optimized trip visiting a set of waypoints.
///
/// Implementers receive the full accumulated waypoint sequence on every
/// call and must return [`TripError::NotEnoughWaypoints`] for fewer than
/// two waypoints rather than panicking.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use geo::{Coord, LineString};
/// use tripline_core::{OptimizedTrip, TripError, TripProvider};
///
/// struct StraightLineProvider;
///
/// impl TripProvider for StraightLineProvider {
///     fn optimized_trip(
///         &self,
///         waypoints: &[Coord<f64>],
///     ) -> Result<OptimizedTrip, TripError> {
///         if waypoints.len() < 2 {
///             return Err(TripError::NotEnoughWaypoints);
///         }
///         Ok(OptimizedTrip {
///             path: LineString::new(waypoints.to_vec()),
///             distance: 0.0,
///             duration: Duration::ZERO,
///         })
///     }
/// }
///
/// let waypoints = [Coord { x: -71.1, y: 42.37 }, Coord { x: -71.09, y: 42.38 }];
/// let trip = StraightLineProvider.optimized_trip(&waypoints)?;
/// assert_eq!(trip.path.coords().count(), 2);
/// # Ok::<(), TripError>(())
/// ```
pub trait TripProvider {
    /// Request an optimized trip over `waypoints`, in placement order.
    fn optimized_trip(&self, waypoints: &[Coord<f64>]) -> Result<OptimizedTrip, TripError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use rstest::rstest;

    use crate::test_support::StubTripProvider;

    fn sample_waypoints(count: usize) -> Vec<Coord<f64>> {
        (0..count)
            .map(|i| Coord {
                x: -71.103 + i as f64 * 0.01,
                y: 42.378 + i as f64 * 0.01,
            })
            .collect()
    }

    #[rstest]
    fn returns_trip_for_two_waypoints() {
        let path = LineString::from(vec![(-71.1, 42.37), (-71.09, 42.38)]);
        let provider = StubTripProvider::with_path(path.clone());

        let trip = provider
            .optimized_trip(&sample_waypoints(2))
            .expect("should succeed");

        assert_eq!(trip.path, path);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_too_few_waypoints(#[case] count: usize) {
        let provider = StubTripProvider::with_path(LineString::new(Vec::new()));

        let err = provider
            .optimized_trip(&sample_waypoints(count))
            .expect_err("should fail");

        assert_eq!(err, TripError::NotEnoughWaypoints);
    }

    #[rstest]
    fn error_messages_name_the_endpoint() {
        let err = TripError::Timeout {
            url: "https://api.example.com/optimized-trips/v1".to_owned(),
            timeout_secs: 30,
        };
        assert!(err.to_string().contains("api.example.com"));
        assert!(err.to_string().contains("30"));
    }
}
