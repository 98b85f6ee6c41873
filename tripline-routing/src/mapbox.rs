//! Mapbox Optimization API response types.
//!
//! Deserialisation types for the Optimized Trips v1 response. The service
//! returns trips in optimized visit order with polyline-encoded geometry.
//!
//! See: <https://docs.mapbox.com/api/navigation/optimization-v1/>

use serde::Deserialize;

/// Optimized Trips v1 response envelope.
///
/// The response carries either the computed trips on success or an error
/// message on failure; the `code` field indicates which.
#[derive(Debug, Deserialize)]
pub struct TripsResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"Ok"` - the request succeeded
    /// - `"NoTrips"` - no trip could be computed
    /// - `"NotImplemented"` - unsupported option combination
    /// - `"InvalidInput"` - malformed coordinates or options
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Computed trips; the first element is the optimized multi-stop
    /// route over all supplied coordinates.
    pub trips: Option<Vec<Trip>>,
}

impl TripsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A single computed trip.
#[derive(Debug, Deserialize)]
pub struct Trip {
    /// Polyline-encoded route geometry, precision 5.
    pub geometry: String,
    /// Total trip distance in metres.
    #[serde(default)]
    pub distance: f64,
    /// Total trip duration in seconds.
    #[serde(default)]
    pub duration: f64,
}
