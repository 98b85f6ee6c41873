//! HTTP-based `TripProvider` using the Mapbox Optimized Trips API.
//!
//! This module provides [`HttpTripProvider`], an implementation of the
//! [`TripProvider`] trait that fetches optimized multi-stop trips from the
//! Mapbox Optimization service via HTTP and decodes the returned polyline
//! geometry.
//!
//! # Architecture
//!
//! The [`TripProvider`] trait is synchronous so it can be driven from
//! event-loop callbacks. This provider bridges the async HTTP calls to the
//! sync interface by blocking on a Tokio runtime internally.

use std::time::Duration;

use geo::Coord;
use log::debug;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripline_core::{OptimizedTrip, RoutePath, TripError, TripProvider};
use url::Url;

use crate::mapbox::TripsResponse;

/// Error type for [`HttpTripProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
    /// The configured base URL is not a valid URL.
    BaseUrl(url::ParseError),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
            Self::BaseUrl(err) => write!(f, "invalid base URL: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::BaseUrl(err) => Some(err),
        }
    }
}

/// Default user agent for Optimization API requests.
pub const DEFAULT_USER_AGENT: &str = "tripline-routing/0.1";

/// Default base URL of the Mapbox API.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Precision of the polyline geometry the service returns.
const POLYLINE_PRECISION: u32 = 5;

/// Routing profile for the optimization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripProfile {
    /// Car travel times.
    #[default]
    Driving,
    /// Pedestrian travel times.
    Walking,
    /// Bicycle travel times.
    Cycling,
}

impl TripProfile {
    /// URL path segment naming this profile.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

/// Configuration for [`HttpTripProvider`].
#[derive(Debug, Clone)]
pub struct HttpTripProviderConfig {
    /// Base URL of the Mapbox API.
    pub base_url: String,
    /// Access token sent as the `access_token` query parameter.
    pub access_token: String,
    /// Routing profile used for the trip.
    pub profile: TripProfile,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpTripProviderConfig {
    /// Create a configuration with the given access token and defaults
    /// for everything else.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            profile: TripProfile::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the base URL, e.g. for a self-hosted or mock endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: TripProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
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

/// HTTP-based trip provider using the Mapbox Optimized Trips API.
///
/// The provider implements the synchronous [`TripProvider`] trait by
/// blocking on asynchronous HTTP requests internally. It owns a Tokio
/// runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider blocks on its own stored
/// runtime. Inside a multi-threaded Tokio runtime (detected via
/// [`Handle::try_current()`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested-runtime panics. Inside
/// a `current_thread` runtime it falls back to its own runtime, which can
/// deadlock if the caller's runtime is driving IO this request depends on.
pub struct HttpTripProvider {
    client: Client,
    config: HttpTripProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTripProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTripProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpTripProvider {
    /// Create a provider for the public Mapbox API with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(access_token: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTripProviderConfig::new(access_token))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpTripProviderConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(ProviderBuildError::BaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the Optimized Trips endpoint for the given waypoints.
    ///
    /// The format is
    /// `{base_url}/optimized-trips/v1/mapbox/{profile}/{coordinates}`
    /// where coordinates are semicolon-separated `lon,lat` pairs. The
    /// access token is deliberately absent: this string appears in logs
    /// and error messages.
    fn trip_endpoint(&self, waypoints: &[Coord<f64>]) -> String {
        let coords: String = waypoints
            .iter()
            .map(|coord| format!("{},{}", coord.x, coord.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/optimized-trips/v1/mapbox/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile.as_str(),
            coords
        )
    }

    /// Full request URL: the endpoint plus the access-token parameter.
    fn build_trip_url(&self, waypoints: &[Coord<f64>]) -> String {
        format!(
            "{}?access_token={}",
            self.trip_endpoint(waypoints),
            self.config.access_token
        )
    }

    /// Fetch and decode the optimized trip asynchronously.
    async fn fetch_trip_async(
        &self,
        waypoints: &[Coord<f64>],
    ) -> Result<OptimizedTrip, TripError> {
        let endpoint = self.trip_endpoint(waypoints);
        debug!(
            "requesting optimized trip over {} waypoints from {endpoint}",
            waypoints.len()
        );

        let response = self
            .client
            .get(self.build_trip_url(waypoints))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &endpoint))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &endpoint))?;

        let trips_response: TripsResponse =
            response.json().await.map_err(|err| TripError::ParseError {
                message: err.to_string(),
            })?;

        Self::convert_response(trips_response)
    }

    /// Convert a reqwest error to a `TripError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, endpoint: &str) -> TripError {
        if error.is_timeout() {
            return TripError::Timeout {
                url: endpoint.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TripError::HttpError {
                url: endpoint.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TripError::NetworkError {
            url: endpoint.to_owned(),
            message: error.to_string(),
        }
    }

    /// Convert a service response into a decoded [`OptimizedTrip`].
    fn convert_response(response: TripsResponse) -> Result<OptimizedTrip, TripError> {
        if !response.is_ok() {
            return Err(TripError::ServiceError {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let trip = response
            .trips
            .and_then(|trips| trips.into_iter().next())
            .ok_or_else(|| TripError::ParseError {
                message: "response contained no trips".to_string(),
            })?;

        let path: RoutePath = polyline::decode_polyline(&trip.geometry, POLYLINE_PRECISION)
            .map_err(|err| TripError::ParseError {
                message: format!("invalid trip geometry: {err}"),
            })?;

        // Negative, NaN or infinite durations would panic
        // Duration::from_secs_f64; clamp them to zero instead.
        let duration = Some(trip.duration)
            .filter(|secs| *secs >= 0.0 && secs.is_finite())
            .map_or(Duration::ZERO, Duration::from_secs_f64);

        Ok(OptimizedTrip {
            path,
            distance: trip.distance,
            duration,
        })
    }
}

impl TripProvider for HttpTripProvider {
    /// Fetch an optimized trip over the given waypoints.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must
    /// be multi-threaded (`flavor = "multi_thread"`); from a
    /// `current_thread` runtime the provider falls back to its own
    /// internal runtime, which may block the caller's.
    fn optimized_trip(&self, waypoints: &[Coord<f64>]) -> Result<OptimizedTrip, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::NotEnoughWaypoints);
        }

        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        let future = self.fetch_trip_async(waypoints);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapbox::Trip;
    use rstest::{fixture, rstest};

    /// Epsilon for floating-point coordinate comparisons.
    const COORDINATE_EPSILON: f64 = 1.0e-6;

    /// Canonical polyline-algorithm test vector and its decoded points.
    const REFERENCE_GEOMETRY: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
    const REFERENCE_POINTS: [(f64, f64); 3] = [
        (-120.2, 38.5),
        (-120.95, 40.7),
        (-126.453, 43.252),
    ];

    #[fixture]
    fn sample_waypoints() -> Vec<Coord<f64>> {
        vec![
            Coord { x: -71.103, y: 42.378 },
            Coord { x: -71.093, y: 42.388 },
        ]
    }

    fn provider_for(base_url: &str) -> HttpTripProvider {
        let config = HttpTripProviderConfig::new("pk.test-token").with_base_url(base_url);
        HttpTripProvider::with_config(config).expect("provider should build")
    }

    fn ok_response(trips: Vec<Trip>) -> TripsResponse {
        TripsResponse {
            code: "Ok".to_string(),
            message: None,
            trips: Some(trips),
        }
    }

    #[rstest]
    fn trip_endpoint_formats_coordinates(sample_waypoints: Vec<Coord<f64>>) {
        let provider = provider_for("https://api.example.com");

        let endpoint = provider.trip_endpoint(&sample_waypoints);

        assert_eq!(
            endpoint,
            "https://api.example.com/optimized-trips/v1/mapbox/driving/-71.103,42.378;-71.093,42.388"
        );
    }

    #[rstest]
    fn trip_endpoint_strips_trailing_slash(sample_waypoints: Vec<Coord<f64>>) {
        let provider = provider_for("https://api.example.com/");

        let endpoint = provider.trip_endpoint(&sample_waypoints);

        assert!(endpoint.starts_with("https://api.example.com/optimized-trips/"));
        assert!(!endpoint.contains("//optimized-trips"));
    }

    #[rstest]
    fn request_url_carries_token_but_endpoint_does_not(sample_waypoints: Vec<Coord<f64>>) {
        let provider = provider_for("https://api.example.com");

        let url = provider.build_trip_url(&sample_waypoints);
        let endpoint = provider.trip_endpoint(&sample_waypoints);

        assert!(url.ends_with("?access_token=pk.test-token"));
        assert!(!endpoint.contains("access_token"));
    }

    #[rstest]
    #[case(TripProfile::Driving, "driving")]
    #[case(TripProfile::Walking, "walking")]
    #[case(TripProfile::Cycling, "cycling")]
    fn profile_names_the_path_segment(#[case] profile: TripProfile, #[case] segment: &str) {
        assert_eq!(profile.as_str(), segment);
    }

    #[rstest]
    fn convert_response_decodes_reference_geometry() {
        let response = ok_response(vec![Trip {
            geometry: REFERENCE_GEOMETRY.to_string(),
            distance: 1532.4,
            duration: 300.5,
        }]);

        let trip = HttpTripProvider::convert_response(response).expect("should decode");

        let coords: Vec<_> = trip.path.coords().copied().collect();
        assert_eq!(coords.len(), REFERENCE_POINTS.len());
        for (coord, (lng, lat)) in coords.iter().zip(REFERENCE_POINTS) {
            assert!((coord.x - lng).abs() < COORDINATE_EPSILON, "lng {} != {lng}", coord.x);
            assert!((coord.y - lat).abs() < COORDINATE_EPSILON, "lat {} != {lat}", coord.y);
        }
        assert_eq!(trip.distance, 1532.4);
        assert_eq!(trip.duration, Duration::from_secs_f64(300.5));
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = TripsResponse {
            code: "NoTrips".to_string(),
            message: Some("No trip found".to_string()),
            trips: None,
        };

        let err = HttpTripProvider::convert_response(response).expect_err("should fail");

        match err {
            TripError::ServiceError { code, message } => {
                assert_eq!(code, "NoTrips");
                assert_eq!(message, "No trip found");
            }
            _ => panic!("expected ServiceError, got {err:?}"),
        }
    }

    #[rstest]
    fn convert_response_handles_missing_trips() {
        let response = TripsResponse {
            code: "Ok".to_string(),
            message: None,
            trips: None,
        };

        let err = HttpTripProvider::convert_response(response).expect_err("should fail");

        assert!(matches!(err, TripError::ParseError { .. }));
    }

    #[rstest]
    fn convert_response_handles_empty_trips() {
        let err =
            HttpTripProvider::convert_response(ok_response(Vec::new())).expect_err("should fail");

        assert!(matches!(err, TripError::ParseError { .. }));
    }

    #[rstest]
    fn convert_response_rejects_malformed_geometry() {
        let response = ok_response(vec![Trip {
            geometry: "not a polyline".to_string(),
            distance: 0.0,
            duration: 0.0,
        }]);

        let err = HttpTripProvider::convert_response(response).expect_err("should fail");

        assert!(matches!(err, TripError::ParseError { .. }));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn convert_response_clamps_invalid_durations(#[case] duration: f64) {
        let response = ok_response(vec![Trip {
            geometry: REFERENCE_GEOMETRY.to_string(),
            distance: 0.0,
            duration,
        }]);

        let trip = HttpTripProvider::convert_response(response).expect("should decode");

        assert_eq!(trip.duration, Duration::ZERO);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn too_few_waypoints_return_error_without_io(#[case] count: usize) {
        let provider = provider_for("https://api.example.com");
        let waypoints: Vec<Coord<f64>> = (0..count)
            .map(|i| Coord {
                x: i as f64,
                y: i as f64,
            })
            .collect();

        let err = provider.optimized_trip(&waypoints).expect_err("should fail");

        assert_eq!(err, TripError::NotEnoughWaypoints);
    }

    #[rstest]
    fn invalid_base_url_fails_to_build() {
        let config = HttpTripProviderConfig::new("pk.test-token").with_base_url("not a url");

        let err = HttpTripProvider::with_config(config).expect_err("should fail");

        assert!(matches!(err, ProviderBuildError::BaseUrl(_)));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpTripProviderConfig::new("pk.test-token")
            .with_base_url("https://example.com")
            .with_profile(TripProfile::Cycling)
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.access_token, "pk.test-token");
        assert_eq!(config.profile, TripProfile::Cycling);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
