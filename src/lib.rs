//! Facade crate for the tripline route-plotting engine.
//!
//! This crate re-exports the core domain types and exposes the Mapbox
//! Optimized Trips HTTP provider behind a feature flag.

#![forbid(unsafe_code)]

pub use tripline_core::{
    LayerId, MapSurface, Marker, OptimizedTrip, RoutePath, RouteSession, RouteStyle, RouteUpdate,
    SessionPhase, SessionState, TripError, TripProvider, route_to_geojson,
};

#[cfg(feature = "routing-http")]
pub use tripline_routing::{
    HttpTripProvider, HttpTripProviderConfig, ProviderBuildError, TripProfile,
};
