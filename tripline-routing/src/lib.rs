//! Mapbox Optimized Trips provider for the tripline engine.
//!
//! This crate implements [`tripline_core::TripProvider`] over the Mapbox
//! Optimization HTTP API: the accumulated waypoints go out as a
//! semicolon-separated coordinate list, and the first returned trip's
//! polyline geometry comes back decoded into a [`tripline_core::RoutePath`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use tripline_core::TripProvider;
//! use tripline_routing::{HttpTripProvider, HttpTripProviderConfig, TripProfile};
//!
//! let config = HttpTripProviderConfig::new("pk.your-token")
//!     .with_profile(TripProfile::Driving)
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpTripProvider::with_config(config)?;
//!
//! let waypoints = [
//!     Coord { x: -71.103, y: 42.378 },
//!     Coord { x: -71.093, y: 42.388 },
//! ];
//! let trip = provider.optimized_trip(&waypoints)?;
//! println!("{} m in {:?}", trip.distance, trip.duration);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod mapbox;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpTripProvider, HttpTripProviderConfig,
    ProviderBuildError, TripProfile,
};
