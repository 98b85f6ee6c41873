//! Core domain types for the tripline route-plotting engine.
//!
//! The crate models a marker-placement session: markers accumulate on a
//! map surface and, from the second marker onward, an optimized trip over
//! every placed waypoint is fetched from a routing service and drawn as a
//! single route layer. A reset clears the lot.
//!
//! The map surface and the routing service are external collaborators
//! consumed through the [`MapSurface`] and [`TripProvider`] traits; this
//! crate contains no rendering and no HTTP.

#![forbid(unsafe_code)]

mod geometry;
mod marker;
mod session;
mod state;
mod surface;
mod trip;

#[doc(hidden)]
pub mod test_support;

pub use geometry::{RoutePath, RouteStyle, route_to_geojson};
pub use marker::{LayerId, Marker};
pub use session::{RouteSession, RouteUpdate, SessionPhase};
pub use state::SessionState;
pub use surface::MapSurface;
pub use trip::{OptimizedTrip, TripError, TripProvider};
