//! Marker-event orchestration: accumulate waypoints, fetch, redraw.
//!
//! [`RouteSession`] is the handler behind the drawing control's
//! marker-created event. Each event installs the marker; from the second
//! marker onward a trip over every placed waypoint is requested and the
//! route layer replaced. The session owns its state outright and is
//! generic over its two boundaries, the map surface and the trip provider.

use geo::Coord;
use log::{debug, warn};

use crate::{
    MapSurface, Marker, OptimizedTrip, RouteStyle, SessionState, TripError, TripProvider,
};

/// Lifecycle phase of a [`RouteSession`].
///
/// The phase gates the reset control: it is revealed once, when the first
/// route renders, and never re-shown on later redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No route rendered yet; the reset control is hidden.
    AwaitingFirstRoute,
    /// At least one route has rendered; the reset control is visible.
    HasRoute,
}

/// Outcome of a successfully handled marker-created event.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteUpdate {
    /// The marker was recorded but no request was issued: fewer than two
    /// waypoints exist.
    Pending,
    /// A trip over all current markers was fetched and rendered.
    Routed(OptimizedTrip),
}

/// Reacts to marker-creation events and keeps the surface in step.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use tripline_core::test_support::{RecordingSurface, StubTripProvider};
/// use tripline_core::{RouteSession, RouteUpdate, TripError};
///
/// let path = LineString::from(vec![(-71.1, 42.37), (-71.09, 42.38)]);
/// let mut session = RouteSession::new(
///     RecordingSurface::new(),
///     StubTripProvider::with_path(path),
/// );
///
/// let first = session.on_marker_created(Coord { x: -71.1, y: 42.37 })?;
/// assert_eq!(first, RouteUpdate::Pending);
///
/// let second = session.on_marker_created(Coord { x: -71.09, y: 42.38 })?;
/// assert!(matches!(second, RouteUpdate::Routed(_)));
/// assert!(session.surface().reset_visible());
///
/// session.reset();
/// assert!(session.markers().is_empty());
/// # Ok::<(), TripError>(())
/// ```
pub struct RouteSession<S, P>
where
    S: MapSurface,
    P: TripProvider,
{
    surface: S,
    provider: P,
    state: SessionState,
    phase: SessionPhase,
    style: RouteStyle,
}

impl<S, P> RouteSession<S, P>
where
    S: MapSurface,
    P: TripProvider,
{
    /// Create a session rendering routes with the default style.
    pub fn new(surface: S, provider: P) -> Self {
        Self::with_style(surface, provider, RouteStyle::default())
    }

    /// Create a session rendering routes with `style`.
    pub fn with_style(surface: S, provider: P, style: RouteStyle) -> Self {
        Self {
            surface,
            provider,
            state: SessionState::new(),
            phase: SessionPhase::AwaitingFirstRoute,
            style,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Placed markers in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.state.markers()
    }

    /// Borrow the session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Borrow the underlying map surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Borrow the underlying trip provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Handle a marker-created event from the drawing control.
    ///
    /// The marker is installed on the surface and recorded before any
    /// request is made, so it survives a failed request. From the second
    /// marker onward an optimized trip over every placed waypoint is
    /// requested; on success the previous route layer is removed, the new
    /// geometry drawn in its place and the reset control revealed on the
    /// first render.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`TripError`] when the request fails. The
    /// marker stays placed and any previously rendered route layer is left
    /// untouched; [`reset`](Self::reset) remains the way out of the
    /// resulting mismatch.
    pub fn on_marker_created(&mut self, position: Coord<f64>) -> Result<RouteUpdate, TripError> {
        let layer = self.surface.add_marker(position);
        self.state.add_marker(Marker::new(layer, position));

        let waypoints = self.state.waypoints();
        if waypoints.len() < 2 {
            debug!("marker placed; waiting for a second waypoint");
            return Ok(RouteUpdate::Pending);
        }

        let trip = match self.provider.optimized_trip(&waypoints) {
            Ok(trip) => trip,
            Err(err) => {
                warn!(
                    "optimized trip over {} waypoints failed: {err}",
                    waypoints.len()
                );
                return Err(err);
            }
        };

        // Remove the superseded layer before drawing its replacement.
        if let Some(previous) = self.state.route_layer() {
            self.surface.remove_layer(previous);
        }
        let route_layer = self.surface.draw_route(&trip.path, &self.style);
        self.state.set_route(route_layer);

        if self.phase == SessionPhase::AwaitingFirstRoute {
            self.surface.show_reset_control();
            self.phase = SessionPhase::HasRoute;
        }

        Ok(RouteUpdate::Routed(trip))
    }

    /// Clear the session and every layer it placed.
    ///
    /// Removes all marker layers and the route layer from the surface,
    /// empties the state and hides the reset control. Safe to call on an
    /// already-empty session.
    pub fn reset(&mut self) {
        for layer in self.state.clear() {
            self.surface.remove_layer(layer);
        }
        self.surface.hide_reset_control();
        self.phase = SessionPhase::AwaitingFirstRoute;
    }
}
