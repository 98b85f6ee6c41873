//! Test-only doubles for the session's boundaries.
//!
//! [`RecordingSurface`] stands in for the map-rendering library and
//! remembers every layer operation; [`StubTripProvider`] answers
//! optimized-trip requests from a pre-configured script without touching
//! the network.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use geo::Coord;

use crate::{
    LayerId, MapSurface, OptimizedTrip, RoutePath, RouteStyle, TripError, TripProvider,
};

/// Recording [`MapSurface`] for unit and behaviour tests.
///
/// Hands out sequential layer ids and records every operation so tests can
/// assert on the layers left installed and on the reset control's
/// visibility.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_layer: u64,
    markers: Vec<(LayerId, Coord<f64>)>,
    routes: Vec<(LayerId, RoutePath)>,
    removed: Vec<LayerId>,
    reset_visible: bool,
    show_calls: u32,
}

impl RecordingSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers installed and not yet removed, in installation order.
    #[must_use]
    pub fn live_layers(&self) -> Vec<LayerId> {
        self.markers
            .iter()
            .map(|(layer, _)| *layer)
            .chain(self.routes.iter().map(|(layer, _)| *layer))
            .filter(|layer| !self.removed.contains(layer))
            .collect()
    }

    /// Positions of the marker layers still installed.
    #[must_use]
    pub fn live_marker_positions(&self) -> Vec<Coord<f64>> {
        self.markers
            .iter()
            .filter(|(layer, _)| !self.removed.contains(layer))
            .map(|(_, position)| *position)
            .collect()
    }

    /// Geometry of the newest still-installed route layer.
    #[must_use]
    pub fn current_route(&self) -> Option<&RoutePath> {
        self.routes
            .iter()
            .rev()
            .find(|(layer, _)| !self.removed.contains(layer))
            .map(|(_, path)| path)
    }

    /// Total number of route layers ever drawn.
    #[must_use]
    pub fn routes_drawn(&self) -> usize {
        self.routes.len()
    }

    /// Whether the reset control is currently visible.
    #[must_use]
    pub fn reset_visible(&self) -> bool {
        self.reset_visible
    }

    /// How many times the reset control has been shown.
    #[must_use]
    pub fn show_calls(&self) -> u32 {
        self.show_calls
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, position: Coord<f64>) -> LayerId {
        self.next_layer += 1;
        let layer = LayerId::new(self.next_layer);
        self.markers.push((layer, position));
        layer
    }

    fn draw_route(&mut self, path: &RoutePath, _style: &RouteStyle) -> LayerId {
        self.next_layer += 1;
        let layer = LayerId::new(self.next_layer);
        self.routes.push((layer, path.clone()));
        layer
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.removed.push(layer);
    }

    fn show_reset_control(&mut self) {
        self.reset_visible = true;
        self.show_calls += 1;
    }

    fn hide_reset_control(&mut self) {
        self.reset_visible = false;
    }
}

/// Stub [`TripProvider`] answering requests from a pre-configured script.
///
/// Outcomes are consumed in order; once the script runs dry the final
/// outcome repeats. Every request's waypoint sequence is recorded so tests
/// can verify the accumulator handed to the service.
#[derive(Debug)]
pub struct StubTripProvider {
    script: RefCell<VecDeque<Result<OptimizedTrip, TripError>>>,
    last: Result<OptimizedTrip, TripError>,
    requests: RefCell<Vec<Vec<Coord<f64>>>>,
}

impl StubTripProvider {
    /// Provider answering every request with `trip`.
    #[must_use]
    pub fn with_trip(trip: OptimizedTrip) -> Self {
        Self::with_script([Ok(trip)])
    }

    /// Provider answering every request with a trip over `path` and zero
    /// distance and duration.
    #[must_use]
    pub fn with_path(path: RoutePath) -> Self {
        Self::with_trip(OptimizedTrip {
            path,
            distance: 0.0,
            duration: Duration::ZERO,
        })
    }

    /// Provider failing every request with `error`.
    #[must_use]
    pub fn with_error(error: TripError) -> Self {
        Self::with_script([Err(error)])
    }

    /// Provider playing back `outcomes` in order, repeating the final one.
    ///
    /// # Panics
    ///
    /// Panics when `outcomes` is empty.
    #[must_use]
    pub fn with_script<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<OptimizedTrip, TripError>>,
    {
        let script: VecDeque<_> = outcomes.into_iter().collect();
        let last = script
            .back()
            .cloned()
            .expect("script must contain at least one outcome");
        Self {
            script: RefCell::new(script),
            last,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Waypoint sequences of every request received, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<Coord<f64>>> {
        self.requests.borrow().clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl TripProvider for StubTripProvider {
    fn optimized_trip(&self, waypoints: &[Coord<f64>]) -> Result<OptimizedTrip, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::NotEnoughWaypoints);
        }
        self.requests.borrow_mut().push(waypoints.to_vec());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}
