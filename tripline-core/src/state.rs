//! In-process record of placed markers and the rendered route.

use geo::Coord;

use crate::{LayerId, Marker};

/// Aggregate session state: the ordered markers plus the optional route
/// layer.
///
/// The waypoint sequence handed to the routing service is derived from the
/// marker list, so it always reflects every placed marker in placement
/// order and is consumed whole on each request. A present route layer is
/// expected to cover exactly the markers held; it may lag briefly while a
/// request is outstanding and is replaced wholesale by the next successful
/// response.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripline_core::{LayerId, Marker, SessionState};
///
/// let mut state = SessionState::new();
/// state.add_marker(Marker::new(LayerId::new(1), Coord { x: -71.1, y: 42.37 }));
/// state.add_marker(Marker::new(LayerId::new(2), Coord { x: -71.09, y: 42.38 }));
///
/// assert_eq!(state.marker_count(), 2);
/// assert_eq!(state.waypoints()[1], Coord { x: -71.09, y: 42.38 });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    markers: Vec<Marker>,
    route: Option<LayerId>,
}

impl SessionState {
    /// Create an empty session state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placed marker.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Number of markers currently placed.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Placed markers in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Ordered positions of every placed marker.
    #[must_use]
    pub fn waypoints(&self) -> Vec<Coord<f64>> {
        self.markers.iter().map(|marker| marker.position).collect()
    }

    /// Handle of the rendered route layer, if any.
    #[must_use]
    pub fn route_layer(&self) -> Option<LayerId> {
        self.route
    }

    /// Install the new route layer, returning the one it displaces.
    ///
    /// The displaced handle must be removed from the surface by the
    /// caller; the state only tracks ownership.
    pub fn set_route(&mut self, layer: LayerId) -> Option<LayerId> {
        self.route.replace(layer)
    }

    /// Drain every tracked layer so the caller can remove them from the
    /// surface.
    ///
    /// Clears the marker list and the route reference. On empty state this
    /// returns an empty list, making repeated resets harmless.
    pub fn clear(&mut self) -> Vec<LayerId> {
        let mut layers: Vec<LayerId> = self
            .markers
            .drain(..)
            .map(|marker| marker.layer)
            .collect();
        layers.extend(self.route.take());
        layers
    }
}
