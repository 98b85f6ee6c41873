//! Contract consumed from the external map-rendering library.

use geo::Coord;

use crate::{LayerId, RoutePath, RouteStyle};

/// Host surface for marker and route layers.
///
/// Implementations wrap whatever renders the tiled basemap; the session
/// only needs layer bookkeeping and control over the visibility of the
/// reset affordance. Layer identifiers are assigned by the surface and
/// stay opaque to callers.
///
/// Tile rendering, attribution and drawing-tool chrome are entirely the
/// surface's concern.
pub trait MapSurface {
    /// Install a point-marker layer at `position`, returning its handle.
    fn add_marker(&mut self, position: Coord<f64>) -> LayerId;

    /// Install a styled route-line layer, returning its handle.
    fn draw_route(&mut self, path: &RoutePath, style: &RouteStyle) -> LayerId;

    /// Remove a previously installed layer.
    ///
    /// Unknown handles must be ignored rather than treated as an error.
    fn remove_layer(&mut self, layer: LayerId);

    /// Reveal the reset control.
    fn show_reset_control(&mut self);

    /// Hide the reset control.
    fn hide_reset_control(&mut self);
}
