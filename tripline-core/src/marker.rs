//! Markers placed on the map surface.

use geo::Coord;

/// Opaque identifier for a layer installed on a map surface.
///
/// Identifiers are assigned by the [`MapSurface`](crate::MapSurface)
/// implementation when a layer is added and are meaningful only to the
/// surface that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerId(u64);

impl LayerId {
    /// Wrap a raw surface-assigned identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A placed point marker: the surface's layer handle plus its position.
///
/// Markers are created per drawing event and removed only by a session
/// reset.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripline_core::{LayerId, Marker};
///
/// let marker = Marker::new(LayerId::new(7), Coord { x: -71.103, y: 42.378 });
/// assert_eq!(marker.layer.raw(), 7);
/// assert_eq!(marker.position.y, 42.378);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Handle of the marker's layer on the surface.
    pub layer: LayerId,
    /// Geographic position, `x` longitude and `y` latitude.
    pub position: Coord<f64>,
}

impl Marker {
    /// Construct a marker from its layer handle and position.
    #[must_use]
    pub const fn new(layer: LayerId, position: Coord<f64>) -> Self {
        Self { layer, position }
    }
}
