//! Route geometry and its GeoJSON interchange form.
//!
//! Decoded trip geometry is held as a [`geo::LineString`] whose coordinates
//! follow the georust convention of `x` longitude, `y` latitude. Map
//! renderers consume the line as GeoJSON, where positions are likewise
//! ordered `[longitude, latitude]`.

use geo::LineString;
use geojson::{Geometry, Value};

/// Ordered path of an optimized route, in visit order.
pub type RoutePath = LineString<f64>;

/// Visual style applied to the rendered route layer.
///
/// The defaults match the classic orange overlay: `#ff7800`, five pixels
/// wide at 65% opacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStyle {
    /// Stroke colour as a CSS hex string.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: u32,
    /// Stroke opacity in the inclusive range `[0.0, 1.0]`.
    pub opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: "#ff7800".to_owned(),
            weight: 5,
            opacity: 0.65,
        }
    }
}

/// Convert a route path into GeoJSON line geometry.
///
/// Each coordinate becomes a `[longitude, latitude]` position, the order
/// GeoJSON mandates and the inverse of the `(lat, lng)` pairs a polyline
/// encoding carries.
///
/// # Examples
/// ```
/// use geo::LineString;
/// use geojson::Value;
/// use tripline_core::route_to_geojson;
///
/// let path = LineString::from(vec![(-120.2, 38.5), (-120.95, 40.7)]);
/// let geometry = route_to_geojson(&path);
///
/// match geometry.value {
///     Value::LineString(positions) => assert_eq!(positions[0], vec![-120.2, 38.5]),
///     other => panic!("expected a line string, got {other:?}"),
/// }
/// ```
#[must_use]
pub fn route_to_geojson(path: &RoutePath) -> Geometry {
    let positions = path
        .coords()
        .map(|coord| vec![coord.x, coord.y])
        .collect();
    Geometry::new(Value::LineString(positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// The canonical polyline-algorithm reference points, as lng/lat coords.
    fn reference_path() -> RoutePath {
        LineString::from(vec![
            (-120.2, 38.5),
            (-120.95, 40.7),
            (-126.453, 43.252),
        ])
    }

    #[rstest]
    fn geojson_positions_are_lng_lat_ordered() {
        let geometry = route_to_geojson(&reference_path());

        let Value::LineString(positions) = geometry.value else {
            panic!("expected a line string geometry");
        };
        assert_eq!(
            positions,
            vec![
                vec![-120.2, 38.5],
                vec![-120.95, 40.7],
                vec![-126.453, 43.252],
            ]
        );
    }

    #[rstest]
    fn geojson_serialises_to_interchange_form() {
        let path = LineString::from(vec![(-71.1, 42.37), (-71.09, 42.38)]);

        let json = serde_json::to_value(route_to_geojson(&path)).expect("should serialise");

        assert_eq!(json["type"], "LineString");
        assert_eq!(json["coordinates"][0][0], -71.1);
        assert_eq!(json["coordinates"][0][1], 42.37);
    }

    #[rstest]
    fn empty_path_yields_empty_line() {
        let geometry = route_to_geojson(&LineString::new(Vec::new()));

        let Value::LineString(positions) = geometry.value else {
            panic!("expected a line string geometry");
        };
        assert!(positions.is_empty());
    }

    #[rstest]
    fn default_style_matches_fixed_overlay() {
        let style = RouteStyle::default();
        assert_eq!(style.color, "#ff7800");
        assert_eq!(style.weight, 5);
        assert_eq!(style.opacity, 0.65);
    }
}
