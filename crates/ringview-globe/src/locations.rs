//! Catalogue of named surface locations and nearest-match labelling.
//!
//! Longitudes follow the scene's texture frame, in which east longitudes are
//! negative (Tokyo sits at -139.77).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoCoordinate, longitude_difference};

/// A pick is labelled with a catalogued name only when it lies within this
/// many degrees of it in both latitude and longitude.
pub const MATCH_TOLERANCE_DEGREES: f64 = 2.0;

/// A named point on the planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NamedLocation {
    pub name: &'static str,
    pub coordinate: GeoCoordinate,
}

const fn location(name: &'static str, latitude: f64, longitude: f64) -> NamedLocation {
    NamedLocation {
        name,
        coordinate: GeoCoordinate::new(latitude, longitude),
    }
}

/// Built-in locations.
pub const CATALOG: &[NamedLocation] = &[
    location("Tokyo", 35.6833, -139.7667),
    location("London", 51.5074, 0.1278),
    location("New York", 40.7128, 74.0060),
    location("Sydney", -33.8688, -151.2093),
    location("Cairo", 30.0444, -31.2357),
    location("Rio de Janeiro", -22.9068, 43.1729),
    location("Reykjavik", 64.1466, 21.9426),
    location("Nairobi", -1.2921, -36.8219),
    location("Singapore", 1.3521, -103.8198),
    location("Mumbai", 19.0760, -72.8777),
    location("Quito", -0.1807, 78.4678),
    location("McMurdo Station", -77.8419, -166.6863),
];

/// Label attached to a picked coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationLabel {
    /// Within tolerance of a catalogued location.
    Named(String),
    /// Anywhere else.
    Custom,
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Custom => f.write_str("Custom"),
        }
    }
}

/// Closest catalogued location within `tolerance_degrees` on both axes.
pub fn nearest_named(
    geo: &GeoCoordinate,
    tolerance_degrees: f64,
) -> Option<&'static NamedLocation> {
    CATALOG
        .iter()
        .filter(|loc| {
            let dlat = (loc.coordinate.latitude - geo.latitude).abs();
            let dlon = longitude_difference(loc.coordinate.longitude, geo.longitude);
            dlat <= tolerance_degrees && dlon <= tolerance_degrees
        })
        .min_by(|a, b| {
            let da = a.coordinate.angular_distance_to(geo);
            let db = b.coordinate.angular_distance_to(geo);
            da.total_cmp(&db)
        })
}

/// Label for `geo` using [`MATCH_TOLERANCE_DEGREES`].
pub fn label_for(geo: &GeoCoordinate) -> LocationLabel {
    match nearest_named(geo, MATCH_TOLERANCE_DEGREES) {
        Some(loc) => LocationLabel::Named(loc.name.to_string()),
        None => LocationLabel::Custom,
    }
}

/// Case-insensitive catalogue lookup.
pub fn find_by_name(name: &str) -> Option<&'static NamedLocation> {
    let name = name.trim();
    CATALOG.iter().find(|loc| loc.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_named() {
        let tokyo = GeoCoordinate::new(35.6833, -139.7667);
        assert_eq!(label_for(&tokyo), LocationLabel::Named("Tokyo".to_string()));
    }

    #[test]
    fn test_within_tolerance_on_both_axes() {
        let near = GeoCoordinate::new(35.6833 + 1.9, -139.7667 - 1.9);
        assert_eq!(nearest_named(&near, 2.0).map(|l| l.name), Some("Tokyo"));
    }

    #[test]
    fn test_outside_tolerance_on_one_axis_is_custom() {
        let far_lat = GeoCoordinate::new(35.6833 + 2.5, -139.7667);
        assert_eq!(label_for(&far_lat), LocationLabel::Custom);
        let far_lon = GeoCoordinate::new(35.6833, -139.7667 + 2.5);
        assert_eq!(label_for(&far_lon), LocationLabel::Custom);
    }

    #[test]
    fn test_longitude_tolerance_wraps_full_turns() {
        // 193.3 is the same meridian as McMurdo's -166.7.
        let point = GeoCoordinate::new(-77.8419, 193.3137 + 1.0);
        assert_eq!(nearest_named(&point, 2.0).map(|l| l.name), Some("McMurdo Station"));
    }

    #[test]
    fn test_nearest_wins_when_several_qualify() {
        let point = GeoCoordinate::new(0.0, 0.0);
        assert_eq!(nearest_named(&point, 90.0).map(|l| l.name), Some("Nairobi"));
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        assert_eq!(find_by_name("  tokyo ").map(|l| l.name), Some("Tokyo"));
        assert!(find_by_name("Atlantis").is_none());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(LocationLabel::Named("Cairo".into()).to_string(), "Cairo");
        assert_eq!(LocationLabel::Custom.to_string(), "Custom");
    }
}
