use crate::models::{BoundingBox, Coordinates};

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in miles. NaN inputs yield NaN.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Distance in miles between two `(longitude, latitude)` pairs
#[inline]
pub fn distance_between(from: &Coordinates, to: &Coordinates) -> f64 {
    haversine_distance(from.latitude(), from.longitude(), to.latitude(), to.longitude())
}

/// Smallest box containing every point, or `None` for an empty input
pub fn calculate_bounds<'a, I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Coordinates>,
{
    points.into_iter().fold(None, |bounds, point| {
        let (lat, lon) = (point.latitude(), point.longitude());
        Some(match bounds {
            None => BoundingBox {
                min_lat: lat,
                max_lat: lat,
                min_lon: lon,
                max_lon: lon,
            },
            Some(b) => BoundingBox {
                min_lat: b.min_lat.min(lat),
                max_lat: b.max_lat.max(lat),
                min_lon: b.min_lon.min(lon),
                max_lon: b.max_lon.max(lon),
            },
        })
    })
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Charlotte to Raleigh is roughly 130 miles
        let distance = haversine_distance(35.2271, -80.8431, 35.7796, -78.6382);
        assert!((distance - 130.0).abs() < 5.0, "Distance should be ~130mi, got {}", distance);
    }

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(haversine_distance(35.2271, -80.8431, 35.2271, -80.8431), 0.0);
        assert_eq!(haversine_distance(-89.9, 179.9, -89.9, 179.9), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((35.2271, -80.8431), (35.7344, -81.3412)),
            ((0.0, 0.0), (0.0, 180.0)),
            ((-33.86, 151.21), (51.5074, -0.1278)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            assert_eq!(
                haversine_distance(lat1, lon1, lat2, lon2),
                haversine_distance(lat2, lon2, lat1, lon1)
            );
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_distance(f64::NAN, -80.0, 35.0, -80.0).is_nan());
    }

    #[test]
    fn test_bounds_cover_all_points() {
        let points = [
            Coordinates::new(-80.8431, 35.2271),
            Coordinates::new(-81.3412, 35.7344),
            Coordinates::new(-80.5495, 34.9854),
        ];
        let bbox = calculate_bounds(points.iter()).unwrap();

        assert_eq!(bbox.min_lat, 34.9854);
        assert_eq!(bbox.max_lat, 35.7344);
        assert_eq!(bbox.min_lon, -81.3412);
        assert_eq!(bbox.max_lon, -80.5495);
        for p in &points {
            assert!(is_within_bounding_box(p.latitude(), p.longitude(), &bbox));
        }
        assert!(!is_within_bounding_box(40.0, -80.8, &bbox));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(calculate_bounds(std::iter::empty()).is_none());
    }
}
