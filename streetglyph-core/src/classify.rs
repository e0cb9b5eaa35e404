//! Classification of raw street ways into directional segments

use log::debug;

use crate::model::{Direction, GeoPoint, RawWay, StreetSegment, haversine_km, path_length_km};

/// Ratio below which the minor axis delta is considered negligible
const AXIS_RATIO: f64 = 0.3;

/// Classifies the dominant direction of a geometry from its endpoints
///
/// Near-square deltas, including exact ties at the ratio boundary, are
/// `Diagonal`.
pub fn classify_direction(start: &GeoPoint, end: &GeoPoint) -> Direction {
    let d_lat = (end.lat - start.lat).abs();
    let d_lng = (end.lng - start.lng).abs();

    if d_lat < AXIS_RATIO * d_lng {
        Direction::Horizontal
    } else if d_lng < AXIS_RATIO * d_lat {
        Direction::Vertical
    } else {
        Direction::Diagonal
    }
}

impl StreetSegment {
    /// Classifies a single way relative to `center`
    ///
    /// Returns `None` for ways with fewer than two points.
    pub fn from_way(way: &RawWay, center: &GeoPoint) -> Option<Self> {
        let geometry = &way.geometry;
        if geometry.len() < 2 {
            return None;
        }

        let start = geometry[0];
        let end = geometry[geometry.len() - 1];
        let center_point = geometry[geometry.len() / 2];

        Some(Self {
            id: way.id,
            geometry: geometry.clone(),
            direction: classify_direction(&start, &end),
            length_km: path_length_km(geometry),
            center_point,
            distance_from_center_km: haversine_km(center, &center_point),
        })
    }
}

/// Converts raw ways into segments sorted by proximity to `center`
///
/// Only ways without a usable geometry are dropped; short or oddly oriented
/// segments are kept for the matcher to judge.
pub fn classify_segments(ways: &[RawWay], center: &GeoPoint) -> Vec<StreetSegment> {
    let mut segments: Vec<StreetSegment> = ways
        .iter()
        .filter_map(|way| {
            let segment = StreetSegment::from_way(way, center);
            if segment.is_none() {
                debug!("Way {} has fewer than two points, skipping", way.id);
            }
            segment
        })
        .collect();

    // Stable sort keeps input order among equally distant segments
    segments.sort_by(|a, b| a.distance_from_center_km.total_cmp(&b.distance_from_center_km));
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng)
    }

    #[test]
    fn direction_straddles_horizontal_boundary() {
        let start = point(0.0, 0.0);
        // d_lat just under 0.3 * d_lng
        assert_eq!(
            classify_direction(&start, &point(0.2999, 1.0)),
            Direction::Horizontal
        );
        // exactly on the boundary falls through to diagonal
        assert_eq!(
            classify_direction(&start, &point(0.3, 1.0)),
            Direction::Diagonal
        );
        assert_eq!(
            classify_direction(&start, &point(0.3001, 1.0)),
            Direction::Diagonal
        );
    }

    #[test]
    fn direction_straddles_vertical_boundary() {
        let start = point(0.0, 0.0);
        assert_eq!(
            classify_direction(&start, &point(1.0, 0.2999)),
            Direction::Vertical
        );
        assert_eq!(
            classify_direction(&start, &point(1.0, 0.3)),
            Direction::Diagonal
        );
    }

    #[test]
    fn direction_ignores_sign_and_degenerate_deltas() {
        assert_eq!(
            classify_direction(&point(1.0, 1.0), &point(1.0, 0.0)),
            Direction::Horizontal
        );
        assert_eq!(
            classify_direction(&point(1.0, 1.0), &point(0.0, 1.0)),
            Direction::Vertical
        );
        assert_eq!(
            classify_direction(&point(1.0, 1.0), &point(0.0, 0.0)),
            Direction::Diagonal
        );
        // zero length resolves to diagonal
        assert_eq!(
            classify_direction(&point(1.0, 1.0), &point(1.0, 1.0)),
            Direction::Diagonal
        );
    }

    #[test]
    fn center_point_is_middle_index_element() {
        let way = RawWay::new(
            7,
            vec![point(0.0, 0.0), point(0.0, 1.0), point(0.0, 2.0), point(0.0, 3.0)],
        );
        let segment = StreetSegment::from_way(&way, &point(0.0, 0.0)).unwrap();

        // even length picks the element just past the midpoint
        assert_eq!(segment.center_point(), point(0.0, 2.0));
        assert_eq!(segment.start_point(), point(0.0, 0.0));
        assert_eq!(segment.end_point(), point(0.0, 3.0));
        assert_eq!(segment.direction(), Direction::Horizontal);
        assert!((segment.length_km() - path_length_km(&way.geometry)).abs() < 1e-12);
    }

    #[test]
    fn segments_are_sorted_by_distance_from_center() {
        let center = point(0.0, 0.0);
        let ways = vec![
            RawWay::new(1, vec![point(0.02, 0.0), point(0.02, 0.01)]),
            RawWay::new(2, vec![point(0.001, 0.0), point(0.001, 0.01)]),
            RawWay::new(3, vec![point(0.01, 0.0)]),
            RawWay::new(4, vec![point(0.01, 0.0), point(0.01, 0.01)]),
        ];

        let segments = classify_segments(&ways, &center);
        let ids: Vec<_> = segments.iter().map(StreetSegment::id).collect();

        assert_eq!(ids, vec![2, 4, 1]);
        assert!(
            segments
                .windows(2)
                .all(|w| w[0].distance_from_center_km() <= w[1].distance_from_center_km())
        );
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let center = point(0.0, 0.0);
        let ways = vec![
            RawWay::new(10, vec![point(0.01, -0.01), point(0.01, 0.0), point(0.01, 0.01)]),
            RawWay::new(11, vec![point(-0.01, -0.01), point(-0.01, 0.0), point(-0.01, 0.01)]),
        ];

        let ids: Vec<_> = classify_segments(&ways, &center)
            .iter()
            .map(StreetSegment::id)
            .collect();
        assert_eq!(ids, vec![10, 11]);
    }
}
