//! Douglas-Peucker polyline simplification
//!
//! The closest point on the chord is found by planar projection in raw
//! degree space, while the distance to it is measured with haversine in
//! kilometers and compared against a tolerance given in degrees.

use crate::model::{GeoPoint, haversine_km};

/// Distance from `point` to the chord `start`-`end`
///
/// Projection is planar in (lng, lat) and clamped to the chord; the returned
/// distance is the haversine distance in kilometers to the clamped point.
pub fn chord_distance(point: &GeoPoint, start: &GeoPoint, end: &GeoPoint) -> f64 {
    let dx = end.lng - start.lng;
    let dy = end.lat - start.lat;

    let mag_sq = dx * dx + dy * dy;
    if mag_sq == 0.0 {
        return haversine_km(point, start);
    }

    let u = ((point.lng - start.lng) * dx + (point.lat - start.lat) * dy) / mag_sq;

    let closest = if u < 0.0 {
        *start
    } else if u > 1.0 {
        *end
    } else {
        GeoPoint::new(start.lat + u * dy, start.lng + u * dx)
    };

    haversine_km(point, &closest)
}

/// Simplifies `points` with the given tolerance
///
/// Sequences of two points or fewer are returned unchanged. First and last
/// points are always kept.
pub fn douglas_peucker(points: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack of (first, last) ranges instead of recursion
    let mut ranges = vec![(0, points.len() - 1)];
    while let Some((first, last)) = ranges.pop() {
        if let Some(split) = split_index(points, first, last, tolerance) {
            keep[split] = true;
            ranges.push((split, last));
            ranges.push((first, split));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

/// Farthest interior point of `first..=last` if it lies beyond `tolerance`
fn split_index(points: &[GeoPoint], first: usize, last: usize, tolerance: f64) -> Option<usize> {
    if last <= first + 1 {
        return None;
    }

    let start = &points[first];
    let end = &points[last];

    let mut max_distance = 0.0;
    let mut max_index = first;
    for (index, point) in points.iter().enumerate().take(last).skip(first + 1) {
        let distance = chord_distance(point, start, end);
        if distance > max_distance {
            max_distance = distance;
            max_index = index;
        }
    }

    (max_distance > tolerance && max_index > first).then_some(max_index)
}
