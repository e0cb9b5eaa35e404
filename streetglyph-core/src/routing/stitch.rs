//! Greedy nearest-segment stitching

use fixedbitset::FixedBitSet;
use log::{debug, info, warn};

use crate::error::ConnectorError;
use crate::model::{GeoPoint, MatchedSegment, haversine_km};
use crate::sources::RoadConnector;

/// Connector request that failed while stitching; the path jumps directly
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorGap {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub error: ConnectorError,
}

#[derive(Debug, Clone, Default)]
pub struct StitchOutcome {
    pub path: Vec<GeoPoint>,
    pub gaps: Vec<ConnectorGap>,
    /// Number of segments whose geometry made it into the path
    pub segments_visited: usize,
}

/// Index of the unvisited segment whose start is nearest to `from`
fn nearest_unvisited(
    segments: &[MatchedSegment],
    visited: &FixedBitSet,
    from: &GeoPoint,
) -> Option<usize> {
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;

    for (index, segment) in segments.iter().enumerate() {
        if visited.contains(index) {
            continue;
        }

        let distance = haversine_km(from, &segment.start_point());
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(index);
        }
    }

    nearest
}

/// Orders `segments` into one traversal, bridging gaps with `connector`
///
/// The first segment seeds the path; afterwards the segment starting closest
/// to the current end is appended next. Each segment's geometry appears
/// exactly once. Failed connector requests are recorded and skipped, so the
/// path may jump between segments. An empty input gives an empty path.
pub async fn stitch_segments<C: RoadConnector>(
    segments: &[MatchedSegment],
    connector: &C,
) -> StitchOutcome {
    let Some(first) = segments.first() else {
        return StitchOutcome::default();
    };

    let mut outcome = StitchOutcome {
        path: first.geometry().to_vec(),
        gaps: Vec::new(),
        segments_visited: 1,
    };
    let mut visited = FixedBitSet::with_capacity(segments.len());
    visited.insert(0);

    while outcome.segments_visited < segments.len() {
        let Some(&last) = outcome.path.last() else {
            break;
        };
        let Some(next) = nearest_unvisited(segments, &visited, &last) else {
            warn!("No reachable segment left, stopping with a partial path");
            break;
        };

        let segment = &segments[next];
        let target = segment.start_point();

        match connector.connect(last, target).await {
            Ok(connection) => {
                debug!(
                    "Connected to way {} with {} points",
                    segment.id(),
                    connection.len()
                );
                outcome.path.extend(connection);
            }
            Err(error) => {
                warn!("Connector failed before way {} ({error}), leaving a gap", segment.id());
                outcome.gaps.push(ConnectorGap {
                    from: last,
                    to: target,
                    error,
                });
            }
        }

        outcome.path.extend_from_slice(segment.geometry());
        visited.insert(next);
        outcome.segments_visited += 1;
    }

    info!(
        "Stitched {} segments into {} points ({} gaps)",
        outcome.segments_visited,
        outcome.path.len(),
        outcome.gaps.len()
    );
    outcome
}
