//! Coercing a route's length into a target distance window
//!
//! Short routes get one out-and-back detour from their end point, long
//! routes are simplified with a growing tolerance. Neither step iterates
//! until the window is hit, so the result may still fall outside of it.

use log::{debug, info, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::KM_PER_DEGREE;
use crate::config::SimplificationSchedule;
use crate::error::ConnectorError;
use crate::model::{GeoPoint, path_length_km};
use crate::simplify::douglas_peucker;
use crate::sources::RoadConnector;

/// Upper bound on simplification passes, whatever the schedule says
const MAX_SIMPLIFY_PASSES: usize = 64;

/// Cardinal direction of an extension detour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    /// Point `distance_km` away from `origin` in this direction
    pub fn offset_from(self, origin: &GeoPoint, distance_km: f64) -> GeoPoint {
        let d_lat = distance_km / KM_PER_DEGREE;
        let d_lng = distance_km / (KM_PER_DEGREE * origin.lat.to_radians().cos());

        match self {
            Heading::North => origin.offset(d_lat, 0.0),
            Heading::South => origin.offset(-d_lat, 0.0),
            Heading::East => origin.offset(0.0, d_lng),
            Heading::West => origin.offset(0.0, -d_lng),
        }
    }
}

/// Source of detour headings
pub trait HeadingSource {
    fn next_heading(&mut self) -> Heading;
}

/// A fixed heading always answers itself
impl HeadingSource for Heading {
    fn next_heading(&mut self) -> Heading {
        *self
    }
}

/// Uniformly random headings drawn from `R`
#[derive(Debug, Clone)]
pub struct RandomHeading<R>(pub R);

impl RandomHeading<StdRng> {
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HeadingSource for RandomHeading<R> {
    fn next_heading(&mut self) -> Heading {
        Heading::ALL[self.0.random_range(0..Heading::ALL.len())]
    }
}

/// What happened to one leg of an extension detour
#[derive(Debug, Clone, PartialEq)]
pub enum LegStatus {
    /// Leg appended with this many points
    Appended(usize),
    Failed(ConnectorError),
    NotAttempted,
}

/// Which regulation step ran
#[derive(Debug, Clone, PartialEq)]
pub enum RegulationAction {
    /// Already inside the window
    WithinRange,
    /// Too short, but the shortfall was under the extension tolerance
    WithinTolerance { shortfall_km: f64 },
    /// Too short, an out-and-back detour was attempted
    Extended {
        heading: Heading,
        detour: GeoPoint,
        outbound: LegStatus,
        inbound: LegStatus,
    },
    /// Too long, simplified with the last tried tolerance
    Simplified { tolerance: f64, passes: usize },
    /// Nothing to regulate
    EmptyPath,
}

#[derive(Debug, Clone)]
pub struct Regulated {
    pub path: Vec<GeoPoint>,
    pub distance_km: f64,
    pub action: RegulationAction,
    /// Whether `distance_km` ended inside the requested window
    pub within_range: bool,
}

/// Simplifies `path` with growing tolerance until it fits under `max_km`
///
/// Every pass starts again from the original path. Returns the last
/// simplified path, the tolerance it used and the number of passes; when the
/// path already fits no pass runs and the path is returned as is.
pub fn shorten_path(
    path: &[GeoPoint],
    max_km: f64,
    schedule: &SimplificationSchedule,
) -> (Vec<GeoPoint>, f64, usize) {
    let tolerances = std::iter::successors(Some(schedule.initial_tolerance), |t| {
        Some(t * schedule.growth)
    })
    .take_while(|t| *t < schedule.max_tolerance)
    .take(MAX_SIMPLIFY_PASSES);

    let mut simplified = path.to_vec();
    let mut distance = path_length_km(path);
    let mut used_tolerance = 0.0;
    let mut passes = 0;

    for tolerance in tolerances {
        if distance <= max_km {
            break;
        }
        simplified = douglas_peucker(path, tolerance);
        distance = path_length_km(&simplified);
        used_tolerance = tolerance;
        passes += 1;
        debug!("Tolerance {tolerance:e}: {} points, {distance:.3} km", simplified.len());
    }

    (simplified, used_tolerance, passes)
}

/// Adjusts route length using a road connector for extensions
#[derive(Debug)]
pub struct DistanceRegulator<'a, C> {
    connector: &'a C,
    extension_tolerance_km: f64,
    schedule: SimplificationSchedule,
}

impl<'a, C: RoadConnector> DistanceRegulator<'a, C> {
    pub fn new(
        connector: &'a C,
        extension_tolerance_km: f64,
        schedule: SimplificationSchedule,
    ) -> Self {
        Self {
            connector,
            extension_tolerance_km,
            schedule,
        }
    }

    /// Regulates `path` into `[min_km, max_km]` on a best-effort basis
    pub async fn regulate<H: HeadingSource>(
        &self,
        path: Vec<GeoPoint>,
        min_km: f64,
        max_km: f64,
        headings: &mut H,
    ) -> Regulated {
        let distance = path_length_km(&path);
        info!("Route is {distance:.2} km, target window {min_km:.2}-{max_km:.2} km");

        let (path, action) = if path.is_empty() {
            (path, RegulationAction::EmptyPath)
        } else if distance < min_km {
            let target_km = (min_km + max_km) / 2.0;
            self.extend(path, target_km - distance, headings).await
        } else if distance > max_km {
            let (simplified, tolerance, passes) = shorten_path(&path, max_km, &self.schedule);
            (simplified, RegulationAction::Simplified { tolerance, passes })
        } else {
            (path, RegulationAction::WithinRange)
        };

        let distance_km = path_length_km(&path);
        let within_range = (min_km..=max_km).contains(&distance_km);
        if !within_range {
            warn!(
                "Route length {distance_km:.2} km is outside {min_km:.2}-{max_km:.2} km, returning best effort"
            );
        }

        Regulated {
            path,
            distance_km,
            action,
            within_range,
        }
    }

    /// Appends one out-and-back detour of about `needed_km` from the path end
    async fn extend<H: HeadingSource>(
        &self,
        mut path: Vec<GeoPoint>,
        needed_km: f64,
        headings: &mut H,
    ) -> (Vec<GeoPoint>, RegulationAction) {
        if needed_km <= self.extension_tolerance_km {
            return (
                path,
                RegulationAction::WithinTolerance {
                    shortfall_km: needed_km,
                },
            );
        }
        let Some(&last) = path.last() else {
            return (path, RegulationAction::EmptyPath);
        };

        let heading = headings.next_heading();
        let detour = heading.offset_from(&last, needed_km / 2.0);
        info!("Extending route by {needed_km:.2} km with a detour heading {heading:?}");

        let outbound = match self.connector.connect(last, detour).await {
            Ok(leg) => {
                let points = leg.len();
                path.extend(leg);
                LegStatus::Appended(points)
            }
            Err(error) => {
                warn!("Outbound detour leg failed ({error}), route stays short");
                LegStatus::Failed(error)
            }
        };

        let inbound = if matches!(outbound, LegStatus::Appended(_)) {
            match self.connector.connect(detour, last).await {
                Ok(leg) => {
                    let points = leg.len();
                    path.extend(leg);
                    LegStatus::Appended(points)
                }
                Err(error) => {
                    warn!("Return detour leg failed ({error}), keeping the outbound leg only");
                    LegStatus::Failed(error)
                }
            }
        } else {
            LegStatus::NotAttempted
        };

        (
            path,
            RegulationAction::Extended {
                heading,
                detour,
                outbound,
                inbound,
            },
        )
    }
}
