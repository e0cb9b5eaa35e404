use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for text route synthesis
///
/// Every field has a default, so a partial TOML or JSON document is enough
/// to override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Horizontal distance between character cells in meters
    pub char_spacing_m: f64,
    /// Lower bound of the street query radius in meters
    pub min_search_radius_m: f64,
    /// Query radius in meters per kilometer of target distance
    pub search_radius_per_km: f64,
    /// OSM `highway` values considered walkable
    pub highway_kinds: Vec<String>,
    /// Shortfall in kilometers below which no extension is attempted
    pub extension_tolerance_km: f64,
    pub simplification: SimplificationSchedule,
    pub retry: RetryPolicy,
    pub overpass: OverpassConfig,
    pub osrm: OsrmConfig,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            char_spacing_m: 200.0,
            min_search_radius_m: 500.0,
            search_radius_per_km: 250.0,
            highway_kinds: [
                "residential",
                "tertiary",
                "secondary",
                "primary",
                "footway",
                "path",
                "pedestrian",
                "living_street",
                "unclassified",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            extension_tolerance_km: 0.1,
            simplification: SimplificationSchedule::default(),
            retry: RetryPolicy::default(),
            overpass: OverpassConfig::default(),
            osrm: OsrmConfig::default(),
        }
    }
}

impl SynthesisConfig {
    /// Street query radius in meters for a target distance window in km
    pub fn search_radius_m(&self, min_distance_km: f64, max_distance_km: f64) -> f64 {
        let average = (min_distance_km + max_distance_km) / 2.0;
        (average * self.search_radius_per_km).max(self.min_search_radius_m)
    }
}

/// Tolerance schedule used when a path has to be shortened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplificationSchedule {
    pub initial_tolerance: f64,
    pub growth: f64,
    pub max_tolerance: f64,
}

impl Default for SimplificationSchedule {
    fn default() -> Self {
        Self {
            initial_tolerance: 1e-5,
            growth: 1.5,
            max_tolerance: 1e-3,
        }
    }
}

/// Bounded retry for street-data queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverpassConfig {
    pub url: String,
    /// Server-side query timeout passed in the query header
    pub query_timeout_secs: u32,
    /// Client-side HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: "https://overpass-api.de/api/interpreter".to_string(),
            query_timeout_secs: 25,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub url: String,
    pub profile: String,
    pub request_timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            url: "https://router.project-osrm.org".to_string(),
            profile: "foot".to_string(),
            request_timeout_secs: 15,
        }
    }
}
