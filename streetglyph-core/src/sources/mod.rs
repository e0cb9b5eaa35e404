//! External collaborators: the street-data source and the road connector
//!
//! Both are expressed as traits so the pipeline can run against the public
//! Overpass and OSRM services or against in-memory fixtures.

mod osrm;
mod overpass;
mod retry;

use std::future::Future;
use std::sync::Arc;

use crate::error::{ConnectorError, FetchError};
use crate::model::{GeoPoint, RawWay};

pub use osrm::OsrmConnector;
pub use overpass::{OverpassClient, build_query, parse_response};
pub use retry::fetch_with_retry;

/// Area of interest for a street-data query
#[derive(Debug, Clone, PartialEq)]
pub struct AreaQuery {
    pub center: GeoPoint,
    pub radius_m: f64,
    /// OSM `highway` values to include
    pub highway_kinds: Vec<String>,
}

/// Query-by-area service returning street way geometries
pub trait StreetDataSource {
    /// Fetches every matching way around the query center
    ///
    /// An empty vector is a successful query that found nothing.
    fn fetch_ways(
        &self,
        query: &AreaQuery,
    ) -> impl Future<Output = Result<Vec<RawWay>, FetchError>> + Send;
}

/// Point-to-point walking router used to fill gaps between segments
pub trait RoadConnector {
    /// Returns an ordered coordinate sequence from `from` to `to`
    fn connect(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> impl Future<Output = Result<Vec<GeoPoint>, ConnectorError>> + Send;
}

impl<T: StreetDataSource + Sync> StreetDataSource for &T {
    fn fetch_ways(
        &self,
        query: &AreaQuery,
    ) -> impl Future<Output = Result<Vec<RawWay>, FetchError>> + Send {
        (**self).fetch_ways(query)
    }
}

impl<T: StreetDataSource + Send + Sync> StreetDataSource for Arc<T> {
    fn fetch_ways(
        &self,
        query: &AreaQuery,
    ) -> impl Future<Output = Result<Vec<RawWay>, FetchError>> + Send {
        self.as_ref().fetch_ways(query)
    }
}

impl<T: RoadConnector + Sync> RoadConnector for &T {
    fn connect(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> impl Future<Output = Result<Vec<GeoPoint>, ConnectorError>> + Send {
        (**self).connect(from, to)
    }
}

impl<T: RoadConnector + Send + Sync> RoadConnector for Arc<T> {
    fn connect(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> impl Future<Output = Result<Vec<GeoPoint>, ConnectorError>> + Send {
        self.as_ref().connect(from, to)
    }
}
