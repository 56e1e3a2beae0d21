//! Geographic coordinate type.
//!
//! `GeoPoint` stores double-precision longitude/latitude.  Distances are
//! plain Euclidean in coordinate space — the graph's edge weights and the
//! nearest-node scan bound are both defined against this metric, so no
//! great-circle correction is applied anywhere.

/// A geographic coordinate: longitude (x) before latitude (y).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Euclidean distance in coordinate space: `sqrt(Δlon² + Δlat²)`.
    ///
    /// Note the lower bound `|Δlat| <= distance_to(..)` — the latitude-sorted
    /// nearest-node search relies on it to stop scanning early.
    #[inline]
    pub fn distance_to(self, other: GeoPoint) -> f64 {
        let d_lon = self.lon - other.lon;
        let d_lat = self.lat - other.lat;
        (d_lon * d_lon + d_lat * d_lat).sqrt()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
