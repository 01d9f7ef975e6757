use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A point on the surface of the Earth.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }
}

/// A geographic point type that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude in degrees.
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude in degrees. This is the order host
    /// applications pass coordinates in.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point on the surface of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Formats the point as `lon, lat` with the given number of decimal places.
    pub fn to_string_xy(&self, precision: usize) -> String {
        format!("{:.*}, {:.*}", precision, self.lon, precision, self.lat)
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use wildfind_types::geo::GeoPoint;
/// use wildfind_types::latlon;
///
/// let point = latlon!(51.0, -1.0);
/// assert_eq!(point.lat(), 51.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lonlat_order() {
        let point = GeoPoint2d::lonlat(-1.5, 51.25);
        assert_eq!(point.lon(), -1.5);
        assert_eq!(point.lat(), 51.25);
        assert_eq!(point, crate::latlon!(51.25, -1.5));
    }

    #[test]
    fn string_xy() {
        let point = GeoPoint2d::lonlat(-1.123456789, 51.0);
        assert_eq!(point.to_string_xy(5), "-1.12346, 51.00000");
    }
}
