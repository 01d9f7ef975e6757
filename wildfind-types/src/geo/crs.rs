use super::datum::Datum;
use super::point::{GeoPoint, GeoPoint2d, NewGeoPoint};
use super::projection::Projection;
use super::web_mercator::WebMercator;
use crate::cartesian::Point2d;
use crate::error::WildfindTypesError;

/// Coordinate reference system descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    datum: Datum,
    projection_type: ProjectionType,
}

/// Method used to project geographic coordinates into a CRS.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProjectionType {
    /// Geographic coordinates, no projection.
    None,
    /// Spherical mercator.
    WebMercator,
}

impl Crs {
    /// Geographic coordinates on the WGS84 datum (EPSG:4326).
    pub const WGS84: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// Spherical mercator on the WGS84 datum (EPSG:3857).
    pub const EPSG3857: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// Legacy code of [`Crs::EPSG3857`], still used by some mapping libraries.
    pub const EPSG900913: Crs = Crs::EPSG3857;

    /// Datum of the CRS.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Projection method of the CRS.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// Returns the projection from geographic coordinates into this CRS, if the CRS is projected.
    pub fn get_projection(
        &self,
    ) -> Option<Box<dyn Projection<InPoint = GeoPoint2d, OutPoint = Point2d>>> {
        match self.projection_type {
            ProjectionType::WebMercator => Some(Box::new(WebMercator::new(self.datum))),
            ProjectionType::None => None,
        }
    }

    /// Projects a geographic point into this CRS.
    pub fn project(&self, point: &GeoPoint2d) -> Result<Point2d, WildfindTypesError> {
        let error = || WildfindTypesError::Projection {
            x: point.lon(),
            y: point.lat(),
            target: self.name().to_string(),
        };

        match self.get_projection() {
            Some(projection) => projection.project(point).ok_or_else(error),
            None if point.lon().is_finite() && point.lat().is_finite() => {
                Ok(Point2d::new(point.lon(), point.lat()))
            }
            None => Err(error()),
        }
    }

    /// Converts a point in this CRS back into geographic coordinates.
    pub fn unproject(&self, point: &Point2d) -> Result<GeoPoint2d, WildfindTypesError> {
        let error = || WildfindTypesError::Projection {
            x: point.x,
            y: point.y,
            target: Crs::WGS84.name().to_string(),
        };

        match self.get_projection() {
            Some(projection) => projection.unproject(point).ok_or_else(error),
            None => Ok(GeoPoint2d::lonlat(point.x, point.y)),
        }
    }

    /// Conventional EPSG code of the CRS.
    pub fn name(&self) -> &'static str {
        match self.projection_type {
            ProjectionType::None => "EPSG:4326",
            ProjectionType::WebMercator => "EPSG:3857",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn legacy_code_is_web_mercator() {
        assert_eq!(Crs::EPSG900913, Crs::EPSG3857);
        assert_eq!(Crs::EPSG900913.name(), "EPSG:3857");
    }

    #[test]
    fn project_roundtrip() {
        let point = GeoPoint2d::lonlat(-1.1, 51.1);
        let projected = Crs::EPSG3857.project(&point).expect("projection failed");
        let back = Crs::EPSG3857.unproject(&projected).expect("unprojection failed");
        assert_abs_diff_eq!(back.lon(), -1.1, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat(), 51.1, epsilon = 1e-9);
    }

    #[test]
    fn project_error_names_target() {
        let result = Crs::EPSG3857.project(&GeoPoint2d::lonlat(f64::INFINITY, 0.0));
        assert!(matches!(
            result,
            Err(WildfindTypesError::Projection { ref target, .. }) if target == "EPSG:3857"
        ));
    }
}
