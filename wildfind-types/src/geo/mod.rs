//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and conversion
//! between geographic and projected coordinate systems (see [`Projection`]).

mod crs;
mod datum;
mod point;
mod projection;
mod web_mercator;

pub use crs::{Crs, ProjectionType};
pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::Projection;
pub use web_mercator::WebMercator;
