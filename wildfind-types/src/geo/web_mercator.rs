use std::marker::PhantomData;

use super::datum::Datum;
use super::point::NewGeoPoint;
use super::projection::Projection;
use crate::cartesian::NewCartesianPoint2d;

/// Latitude beyond which the spherical mercator is not defined.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical (pseudo) mercator projection, a.k.a. EPSG:3857 or EPSG:900913.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a new projection on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for WebMercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let lat = input.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor() * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Self::OutPoint::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let lat = 2.0 * (input.y() / self.datum.semimajor()).exp().atan()
            - std::f64::consts::FRAC_PI_2;
        let lon = input.x() / self.datum.semimajor();

        if lat.is_finite() && lon.is_finite() {
            Some(Self::InPoint::latlon(lat.to_degrees(), lon.to_degrees()))
        } else {
            None
        }
    }
}
