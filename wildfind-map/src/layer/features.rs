use serde::Serialize;
use wildfind_types::cartesian::{Point2d, Rect};
use wildfind_types::geo::GeoPoint2d;

use super::symbol::{LineSymbol, PointSymbol};

/// Unique identifier of a location within a map view session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LocationId(pub(crate) u64);

impl LocationId {
    /// Numeric value of the id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A detected signal observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPoint {
    id: LocationId,
    frequency: u64,
    rate: f64,
    level: f64,
    position: GeoPoint2d,
    projected: Point2d,
    selected: bool,
    symbol: PointSymbol,
}

impl LocationPoint {
    pub(crate) fn new(
        id: LocationId,
        frequency: u64,
        rate: f64,
        level: f64,
        position: GeoPoint2d,
        projected: Point2d,
    ) -> Self {
        Self {
            id,
            frequency,
            rate,
            level,
            position,
            projected,
            selected: false,
            symbol: PointSymbol::LOCATION,
        }
    }

    /// Session-unique id of the location.
    pub fn id(&self) -> LocationId {
        self.id
    }

    /// Signal frequency in Hz. Used by the host as the selection key.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Pulse rate in pulses per minute.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Signal level in dB.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Position in geographic coordinates.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Position in the working projection of the map.
    pub fn projected(&self) -> Point2d {
        self.projected
    }

    /// Whether the location is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Current drawing style.
    pub fn symbol(&self) -> &PointSymbol {
        &self.symbol
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.symbol = PointSymbol::location(selected);
    }
}

/// The travelled track: a single polyline in the working projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    coordinates: Vec<Point2d>,
}

impl Track {
    /// Appends a vertex to the end of the line.
    pub(crate) fn append(&mut self, point: Point2d) {
        self.coordinates.push(point);
    }

    pub(crate) fn clear(&mut self) {
        self.coordinates.clear();
    }

    /// Vertices of the line in order of arrival.
    pub fn coordinates(&self) -> &[Point2d] {
        &self.coordinates
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns true if the line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Bounding rectangle of the line.
    pub fn extent(&self) -> Option<Rect> {
        Rect::from_points(self.coordinates.iter())
    }

    /// Drawing style of the line.
    pub fn symbol(&self) -> &LineSymbol {
        &LineSymbol::TRACK
    }
}

/// Last known position of the tracking receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerMarker {
    position: GeoPoint2d,
    projected: Point2d,
}

impl TrackerMarker {
    pub(crate) fn new(position: GeoPoint2d, projected: Point2d) -> Self {
        Self {
            position,
            projected,
        }
    }

    /// Position in geographic coordinates.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Position in the working projection of the map.
    pub fn projected(&self) -> Point2d {
        self.projected
    }

    /// Drawing style of the marker.
    pub fn symbol(&self) -> &PointSymbol {
        &PointSymbol::TRACKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_changes_symbol() {
        let mut point = LocationPoint::new(
            LocationId(1),
            150_000_000,
            60.0,
            -40.0,
            GeoPoint2d::default(),
            Point2d::new(0.0, 0.0),
        );
        assert_eq!(point.symbol().z_index, 0);

        point.set_selected(true);
        assert!(point.is_selected());
        assert_eq!(point.symbol(), &PointSymbol::LOCATION_SELECTED);

        point.set_selected(false);
        assert_eq!(point.symbol(), &PointSymbol::LOCATION);
    }

    #[test]
    fn track_extent() {
        let mut track = Track::default();
        assert_eq!(track.extent(), None);
        track.append(Point2d::new(1.0, 2.0));
        track.append(Point2d::new(-1.0, 5.0));
        assert_eq!(track.extent(), Some(Rect::new(-1.0, 2.0, 1.0, 5.0)));
        assert_eq!(track.len(), 2);
        assert_eq!(track.symbol(), &LineSymbol::TRACK);
    }
}
