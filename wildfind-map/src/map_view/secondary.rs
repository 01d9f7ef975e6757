use log::debug;
use wildfind_types::geo::{Crs, GeoPoint2d};

use crate::view::Viewport;

/// State of the secondary (Google Maps) tile provider drawn below the map.
///
/// The secondary provider cannot be driven directly: it mirrors the center and zoom of the main
/// view, and its zoom is limited to a lower maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryView {
    visible: bool,
    map_type: Option<String>,
    center: GeoPoint2d,
    zoom: f64,
}

impl SecondaryView {
    pub(crate) fn new(viewport: &Viewport, crs: &Crs) -> Self {
        let mut view = Self {
            visible: false,
            map_type: None,
            center: GeoPoint2d::default(),
            zoom: 0.0,
        };
        view.sync(viewport, crs);
        view
    }

    /// Whether the secondary provider is shown instead of a regular basemap.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Map type id of the provider, e.g. `hybrid`.
    pub fn map_type(&self) -> Option<&str> {
        self.map_type.as_deref()
    }

    /// Center of the provider map.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Zoom level of the provider map. Always an integer.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub(crate) fn show(&mut self, map_type: &str) {
        self.visible = true;
        self.map_type = Some(map_type.to_string());
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    pub(crate) fn sync(&mut self, viewport: &Viewport, crs: &Crs) {
        match crs.unproject(&viewport.center()) {
            Ok(center) => self.center = center,
            Err(err) => debug!("Secondary view center not updated: {err}"),
        }
        self.zoom = viewport.zoom().round();
    }
}
