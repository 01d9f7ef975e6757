use std::fmt::{Display, Formatter};

use log::debug;
use wildfind_types::cartesian::Rect;
use wildfind_types::geo::{Crs, GeoPoint2d, NewGeoPoint};

use crate::decoded_image::DecodedImage;
use crate::error::MapError;

/// Default opacity of the heatmap overlay.
pub const DEFAULT_HEATMAP_OPACITY: f32 = 0.6;

/// Geographic bounding box of the heatmap image, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapBounds {
    /// Northern edge latitude.
    pub north: f64,
    /// Southern edge latitude.
    pub south: f64,
    /// Eastern edge longitude.
    pub east: f64,
    /// Western edge longitude.
    pub west: f64,
}

impl HeatmapBounds {
    /// Creates new bounds in the order the host passes them.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Checks that all edges are finite and not inverted.
    pub fn validate(&self) -> Result<(), MapError> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(MapError::InvalidArgument(format!(
                "heatmap bounds must be finite: {self:?}"
            )));
        }

        if self.north < self.south || self.east < self.west {
            return Err(MapError::InvalidArgument(format!(
                "heatmap bounds are inverted: {self:?}"
            )));
        }

        Ok(())
    }

    /// Extent of the bounds in the given projected CRS.
    pub fn project(&self, crs: &Crs) -> Result<Rect, MapError> {
        self.validate()?;
        let south_west = crs.project(&GeoPoint2d::lonlat(self.west, self.south))?;
        let north_east = crs.project(&GeoPoint2d::lonlat(self.east, self.north))?;

        Ok(Rect::from_corners(&south_west, &north_east))
    }
}

/// Cache-busting token identifying one heatmap image request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeatmapToken(pub(crate) u64);

impl HeatmapToken {
    pub(crate) fn random() -> Self {
        let value = getrandom::u64().unwrap_or_else(|err| {
            log::warn!("Random source unavailable ({err}), using time based token");
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        });

        Self(value % 1_000_000_000)
    }
}

impl Display for HeatmapToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loading state of a heatmap image.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatmapState {
    /// The image is being fetched.
    Loading,
    /// The image is loaded and can be drawn.
    Ready(DecodedImage),
    /// The image could not be loaded.
    Failed(String),
}

/// Heatmap image together with its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSource {
    token: HeatmapToken,
    url: String,
    bounds: HeatmapBounds,
    extent: Rect,
    state: HeatmapState,
}

impl HeatmapSource {
    /// Token of the request that created this source.
    pub fn token(&self) -> HeatmapToken {
        self.token
    }

    /// URL the image is loaded from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Geographic bounds of the image.
    pub fn bounds(&self) -> HeatmapBounds {
        self.bounds
    }

    /// Extent of the image in the working projection.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Loading state.
    pub fn state(&self) -> &HeatmapState {
        &self.state
    }
}

/// A pending heatmap image load returned to the caller of
/// [`MapView::set_heatmap`](crate::MapView::set_heatmap).
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRequest {
    /// Token to pass to [`MapView::resolve_heatmap`](crate::MapView::resolve_heatmap).
    pub token: HeatmapToken,
    /// URL of the image to load.
    pub url: String,
    /// Extent of the image in the working projection.
    pub extent: Rect,
}

/// Result of completing a heatmap load.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatmapOutcome {
    /// The image was loaded into the current source.
    Loaded,
    /// The image failed to load.
    Failed(String),
    /// The load belongs to a source that was replaced or cleared, nothing changed.
    Stale,
}

/// Raster overlay layer holding at most one heatmap image.
pub struct HeatmapLayer {
    source: Option<HeatmapSource>,
    opacity: f32,
    visible: bool,
}

impl Default for HeatmapLayer {
    fn default() -> Self {
        Self {
            source: None,
            opacity: DEFAULT_HEATMAP_OPACITY,
            visible: true,
        }
    }
}

impl HeatmapLayer {
    /// Creates an empty layer with the given opacity.
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Current source, if any.
    pub fn source(&self) -> Option<&HeatmapSource> {
        self.source.as_ref()
    }

    /// Opacity of the overlay in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the overlay is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Replaces the source with a new one in the loading state.
    pub(crate) fn start(
        &mut self,
        path: &str,
        bounds: HeatmapBounds,
        extent: Rect,
    ) -> HeatmapRequest {
        let token = HeatmapToken::random();
        let url = format!("{path}?a={token}");
        debug!("Heatmap source {url} for {bounds:?}");

        self.source = Some(HeatmapSource {
            token,
            url: url.clone(),
            bounds,
            extent,
            state: HeatmapState::Loading,
        });

        HeatmapRequest { token, url, extent }
    }

    /// Applies the result of an image load to the source with the matching token.
    pub(crate) fn resolve(
        &mut self,
        token: HeatmapToken,
        result: Result<DecodedImage, MapError>,
    ) -> HeatmapOutcome {
        let Some(source) = self.source.as_mut().filter(|s| s.token == token) else {
            debug!("Ignoring stale heatmap load {token}");
            return HeatmapOutcome::Stale;
        };

        match result {
            Ok(image) => {
                source.state = HeatmapState::Ready(image);
                HeatmapOutcome::Loaded
            }
            Err(err) => {
                let message = err.to_string();
                source.state = HeatmapState::Failed(message.clone());
                HeatmapOutcome::Failed(message)
            }
        }
    }

    /// Removes the source.
    pub(crate) fn clear(&mut self) {
        self.source = None;
    }
}
