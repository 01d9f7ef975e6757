use wildfind_types::cartesian::{Point2d, Rect, Size, Vector2};

/// Resolution of zoom level 0 of the standard web tile scheme (256px tiles), in meters per
/// pixel.
pub const TOP_RESOLUTION: f64 = 156543.03392804097;

/// Highest zoom level allowed by default.
pub const DEFAULT_MAX_ZOOM: f64 = 28.0;

/// Position, scale and screen size of the map.
///
/// Resolution is measured in map units (meters of the working projection) per screen pixel.
/// Screen coordinates start at the top-left corner with Y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Point2d,
    resolution: f64,
    size: Size,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Point2d::new(0.0, 0.0),
            resolution: 1.0,
            size: Size::new(0.0, 0.0),
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Resolution corresponding to a zoom level.
pub fn zoom_to_resolution(zoom: f64) -> f64 {
    TOP_RESOLUTION / 2f64.powf(zoom)
}

/// Zoom level corresponding to a resolution.
pub fn resolution_to_zoom(resolution: f64) -> f64 {
    (TOP_RESOLUTION / resolution).log2()
}

impl Viewport {
    /// Creates a new viewport centered at the given projected point.
    pub fn new(center: Point2d, resolution: f64) -> Self {
        Self {
            center,
            resolution,
            ..Default::default()
        }
    }

    /// Center of the view in the working projection.
    pub fn center(&self) -> Point2d {
        self.center
    }

    /// Map units per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Current zoom level. Fractional values are possible.
    pub fn zoom(&self) -> f64 {
        resolution_to_zoom(self.resolution)
    }

    /// Highest allowed zoom level.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Size of the screen area in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy with the center moved to the given point.
    pub fn with_center(&self, center: Point2d) -> Self {
        Self { center, ..*self }
    }

    /// Returns a copy with the given screen size.
    pub fn with_size(&self, size: Size) -> Self {
        Self { size, ..*self }
    }

    /// Returns a copy with the given resolution, constrained to the allowed zoom range.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution: self.constrain_resolution(resolution),
            ..*self
        }
    }

    /// Returns a copy at the given zoom level, constrained to the allowed range.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        self.with_resolution(zoom_to_resolution(zoom))
    }

    /// Returns a copy with a new highest zoom level. The current resolution is constrained to it.
    pub fn with_max_zoom(&self, max_zoom: f64) -> Self {
        let view = Self { max_zoom, ..*self };
        view.with_resolution(view.resolution)
    }

    fn constrain_resolution(&self, resolution: f64) -> f64 {
        let min_resolution = zoom_to_resolution(self.max_zoom);
        if resolution.is_nan() || resolution <= 0.0 {
            return min_resolution;
        }

        resolution.clamp(min_resolution, TOP_RESOLUTION)
    }

    /// Converts a screen pixel position into the working projection.
    pub fn screen_to_map(&self, px_position: Point2d) -> Point2d {
        Point2d::new(
            self.center.x + (px_position.x - self.size.half_width()) * self.resolution,
            self.center.y + (self.size.half_height() - px_position.y) * self.resolution,
        )
    }

    /// Converts a point of the working projection into a screen pixel position.
    pub fn map_to_screen(&self, point: Point2d) -> Point2d {
        Point2d::new(
            (point.x - self.center.x) / self.resolution + self.size.half_width(),
            self.size.half_height() - (point.y - self.center.y) / self.resolution,
        )
    }

    /// Area of the map visible on the screen.
    pub fn get_bbox(&self) -> Rect {
        Rect::from_corners(
            &self.screen_to_map(Point2d::new(0.0, 0.0)),
            &self.screen_to_map(Point2d::new(self.size.width(), self.size.height())),
        )
    }

    /// Returns a view showing the whole `extent`, centered on it.
    ///
    /// A zero-sized extent (a single point) is shown at the highest zoom level.
    pub fn fit(&self, extent: Rect) -> Self {
        let resolution = if self.size.is_zero() {
            self.resolution
        } else {
            (extent.width() / self.size.width()).max(extent.height() / self.size.height())
        };

        Self {
            center: extent.center(),
            resolution: self.constrain_resolution(resolution),
            ..*self
        }
    }

    /// Moves the map so that the point under `from` ends up under `to`.
    pub fn translate_by_pixels(&self, from: Point2d, to: Point2d) -> Self {
        let delta = self.screen_to_map(to) - self.screen_to_map(from);
        self.translate(delta)
    }

    /// Moves the map content by the given vector in map units.
    pub fn translate(&self, delta: Vector2<f64>) -> Self {
        Self {
            center: self.center - delta,
            ..*self
        }
    }

    /// Multiplies resolution by `factor`, keeping the point under `base_point` in place.
    pub fn zoom_around(&self, factor: f64, base_point: Point2d) -> Self {
        let anchor = self.screen_to_map(base_point);
        let resolution = self.constrain_resolution(self.resolution * factor);
        let k = resolution / self.resolution;
        let center = anchor + (self.center - anchor) * k;

        Self {
            center,
            resolution,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn screen_to_map_size() {
        let view = Viewport::default().with_size(Size::new(100.0, 100.0));

        assert_abs_diff_eq!(
            view.screen_to_map(Point2d::new(0.0, 0.0)),
            Point2d::new(-50.0, 50.0),
            epsilon = 0.0001,
        );
        assert_abs_diff_eq!(
            view.screen_to_map(Point2d::new(50.0, 50.0)),
            Point2d::new(0.0, 0.0),
            epsilon = 0.0001,
        );

        let view = Viewport::default().with_size(Size::new(200.0, 50.0));

        assert_abs_diff_eq!(
            view.screen_to_map(Point2d::new(25.0, 49.0)),
            Point2d::new(-75.0, -24.0),
            epsilon = 0.0001,
        );
    }

    #[test]
    fn screen_to_map_position_and_resolution() {
        let view = Viewport::new(Point2d::new(-100.0, -100.0), 2.0)
            .with_size(Size::new(100.0, 100.0));

        assert_abs_diff_eq!(
            view.screen_to_map(Point2d::new(0.0, 0.0)),
            Point2d::new(-200.0, 0.0),
            epsilon = 0.0001,
        );
        assert_abs_diff_eq!(
            view.screen_to_map(Point2d::new(100.0, 100.0)),
            Point2d::new(0.0, -200.0),
            epsilon = 0.0001,
        );
    }

    #[test]
    fn map_to_screen_inverts_screen_to_map() {
        let view = Viewport::new(Point2d::new(1000.0, -500.0), 3.5)
            .with_size(Size::new(640.0, 480.0));
        let px = Point2d::new(17.0, 401.0);

        assert_abs_diff_eq!(
            view.map_to_screen(view.screen_to_map(px)),
            px,
            epsilon = 0.0001
        );
    }

    #[test]
    fn zoom_resolution_conversion() {
        assert_abs_diff_eq!(zoom_to_resolution(0.0), TOP_RESOLUTION);
        assert_abs_diff_eq!(zoom_to_resolution(4.0), TOP_RESOLUTION / 16.0);
        assert_abs_diff_eq!(resolution_to_zoom(TOP_RESOLUTION / 8.0), 3.0, epsilon = 1e-9);

        let view = Viewport::default().with_zoom(12.0);
        assert_abs_diff_eq!(view.zoom(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn zoom_is_limited() {
        let view = Viewport::default().with_zoom(30.0);
        assert_abs_diff_eq!(view.zoom(), DEFAULT_MAX_ZOOM, epsilon = 1e-9);

        let view = view.with_max_zoom(21.0);
        assert_abs_diff_eq!(view.zoom(), 21.0, epsilon = 1e-9);

        let view = view.with_zoom(-3.0);
        assert_abs_diff_eq!(view.zoom(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn overflowing_zoom_out_stops_at_top_level() {
        let view = Viewport::default().with_zoom(-1100.0);
        assert_abs_diff_eq!(view.zoom(), 0.0, epsilon = 1e-9);

        let view = Viewport::default()
            .with_size(Size::new(100.0, 100.0))
            .with_zoom(10.0)
            .zoom_around(2f64.powf(1100.0), Point2d::new(20.0, 30.0));
        assert_abs_diff_eq!(view.zoom(), 0.0, epsilon = 1e-9);
        assert!(view.center().x.is_finite() && view.center().y.is_finite());
    }

    #[test]
    fn fit_extent() {
        let view = Viewport::default().with_size(Size::new(100.0, 50.0));
        let fitted = view.fit(Rect::new(0.0, 0.0, 1000.0, 1000.0));

        assert_abs_diff_eq!(fitted.center(), Point2d::new(500.0, 500.0));
        assert_abs_diff_eq!(fitted.resolution(), 20.0);
        let bbox = fitted.get_bbox();
        assert!(bbox.contains(&Point2d::new(0.0, 0.0)));
        assert!(bbox.contains(&Point2d::new(1000.0, 1000.0)));
    }

    #[test]
    fn fit_single_point_uses_max_zoom() {
        let view = Viewport::default().with_size(Size::new(100.0, 100.0));
        let fitted = view.fit(Rect::new(5.0, 5.0, 5.0, 5.0));

        assert_abs_diff_eq!(fitted.center(), Point2d::new(5.0, 5.0));
        assert_abs_diff_eq!(fitted.zoom(), DEFAULT_MAX_ZOOM, epsilon = 1e-9);
    }

    #[test]
    fn translate_by_pixels() {
        let view = Viewport::new(Point2d::new(0.0, 0.0), 2.0).with_size(Size::new(100.0, 100.0));
        let moved = view.translate_by_pixels(Point2d::new(50.0, 50.0), Point2d::new(60.0, 40.0));

        assert_abs_diff_eq!(moved.center(), Point2d::new(-20.0, -20.0), epsilon = 1e-9);
    }

    #[test]
    fn zoom_around_keeps_anchor() {
        let view = Viewport::new(Point2d::new(0.0, 0.0), 4.0).with_size(Size::new(100.0, 100.0));
        let anchor_px = Point2d::new(10.0, 20.0);
        let anchor = view.screen_to_map(anchor_px);
        let zoomed = view.zoom_around(0.5, anchor_px);

        assert_abs_diff_eq!(zoomed.resolution(), 2.0);
        assert_abs_diff_eq!(zoomed.screen_to_map(anchor_px), anchor, epsilon = 1e-9);
    }
}
