use log::{debug, info, warn};
use wildfind_types::cartesian::{CartesianPoint2d, Point2d, Rect, Size};
use wildfind_types::geo::{Crs, GeoPoint, GeoPoint2d, NewGeoPoint};

use crate::bridge::BridgeLink;
use crate::config::MapConfig;
use crate::control::{EventProcessor, MouseButton, RawUserEvent, SelectionBox, UserEvent};
use crate::decoded_image::DecodedImage;
use crate::error::MapError;
use crate::layer::{
    secondary_basemaps, FeatureStore, HeatmapBounds, HeatmapLayer, HeatmapOutcome,
    HeatmapRequest, HeatmapToken, LayerCollection, LocationId, LocationPoint, TileProvider,
    Track, TrackerMarker,
};
use crate::loader::ImageLoader;
use crate::messenger::Messenger;
use crate::popup::SignalPopup;
use crate::scale::{scale_line, ScaleLine, ScaleUnits};
use crate::view::Viewport;

mod builder;
mod secondary;

pub use builder::MapViewBuilder;
pub use secondary::SecondaryView;

/// Resolution change for one scroll line.
const SCROLL_ZOOM_FACTOR: f64 = 2.0;

/// Locations picked by a drag-box selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    /// Ids of the selected locations, in insertion order.
    pub ids: Vec<LocationId>,
    /// Frequencies of the selected locations, as reported to the host.
    pub frequencies: Vec<u64>,
}

/// The map view of the tracking application.
///
/// Owns the basemap layers, the signal locations with their track, the tracker marker and the
/// heatmap overlay, and keeps the viewport. The host drives the view through method calls;
/// notifications go back through the [`HostBridge`](crate::HostBridge) given to the
/// [`MapViewBuilder`]. Every change of the visual state is followed by
/// [`Messenger::request_redraw`].
pub struct MapView {
    config: MapConfig,
    crs: Crs,
    viewport: Viewport,
    layers: LayerCollection,
    locations: FeatureStore<LocationPoint>,
    track: Track,
    harrier: Option<TrackerMarker>,
    heatmap: HeatmapLayer,
    locations_visible: bool,
    track_visible: bool,
    secondary: Option<SecondaryView>,
    units: ScaleUnits,
    bridge: BridgeLink,
    messenger: Option<Box<dyn Messenger>>,
    event_processor: EventProcessor,
    drag_box: Option<SelectionBox>,
    popup: Option<SignalPopup>,
    listeners_enabled: bool,
    initialized: bool,
    next_location_id: u64,
}

impl MapView {
    /// Creates a headless map view with the given configuration.
    pub fn new(config: MapConfig) -> Result<Self, MapError> {
        Self::from_parts(config, BridgeLink::default(), None)
    }

    pub(crate) fn from_parts(
        config: MapConfig,
        bridge: BridgeLink,
        messenger: Option<Box<dyn Messenger>>,
    ) -> Result<Self, MapError> {
        config.validate()?;

        let crs = Crs::EPSG900913;
        let center = crs.project(&GeoPoint2d::lonlat(config.center[0], config.center[1]))?;
        let viewport = Viewport::default()
            .with_max_zoom(config.max_zoom)
            .with_size(Size::new(config.size[0], config.size[1]))
            .with_zoom(config.zoom)
            .with_center(center);

        if bridge.is_headless() {
            debug!("Map view created without a host bridge");
        }

        Ok(Self {
            crs,
            viewport,
            layers: LayerCollection::default(),
            locations: FeatureStore::default(),
            track: Track::default(),
            harrier: None,
            heatmap: HeatmapLayer::new(config.heatmap.opacity),
            locations_visible: true,
            track_visible: true,
            secondary: None,
            units: config.units,
            bridge,
            messenger,
            event_processor: EventProcessor::default(),
            drag_box: None,
            popup: None,
            listeners_enabled: false,
            initialized: false,
            next_location_id: 0,
            config,
        })
    }

    /// Installs the basemap layers, shows the default one, enables interaction notifications and
    /// reports the layer names to the host.
    ///
    /// Must be called once before the other operations. A second call fails with
    /// [`MapError::AlreadyInitialized`].
    pub fn initialize(&mut self) -> Result<(), MapError> {
        if self.initialized {
            return Err(MapError::AlreadyInitialized);
        }

        let mut basemaps = self.config.basemaps.clone();
        if self.secondary.is_some() {
            basemaps.extend(secondary_basemaps());
        }
        self.layers = LayerCollection::from(basemaps);

        let index = self
            .layers
            .position_by_name(&self.config.default_layer)
            .unwrap_or_else(|| {
                warn!(
                    "Default layer '{}' not found, showing the first layer",
                    self.config.default_layer
                );
                0
            });
        self.set_layer(index)?;

        self.listeners_enabled = true;
        self.initialized = true;
        self.send_layer_names();
        info!("Map view initialized with {} layers", self.layers.len());

        Ok(())
    }

    /// Whether [`MapView::initialize`] has been called.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configuration the view was created with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Working projection of the map.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Basemap layers.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Shows the basemap with the given index and hides all others.
    ///
    /// Google layers are drawn by the secondary provider, which is shown with the layer's map type.
    /// For any other layer the secondary provider is hidden.
    pub fn set_layer(&mut self, index: usize) -> Result<(), MapError> {
        let layer = self.layers.show_only(index)?;

        match (layer.provider(), &mut self.secondary) {
            (TileProvider::Google { map_type }, Some(secondary)) => secondary.show(map_type),
            (TileProvider::Google { .. }, None) => {
                warn!("Layer '{}' needs the secondary provider, which is not loaded", layer.name());
            }
            (_, Some(secondary)) => secondary.hide(),
            (_, None) => {}
        }

        info!("Basemap set to '{}'", layer.name());
        self.request_redraw();

        Ok(())
    }

    /// Index of the visible basemap, or `0` if none is visible.
    pub fn get_layer(&self) -> usize {
        self.layers.visible_index().unwrap_or(0)
    }

    /// Url the renderer loads the tiles (or, for Bing, the imagery metadata) of a basemap from.
    ///
    /// `None` for layers drawn by the secondary provider, and for Bing layers without a key in
    /// the configuration.
    pub fn tile_source(&self, index: usize) -> Option<String> {
        let provider = self.layers.get(index)?.provider();
        match provider {
            TileProvider::Bing { .. } => provider.metadata_url(self.config.bing_key.as_deref()?),
            _ => provider.url_template(),
        }
    }

    /// Adds a signal location and extends the track with it.
    pub fn add_location(
        &mut self,
        frequency: u64,
        rate: f64,
        level: f64,
        lon: f64,
        lat: f64,
    ) -> Result<LocationId, MapError> {
        let position = GeoPoint2d::lonlat(lon, lat);
        let projected = self.crs.project(&position)?;

        let id = LocationId(self.next_location_id);
        self.next_location_id += 1;

        self.locations.insert(LocationPoint::new(
            id, frequency, rate, level, position, projected,
        ));
        self.track.append(projected);
        debug!("Location {} added at {}", id.value(), position.to_string_xy(5));
        self.request_redraw();

        Ok(id)
    }

    /// Signal locations.
    pub fn locations(&self) -> &FeatureStore<LocationPoint> {
        &self.locations
    }

    /// Travelled track.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Removes all locations and the track.
    pub fn clear_locations(&mut self) {
        self.locations.clear();
        self.track.clear();
        self.popup = None;
        debug!("Locations cleared");
        self.request_redraw();
    }

    /// Completes a drag-box selection: locations inside the box become selected, all others are
    /// deselected. The selected frequencies are sent to the host.
    pub fn select_locations(&mut self, selection: &SelectionBox) -> SelectionResult {
        let extent = selection.extent(&self.viewport);
        self.select_in_extent(extent)
    }

    /// Selects the locations inside an extent of the working projection and deselects all others.
    pub fn select_in_extent(&mut self, extent: Rect) -> SelectionResult {
        let mut result = SelectionResult::default();
        for location in self.locations.iter_mut() {
            let inside = extent.contains(&location.as_ref().projected());
            let location = location.edit_style();
            location.set_selected(inside);
            if inside {
                result.ids.push(location.id());
                result.frequencies.push(location.frequency());
            }
        }

        info!("{} locations selected", result.ids.len());
        self.bridge.selected(&result.frequencies);
        self.request_redraw();

        result
    }

    /// Sets the selection state of every location with the given frequency. Returns the number of
    /// matching locations.
    pub fn select_location(&mut self, frequency: u64, selected: bool) -> usize {
        let mut count = 0;
        for location in self.locations.iter_mut() {
            if location.as_ref().frequency() == frequency {
                location.edit_style().set_selected(selected);
                count += 1;
            }
        }

        if count > 0 {
            self.request_redraw();
        } else {
            debug!("No location with frequency {frequency}");
        }

        count
    }

    /// Same as [`MapView::select_location`], but fails with [`MapError::NotFound`] if no location
    /// has the frequency.
    pub fn select_location_strict(
        &mut self,
        frequency: u64,
        selected: bool,
    ) -> Result<usize, MapError> {
        match self.select_location(frequency, selected) {
            0 => Err(MapError::NotFound),
            count => Ok(count),
        }
    }

    /// Shows or hides the location markers.
    pub fn show_locations(&mut self, show: bool) {
        self.locations_visible = show;
        self.request_redraw();
    }

    /// Whether the location markers are shown.
    pub fn locations_visible(&self) -> bool {
        self.locations_visible
    }

    /// Shows or hides the track.
    pub fn show_track(&mut self, show: bool) {
        self.track_visible = show;
        self.request_redraw();
    }

    /// Whether the track is shown.
    pub fn track_visible(&self) -> bool {
        self.track_visible
    }

    /// Shows or hides the heatmap overlay.
    pub fn show_heatmap(&mut self, show: bool) {
        self.heatmap.set_visible(show);
        self.request_redraw();
    }

    /// Moves the tracker marker to the given position.
    pub fn set_harrier(&mut self, lon: f64, lat: f64) -> Result<(), MapError> {
        let position = GeoPoint2d::lonlat(lon, lat);
        let projected = self.crs.project(&position)?;
        self.harrier = Some(TrackerMarker::new(position, projected));
        self.request_redraw();

        Ok(())
    }

    /// Removes the tracker marker.
    pub fn clear_harrier(&mut self) {
        self.harrier = None;
        self.request_redraw();
    }

    /// Tracker marker, if set.
    pub fn harrier(&self) -> Option<&TrackerMarker> {
        self.harrier.as_ref()
    }

    /// Heatmap overlay.
    pub fn heatmap(&self) -> &HeatmapLayer {
        &self.heatmap
    }

    /// Replaces the heatmap overlay with a new image covering the given geographic bounds.
    ///
    /// The new source is in loading state. The returned request carries the url to load; the
    /// result must be given back with [`MapView::resolve_heatmap`]. Any earlier request becomes
    /// stale.
    pub fn set_heatmap(
        &mut self,
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Result<HeatmapRequest, MapError> {
        let bounds = HeatmapBounds::new(north, south, east, west);
        let extent = bounds.project(&self.crs)?;
        let request = self.heatmap.start(&self.config.heatmap.path, bounds, extent);
        info!("Heatmap requested: {}", request.url);
        self.request_redraw();

        Ok(request)
    }

    /// Completes a heatmap load started by [`MapView::set_heatmap`].
    ///
    /// Both success and failure clear the busy indicator of the host; a failure is also reported
    /// through `on_heatmap_error`. Results of stale requests are dropped.
    pub fn resolve_heatmap(
        &mut self,
        token: HeatmapToken,
        result: Result<DecodedImage, MapError>,
    ) -> HeatmapOutcome {
        let outcome = self.heatmap.resolve(token, result);
        match &outcome {
            HeatmapOutcome::Loaded => {
                info!("Heatmap {token} loaded");
                self.bridge.busy(false);
                self.request_redraw();
            }
            HeatmapOutcome::Failed(message) => {
                warn!("Heatmap {token} failed to load: {message}");
                self.bridge.heatmap_error(message);
                self.bridge.busy(false);
                self.request_redraw();
            }
            HeatmapOutcome::Stale => {}
        }

        outcome
    }

    /// Sets the heatmap and loads its image with the given loader.
    pub async fn load_heatmap(
        &mut self,
        bounds: HeatmapBounds,
        loader: &dyn ImageLoader,
    ) -> Result<HeatmapOutcome, MapError> {
        let request = self.set_heatmap(bounds.north, bounds.south, bounds.east, bounds.west)?;
        let result = loader.load_image(&request.url).await;

        Ok(self.resolve_heatmap(request.token, result))
    }

    /// Removes the heatmap overlay. Pending loads become stale.
    pub fn clear_heatmap(&mut self) {
        self.heatmap.clear();
        debug!("Heatmap cleared");
        self.request_redraw();
    }

    /// Sets the opacity of the heatmap overlay, clamped to `[0, 1]`.
    pub fn set_heatmap_opacity(&mut self, opacity: f32) {
        self.heatmap.set_opacity(opacity);
        self.request_redraw();
    }

    /// Fits the view to all locations and the tracker marker without notifying the host.
    ///
    /// Does nothing if there is neither a location nor a marker.
    pub fn follow(&mut self) {
        let mut points: Vec<Point2d> = self.locations.iter().map(|l| l.projected()).collect();
        points.extend(self.harrier.map(|h| h.projected()));

        let Some(extent) = Rect::from_points(points.iter()) else {
            debug!("Nothing to follow");
            return;
        };

        let listeners_enabled = std::mem::replace(&mut self.listeners_enabled, false);
        let viewport = self.viewport.fit(extent);
        self.change_view(viewport);
        self.listeners_enabled = listeners_enabled;
        debug!("Following {} points", points.len());
    }

    /// Projects a geographic coordinate into the working projection.
    pub fn transform_coord(&self, lon: f64, lat: f64) -> Result<Point2d, MapError> {
        Ok(self.crs.project(&GeoPoint2d::lonlat(lon, lat))?)
    }

    /// Sets the units of the scale line by name: `degrees`, `imperial`, `nautical`, `metric` or
    /// `us`.
    pub fn set_units(&mut self, units: &str) -> Result<(), MapError> {
        self.units = units.parse()?;
        self.request_redraw();
        Ok(())
    }

    /// Units of the scale line.
    pub fn units(&self) -> ScaleUnits {
        self.units
    }

    /// Scale line for the current view.
    pub fn scale_line(&self) -> ScaleLine {
        let latitude = self
            .crs
            .unproject(&self.viewport.center())
            .map(|p| p.lat())
            .unwrap_or_default();
        scale_line(self.units, self.viewport.resolution(), latitude)
    }

    /// Center of the view in the working projection and the zoom level.
    pub fn get_pos(&self) -> (Point2d, f64) {
        (self.viewport.center(), self.viewport.zoom())
    }

    /// Sets the zoom level and then the center of the view (working projection).
    pub fn set_pos(&mut self, x: f64, y: f64, zoom: f64) -> Result<(), MapError> {
        if !x.is_finite() || !y.is_finite() || !zoom.is_finite() {
            return Err(MapError::InvalidArgument(format!(
                "invalid position {x}, {y} at zoom {zoom}"
            )));
        }

        let viewport = self
            .viewport
            .with_zoom(zoom)
            .with_center(Point2d::new(x, y));
        self.change_view(viewport);

        Ok(())
    }

    /// Sets the size of the map area in pixels.
    pub fn set_size(&mut self, size: Size) {
        let viewport = self.viewport.with_size(size);
        self.set_viewport(viewport);
    }

    /// Attaches the secondary (Google Maps) provider once it has loaded.
    ///
    /// Adds its layers, limits the zoom to what the provider supports and sends the extended layer
    /// list to the host. Repeated calls are ignored.
    pub fn on_secondary_provider_loaded(&mut self) {
        if self.secondary.is_some() {
            debug!("Secondary provider is already attached");
            return;
        }

        let viewport = self.viewport.with_max_zoom(self.config.secondary_max_zoom);
        self.secondary = Some(SecondaryView::new(&viewport, &self.crs));
        if self.set_viewport(viewport) {
            self.notify_interaction();
        }

        if self.initialized {
            for layer in secondary_basemaps() {
                self.layers.push(layer);
            }
            self.send_layer_names();
        }

        info!("Secondary provider attached");
    }

    /// State of the secondary provider, if attached.
    pub fn secondary(&self) -> Option<&SecondaryView> {
        self.secondary.as_ref()
    }

    /// Opens the signal popup for the locations under the given screen position, or closes it if
    /// there are none.
    pub fn popup_at(&mut self, px_position: Point2d) -> Option<&SignalPopup> {
        let anchor = self.viewport.screen_to_map(px_position);
        let tolerance = self.config.hit_tolerance;
        let viewport = &self.viewport;

        let hits: Vec<&LocationPoint> = if self.locations_visible {
            self.locations
                .iter()
                .rev()
                .filter(|l| {
                    viewport
                        .map_to_screen(l.projected())
                        .distance_sq(&px_position)
                        <= tolerance * tolerance
                })
                .collect()
        } else {
            vec![]
        };

        self.popup = SignalPopup::from_hits(anchor, hits);
        match &self.popup {
            Some(popup) => debug!("Popup with {} signals", popup.signals().len()),
            None => debug!("Popup closed"),
        }
        self.request_redraw();

        self.popup.as_ref()
    }

    /// Currently open signal popup.
    pub fn popup(&self) -> Option<&SignalPopup> {
        self.popup.as_ref()
    }

    /// Closes the signal popup.
    pub fn close_popup(&mut self) {
        if self.popup.take().is_some() {
            self.request_redraw();
        }
    }

    /// Geographic coordinate under the given screen position, formatted as `lon, lat`.
    pub fn pointer_position(&self, px_position: Point2d) -> Result<String, MapError> {
        let position = self
            .crs
            .unproject(&self.viewport.screen_to_map(px_position))?;
        Ok(position.to_string_xy(5))
    }

    /// Selection box of the drag in progress.
    pub fn selection_box(&self) -> Option<&SelectionBox> {
        self.drag_box.as_ref()
    }

    /// Handles a raw input event from the window system.
    ///
    /// Shift + left drag draws a selection box, a plain drag pans the map, scrolling zooms around
    /// the pointer and a click opens the signal popup.
    pub fn handle_event(&mut self, event: RawUserEvent) {
        for event in self.event_processor.process(event) {
            self.handle_user_event(event);
        }
    }

    fn handle_user_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::DragStarted(MouseButton::Left, e) if e.modifiers.shift => {
                self.drag_box = Some(SelectionBox::new(e.screen_pointer_position));
                self.request_redraw();
            }
            UserEvent::Drag(MouseButton::Left, delta, e) => {
                if let Some(selection) = &mut self.drag_box {
                    selection.update(e.screen_pointer_position);
                    self.request_redraw();
                } else {
                    let to = e.screen_pointer_position;
                    let viewport = self.viewport.translate_by_pixels(to - delta, to);
                    self.set_viewport(viewport);
                    self.notify_interaction();
                }
            }
            UserEvent::DragEnded(MouseButton::Left, _) => {
                if let Some(selection) = self.drag_box.take() {
                    self.select_locations(&selection);
                }
            }
            UserEvent::Scroll(delta, e) => {
                let factor = SCROLL_ZOOM_FACTOR.powf(-delta);
                let viewport = self
                    .viewport
                    .zoom_around(factor, e.screen_pointer_position);
                self.change_view(viewport);
            }
            UserEvent::Click(MouseButton::Left, e) => {
                self.popup_at(e.screen_pointer_position);
            }
            _ => {}
        }
    }

    /// Replaces the viewport. Returns true if the resolution changed.
    fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let resolution_changed = viewport.resolution() != self.viewport.resolution();
        self.viewport = viewport;
        if let Some(secondary) = &mut self.secondary {
            secondary.sync(&self.viewport, &self.crs);
        }
        self.request_redraw();

        resolution_changed
    }

    /// Replaces the viewport and notifies the host if the zoom level changed.
    fn change_view(&mut self, viewport: Viewport) {
        if self.set_viewport(viewport) {
            self.notify_interaction();
        }
    }

    fn notify_interaction(&self) {
        if self.listeners_enabled {
            self.bridge.interaction();
        }
    }

    fn send_layer_names(&self) {
        self.bridge.layer_names(&self.layers.names());
    }

    fn request_redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}
