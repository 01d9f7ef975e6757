//! Configuration of the map view.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::layer::{default_basemaps, BasemapLayer, DEFAULT_HEATMAP_OPACITY};
use crate::scale::ScaleUnits;
use crate::view::DEFAULT_MAX_ZOOM;

/// Port the falconer server listens on by default.
pub const DEFAULT_SERVER_PORT: u16 = 12015;

/// Highest zoom level supported by the secondary (Google) tile provider.
pub const SECONDARY_MAX_ZOOM: f64 = 21.0;

/// Settings of a [`MapView`](crate::MapView).
///
/// Every field has a default, so a configuration file only needs to list the values that differ:
///
/// ```
/// use wildfind_map::MapConfig;
///
/// let config = MapConfig::from_json(r#"{ "default_layer": "Bing Road", "zoom": 12 }"#).unwrap();
/// assert_eq!(config.default_layer, "Bing Road");
/// assert_eq!(config.basemaps.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Basemap layers installed by `initialize`, in the order reported to the host.
    pub basemaps: Vec<BasemapLayer>,
    /// Part of the name of the layer shown after initialization.
    pub default_layer: String,
    /// Key for the Bing imagery service.
    pub bing_key: Option<String>,
    /// Heatmap image source.
    pub heatmap: HeatmapConfig,
    /// Initial center of the map as `[lon, lat]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: f64,
    /// Highest allowed zoom level.
    pub max_zoom: f64,
    /// Highest zoom level while the secondary provider is attached.
    pub secondary_max_zoom: f64,
    /// Distance in pixels within which a click hits a location.
    pub hit_tolerance: f64,
    /// Units of the scale line.
    pub units: ScaleUnits,
    /// Initial size of the map area in pixels as `[width, height]`.
    pub size: [f64; 2],
}

/// Where the heatmap image is fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Scheme, host and port of the server generating the heatmap.
    pub base_url: String,
    /// Path of the image on the server.
    pub path: String,
    /// Initial opacity of the overlay.
    pub opacity: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:{DEFAULT_SERVER_PORT}"),
            path: "/heatmap.png".to_string(),
            opacity: DEFAULT_HEATMAP_OPACITY,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            basemaps: default_basemaps(),
            default_layer: "OpenStreetMap".to_string(),
            bing_key: None,
            heatmap: HeatmapConfig::default(),
            center: [0.0, 0.0],
            zoom: 4.0,
            max_zoom: DEFAULT_MAX_ZOOM,
            secondary_max_zoom: SECONDARY_MAX_ZOOM,
            hit_tolerance: 5.0,
            units: ScaleUnits::Metric,
            size: [1024.0, 768.0],
        }
    }
}

impl MapConfig {
    /// Parses a JSON configuration and checks it for consistency.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the values can be used by a map view.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.basemaps.is_empty() {
            return Err(MapError::Config("at least one basemap is required".into()));
        }

        if !self.max_zoom.is_finite() || self.max_zoom < 0.0 {
            return Err(MapError::Config(format!("invalid max zoom {}", self.max_zoom)));
        }

        if !(0.0..=self.max_zoom).contains(&self.secondary_max_zoom) {
            return Err(MapError::Config(format!(
                "secondary max zoom {} must be in 0..={}",
                self.secondary_max_zoom, self.max_zoom
            )));
        }

        if self.hit_tolerance.is_nan() || self.hit_tolerance < 0.0 {
            return Err(MapError::Config(format!(
                "invalid hit tolerance {}",
                self.hit_tolerance
            )));
        }

        if self.size.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(MapError::Config(format!("invalid size {:?}", self.size)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let config = MapConfig::default();
        assert_eq!(config.heatmap.base_url, "http://localhost:12015");
        assert_eq!(config.heatmap.path, "/heatmap.png");
        assert_eq!(config.default_layer, "OpenStreetMap");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json() {
        let config = MapConfig::from_json(r#"{"units": "nautical", "heatmap": {"opacity": 0.3}}"#)
            .unwrap();
        assert_eq!(config.units, ScaleUnits::Nautical);
        assert_eq!(config.heatmap.opacity, 0.3);
        assert_eq!(config.heatmap.path, "/heatmap.png");
    }

    #[test]
    fn custom_basemaps() {
        let config = MapConfig::from_json(
            r#"{"basemaps": [{"name": "Local", "provider": {"type": "osm"}}]}"#,
        )
        .unwrap();
        assert_eq!(config.basemaps.len(), 1);
        assert_eq!(config.basemaps[0].name(), "Local");
    }

    #[test]
    fn invalid_config() {
        assert_matches!(MapConfig::from_json("{"), Err(MapError::Config(_)));
        assert_matches!(
            MapConfig::from_json(r#"{"basemaps": []}"#),
            Err(MapError::Config(_))
        );
        assert_matches!(
            MapConfig::from_json(r#"{"max_zoom": 18, "secondary_max_zoom": 21}"#),
            Err(MapError::Config(_))
        );
    }

    #[test]
    fn missing_file() {
        assert_matches!(
            MapConfig::from_file("/nonexistent/wildfind.json"),
            Err(MapError::IO(_))
        );
    }
}
