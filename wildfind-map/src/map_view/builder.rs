use crate::bridge::{BridgeLink, HostBridge};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::messenger::Messenger;

use super::MapView;

/// Convenience type to create a [`MapView`].
///
/// ```
/// use wildfind_map::{LoggingBridge, MapConfig, MapViewBuilder};
///
/// let mut map = MapViewBuilder::default()
///     .with_config(MapConfig::default())
///     .with_bridge(LoggingBridge {})
///     .build()
///     .unwrap();
/// map.initialize().unwrap();
///
/// assert_eq!(map.layers()[map.get_layer()].name(), "OpenStreetMap");
/// ```
#[derive(Default)]
pub struct MapViewBuilder {
    config: Option<MapConfig>,
    bridge: Option<Box<dyn HostBridge>>,
    messenger: Option<Box<dyn Messenger>>,
}

impl MapViewBuilder {
    /// Sets the configuration of the view. Defaults to [`MapConfig::default()`].
    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the host bridge that receives notifications. Without a bridge the view runs headless.
    pub fn with_bridge(mut self, bridge: impl HostBridge + 'static) -> Self {
        self.bridge = Some(Box::new(bridge));
        self
    }

    /// Sets the messenger of the rendering backend.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Creates the view. Fails if the configuration is invalid.
    pub fn build(self) -> Result<MapView, MapError> {
        MapView::from_parts(
            self.config.unwrap_or_default(),
            BridgeLink::new(self.bridge),
            self.messenger,
        )
    }
}
