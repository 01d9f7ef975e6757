use serde::{Deserialize, Serialize};

/// Source of basemap tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileProvider {
    /// Bing Maps imagery. Requires an API key in the map configuration.
    Bing {
        /// Imagery set name, e.g. `Aerial` or `Road`.
        imagery_set: String,
        /// Culture code used for labels.
        #[serde(default)]
        culture: Option<String>,
        /// Maximum zoom level the imagery set provides.
        max_zoom: u32,
    },
    /// MapQuest open tiles.
    MapQuest {
        /// Layer name: `sat` or `osm`.
        layer: String,
    },
    /// Standard OpenStreetMap tiles.
    Osm,
    /// Map type of the secondary Google Maps provider. Tiles are drawn by the secondary provider,
    /// this layer only carries its map type id.
    Google {
        /// Google map type id, e.g. `hybrid` or `roadmap`.
        map_type: String,
    },
}

impl TileProvider {
    /// Returns true for layers drawn by the secondary Google Maps provider.
    pub fn is_secondary(&self) -> bool {
        matches!(self, TileProvider::Google { .. })
    }

    /// URL template of the plain XYZ tile source with `{z}`, `{x}` and `{y}` placeholders.
    ///
    /// Returns `None` for providers which require a metadata request (Bing) or that are drawn by
    /// the secondary provider.
    pub fn url_template(&self) -> Option<String> {
        match self {
            TileProvider::Osm => Some("https://tile.openstreetmap.org/{z}/{x}/{y}.png".into()),
            TileProvider::MapQuest { layer } => {
                let ext = if layer == "sat" { "jpg" } else { "png" };
                Some(format!(
                    "https://otile1.mqcdn.com/tiles/1.0.0/{layer}/{{z}}/{{x}}/{{y}}.{ext}"
                ))
            }
            TileProvider::Bing { .. } | TileProvider::Google { .. } => None,
        }
    }

    /// URL of the imagery metadata request of a Bing layer, which returns the actual tile url
    /// template.
    pub fn metadata_url(&self, key: &str) -> Option<String> {
        let TileProvider::Bing {
            imagery_set,
            culture,
            ..
        } = self
        else {
            return None;
        };

        let culture = culture.as_deref().unwrap_or("en-us");
        Some(format!(
            "https://dev.virtualearth.net/REST/v1/Imagery/Metadata/{imagery_set}?uriScheme=https&include=ImageryProviders&key={key}&c={culture}"
        ))
    }

    /// Maximum zoom level of the provider, if limited.
    pub fn max_zoom(&self) -> Option<u32> {
        match self {
            TileProvider::Bing { max_zoom, .. } => Some(*max_zoom),
            _ => None,
        }
    }
}

/// A selectable background tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasemapLayer {
    name: String,
    provider: TileProvider,
}

impl BasemapLayer {
    /// Creates a new layer.
    pub fn new(name: impl Into<String>, provider: TileProvider) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }

    /// Display name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile provider of the layer.
    pub fn provider(&self) -> &TileProvider {
        &self.provider
    }
}

fn bing(name: &str, imagery_set: &str, culture: Option<&str>, max_zoom: u32) -> BasemapLayer {
    BasemapLayer::new(
        name,
        TileProvider::Bing {
            imagery_set: imagery_set.into(),
            culture: culture.map(String::from),
            max_zoom,
        },
    )
}

/// Basemaps installed by [`MapView::initialize`](crate::MapView::initialize) unless the
/// configuration overrides them.
pub fn default_basemaps() -> Vec<BasemapLayer> {
    vec![
        bing("Bing Aerial", "Aerial", None, 19),
        bing("Bing Aerial with Labels", "AerialWithLabels", None, 19),
        bing("Bing Ordnance Survey", "ordnanceSurvey", Some("en-gb"), 17),
        bing("Bing Road", "Road", None, 19),
        BasemapLayer::new(
            "MapQuest Satellite",
            TileProvider::MapQuest {
                layer: "sat".into(),
            },
        ),
        BasemapLayer::new(
            "MapQuest OSM",
            TileProvider::MapQuest {
                layer: "osm".into(),
            },
        ),
        BasemapLayer::new("OpenStreetMap", TileProvider::Osm),
    ]
}

/// Layers added when the secondary Google Maps provider has finished loading.
pub fn secondary_basemaps() -> Vec<BasemapLayer> {
    [
        ("Google Hybrid", "hybrid"),
        ("Google Road", "roadmap"),
        ("Google Satellite", "satellite"),
        ("Google Terrain", "terrain"),
    ]
    .into_iter()
    .map(|(name, map_type)| {
        BasemapLayer::new(
            name,
            TileProvider::Google {
                map_type: map_type.into(),
            },
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layers() {
        let layers = default_basemaps();
        assert_eq!(layers.len(), 7);
        assert_eq!(layers[6].name(), "OpenStreetMap");
        assert_eq!(layers[2].provider().max_zoom(), Some(17));
        assert!(layers.iter().all(|l| !l.provider().is_secondary()));
        assert!(secondary_basemaps()
            .iter()
            .all(|l| l.provider().is_secondary()));
    }

    #[test]
    fn url_templates() {
        assert_eq!(
            TileProvider::Osm.url_template().as_deref(),
            Some("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
        );
        assert_eq!(
            TileProvider::MapQuest {
                layer: "sat".into()
            }
            .url_template()
            .as_deref(),
            Some("https://otile1.mqcdn.com/tiles/1.0.0/sat/{z}/{x}/{y}.jpg")
        );
        assert!(secondary_basemaps()[0].provider().url_template().is_none());
    }

    #[test]
    fn bing_metadata_url() {
        let layers = default_basemaps();
        let url = layers[2].provider().metadata_url("KEY").unwrap();
        assert!(url.contains("/Metadata/ordnanceSurvey?"));
        assert!(url.ends_with("key=KEY&c=en-gb"));
        assert!(layers[6].provider().metadata_url("KEY").is_none());
    }

    #[test]
    fn provider_serde() {
        let json = r#"{"name":"Bing Road","provider":{"type":"bing","imagery_set":"Road","max_zoom":19}}"#;
        let layer: BasemapLayer = serde_json::from_str(json).unwrap();
        assert_eq!(layer, default_basemaps()[3]);
    }
}
