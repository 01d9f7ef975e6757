//! Layers of the map view.
//!
//! The map is drawn bottom to top as: one visible [`BasemapLayer`] from the [`LayerCollection`],
//! the [`HeatmapLayer`], the [`Track`], the signal [`LocationPoint`]s and the [`TrackerMarker`].

mod basemap;
mod feature_store;
mod features;
mod heatmap;
mod layer_collection;
pub mod symbol;

pub use basemap::{default_basemaps, secondary_basemaps, BasemapLayer, TileProvider};
pub use feature_store::{FeatureContainerMut, FeatureStore, FeatureUpdate};
pub use features::{LocationId, LocationPoint, Track, TrackerMarker};
pub use heatmap::{
    HeatmapBounds, HeatmapLayer, HeatmapOutcome, HeatmapRequest, HeatmapSource, HeatmapState,
    HeatmapToken, DEFAULT_HEATMAP_OPACITY,
};
pub use layer_collection::LayerCollection;
