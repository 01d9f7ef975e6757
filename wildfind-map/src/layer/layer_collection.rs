use std::ops::Index;

use super::basemap::BasemapLayer;
use crate::error::MapError;

/// Collection of basemap layers with their visibility.
///
/// Layers keep their place in the collection for the whole session. Exactly one layer is expected
/// to be visible at a time, which is what [`LayerCollection::show_only`] maintains. A freshly
/// pushed layer is hidden.
///
/// ```
/// use wildfind_map::layer::{BasemapLayer, LayerCollection, TileProvider};
///
/// let mut collection = LayerCollection::default();
/// collection.push(BasemapLayer::new("Layer A", TileProvider::Osm));
/// collection.push(BasemapLayer::new("Layer B", TileProvider::Osm));
///
/// collection.show_only(1).unwrap();
/// assert_eq!(collection.visible_index(), Some(1));
/// assert!(!collection.is_visible(0));
/// ```
#[derive(Default)]
pub struct LayerCollection(Vec<LayerEntry>);

struct LayerEntry {
    layer: BasemapLayer,
    is_hidden: bool,
}

impl LayerCollection {
    /// Adds a hidden layer to the end of the collection.
    pub fn push(&mut self, layer: BasemapLayer) {
        self.0.push(LayerEntry {
            layer,
            is_hidden: true,
        })
    }

    /// Returns the count of layers in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the collection contains zero layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a layer at `index`, or `None` if index is out of bounds.
    pub fn get(&self, index: usize) -> Option<&BasemapLayer> {
        self.0.get(index).map(|entry| &entry.layer)
    }

    /// Iterates over all layers in the collection.
    pub fn iter(&self) -> impl Iterator<Item = &BasemapLayer> + '_ {
        self.0.iter().map(|entry| &entry.layer)
    }

    /// Display names of all layers in collection order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(BasemapLayer::name).collect()
    }

    /// Shows the layer at `index` and hides all the others.
    ///
    /// Returns [`MapError::InvalidArgument`] if `index` is out of bounds. Visibility is not
    /// changed in this case.
    pub fn show_only(&mut self, index: usize) -> Result<&BasemapLayer, MapError> {
        if index >= self.0.len() {
            return Err(MapError::InvalidArgument(format!(
                "layer index {index} is out of range, {} layers available",
                self.0.len()
            )));
        }

        for (i, entry) in self.0.iter_mut().enumerate() {
            entry.is_hidden = i != index;
        }

        Ok(&self.0[index].layer)
    }

    /// Returns true, if the layer at `index` exists and is not hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|entry| !entry.is_hidden)
    }

    /// Index of the first visible layer.
    pub fn visible_index(&self) -> Option<usize> {
        self.0.iter().position(|entry| !entry.is_hidden)
    }

    /// Index of the first layer whose name contains `pattern`.
    ///
    /// ```
    /// use wildfind_map::layer::{BasemapLayer, LayerCollection, TileProvider};
    ///
    /// let mut collection = LayerCollection::default();
    /// collection.push(BasemapLayer::new("Bing Road", TileProvider::Osm));
    /// collection.push(BasemapLayer::new("OpenStreetMap", TileProvider::Osm));
    ///
    /// assert_eq!(collection.position_by_name("Street"), Some(1));
    /// assert_eq!(collection.position_by_name("Google"), None);
    /// ```
    pub fn position_by_name(&self, pattern: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|entry| entry.layer.name().contains(pattern))
    }
}

impl Index<usize> for LayerCollection {
    type Output = BasemapLayer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index].layer
    }
}

impl<T: IntoIterator<Item = BasemapLayer>> From<T> for LayerCollection {
    fn from(value: T) -> Self {
        let mut collection = Self::default();
        for layer in value {
            collection.push(layer);
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::basemap::{default_basemaps, TileProvider};
    use assert_matches::assert_matches;

    #[test]
    fn new_layers_are_hidden() {
        let collection = LayerCollection::from(default_basemaps());
        assert_eq!(collection.len(), 7);
        assert_eq!(collection.visible_index(), None);
    }

    #[test]
    fn show_only_keeps_single_visible_layer() {
        let mut collection = LayerCollection::from(default_basemaps());
        for index in 0..collection.len() {
            collection.show_only(index).unwrap();
            assert_eq!(collection.visible_index(), Some(index));
            for other in (0..collection.len()).filter(|i| *i != index) {
                assert!(!collection.is_visible(other));
            }
        }
    }

    #[test]
    fn show_only_out_of_range() {
        let mut collection = LayerCollection::from(vec![BasemapLayer::new("A", TileProvider::Osm)]);
        collection.show_only(0).unwrap();
        assert_matches!(collection.show_only(1), Err(MapError::InvalidArgument(_)));
        assert_eq!(collection.visible_index(), Some(0));
        assert!(!collection.is_visible(5));
    }

    #[test]
    fn names_in_order() {
        let collection = LayerCollection::from(vec![
            BasemapLayer::new("A", TileProvider::Osm),
            BasemapLayer::new("B", TileProvider::Osm),
        ]);
        assert_eq!(collection.names(), vec!["A", "B"]);
        assert_eq!(collection[1].name(), "B");
    }
}
