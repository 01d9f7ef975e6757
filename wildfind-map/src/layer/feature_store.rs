use std::sync::{Arc, Mutex};

/// Feature storage of an overlay layer.
///
/// Mutable access goes through [`FeatureContainerMut`], which records what changed. A renderer
/// drains these updates with [`FeatureStore::drain_updates`] to re-render only the affected
/// features.
pub struct FeatureStore<F> {
    features: Vec<F>,
    pending_updates: Arc<Mutex<Vec<FeatureUpdate>>>,
}

impl<F> Default for FeatureStore<F> {
    fn default() -> Self {
        Self {
            features: vec![],
            pending_updates: Default::default(),
        }
    }
}

/// Change of a feature store since the last [`FeatureStore::drain_updates`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureUpdate {
    /// A feature was added or its geometry changed.
    Update {
        /// Index of the feature.
        feature_index: usize,
    },
    /// Only the style of the feature changed.
    UpdateStyle {
        /// Index of the feature.
        feature_index: usize,
    },
    /// All features were removed.
    Clear,
}

/// Mutable container for a feature in a [`FeatureStore`].
pub struct FeatureContainerMut<'a, F> {
    feature: &'a mut F,
    feature_index: usize,
    is_updated: bool,
    pending_updates: Arc<Mutex<Vec<FeatureUpdate>>>,
}

impl<'a, F> FeatureContainerMut<'a, F> {
    /// Index of the feature in the store.
    pub fn index(&self) -> usize {
        self.feature_index
    }

    /// Notifies the store that only the style of the feature is going to change.
    pub fn edit_style(self) -> &'a mut F {
        if !self.is_updated {
            self.pending_updates
                .lock()
                .expect("poisoned mutex")
                .push(FeatureUpdate::UpdateStyle {
                    feature_index: self.feature_index,
                });
        }

        self.feature
    }
}

impl<F> AsRef<F> for FeatureContainerMut<'_, F> {
    fn as_ref(&self) -> &F {
        &*self.feature
    }
}

impl<F> AsMut<F> for FeatureContainerMut<'_, F> {
    fn as_mut(&mut self) -> &mut F {
        if !self.is_updated {
            self.pending_updates
                .lock()
                .expect("poisoned mutex")
                .push(FeatureUpdate::Update {
                    feature_index: self.feature_index,
                });
        }

        self.is_updated = true;
        &mut *self.feature
    }
}

impl<F> FeatureStore<F> {
    /// Adds a new feature to the store and returns its index.
    pub fn insert(&mut self, feature: F) -> usize {
        let feature_index = self.features.len();
        self.features.push(feature);
        self.push_update(FeatureUpdate::Update { feature_index });

        feature_index
    }

    /// Returns a reference to the feature. Returns `None` if a feature with the given `index` does
    /// not exist.
    pub fn get(&self, index: usize) -> Option<&F> {
        self.features.get(index)
    }

    /// Returns a mutable container of the feature.
    pub fn get_mut(&mut self, index: usize) -> Option<FeatureContainerMut<F>> {
        let pending_updates = self.pending_updates.clone();
        self.features
            .get_mut(index)
            .map(|feature| FeatureContainerMut {
                feature,
                feature_index: index,
                is_updated: false,
                pending_updates,
            })
    }

    /// Number of features in the store.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the store has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Removes all features.
    pub fn clear(&mut self) {
        self.features.clear();
        let mut updates = self.pending_updates.lock().expect("poisoned mutex");
        updates.clear();
        updates.push(FeatureUpdate::Clear);
    }

    /// Iterates over the features.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &F> {
        self.features.iter()
    }

    /// Iterates over mutable containers of the features.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = FeatureContainerMut<F>> {
        let pending_updates = self.pending_updates.clone();
        self.features
            .iter_mut()
            .enumerate()
            .map(move |(feature_index, feature)| FeatureContainerMut {
                feature,
                feature_index,
                is_updated: false,
                pending_updates: pending_updates.clone(),
            })
    }

    /// Takes the list of changes made since the previous call.
    pub fn drain_updates(&self) -> Vec<FeatureUpdate> {
        let mut updates = self.pending_updates.lock().expect("poisoned mutex");
        std::mem::take(&mut *updates)
    }

    fn push_update(&self, update: FeatureUpdate) {
        self.pending_updates
            .lock()
            .expect("poisoned mutex")
            .push(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn feature_editing() {
        let mut store = FeatureStore::default();

        store.insert(String::from("F1"));
        let pending_updates = store.drain_updates();
        assert_eq!(pending_updates.len(), 1);
        assert_matches!(
            pending_updates[0],
            FeatureUpdate::Update { feature_index: 0 }
        );

        let mut feature = store.get_mut(0).expect("no feature");
        feature.as_mut().push('2');
        let pending_updates = store.drain_updates();
        assert_eq!(pending_updates, vec![FeatureUpdate::Update { feature_index: 0 }]);

        assert_eq!(store.get(0).expect("no feature"), "F12");
    }

    #[test]
    fn style_edits_are_reported_separately() {
        let mut store = FeatureStore::default();
        store.insert(1);
        store.insert(2);
        store.drain_updates();

        for container in store.iter_mut() {
            if *container.as_ref() == 2 {
                *container.edit_style() = 20;
            }
        }

        assert_eq!(
            store.drain_updates(),
            vec![FeatureUpdate::UpdateStyle { feature_index: 1 }]
        );
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), vec![1, 20]);
    }

    #[test]
    fn iterates_from_topmost() {
        let mut store = FeatureStore::default();
        store.insert("bottom");
        store.insert("middle");
        store.insert("top");

        assert_eq!(
            store.iter().rev().collect::<Vec<_>>(),
            vec![&"top", &"middle", &"bottom"]
        );
    }

    #[test]
    fn clear_replaces_pending_updates() {
        let mut store = FeatureStore::default();
        store.insert("a");
        store.insert("b");
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.drain_updates(), vec![FeatureUpdate::Clear]);
        assert!(store.drain_updates().is_empty());
    }
}
