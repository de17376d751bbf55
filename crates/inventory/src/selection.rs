//! Bulk-action selection.

use std::collections::{BTreeSet, HashMap};

use yanstore_core::InstanceId;

/// Set of selected instance ids.
///
/// Survives filter, sort, and page changes; only a collection refresh prunes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<InstanceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `true` when `id` ends up selected.
    pub fn toggle(&mut self, id: InstanceId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains_all<'a>(&self, ids: impl IntoIterator<Item = &'a InstanceId>) -> bool {
        ids.into_iter().all(|id| self.ids.contains(id))
    }

    pub fn insert_all(&mut self, ids: impl IntoIterator<Item = InstanceId>) {
        self.ids.extend(ids);
    }

    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a InstanceId>) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Drop ids that are no longer part of the loaded collection.
    ///
    /// Returns how many ids were removed.
    pub fn retain_present<V>(&mut self, present: &HashMap<InstanceId, V>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| present.contains_key(id));
        before - self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot in ascending id order.
    pub fn ids(&self) -> Vec<InstanceId> {
        self.ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle(InstanceId::new(1)));
        assert!(selection.contains(InstanceId::new(1)));
        assert!(!selection.toggle(InstanceId::new(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_present_prunes_missing_ids() {
        let mut selection = Selection::new();
        selection.insert_all([InstanceId::new(1), InstanceId::new(2), InstanceId::new(3)]);

        let present: HashMap<InstanceId, usize> = [(InstanceId::new(2), 0)].into_iter().collect();
        assert_eq!(selection.retain_present(&present), 2);
        assert_eq!(selection.ids(), vec![InstanceId::new(2)]);
    }

    #[test]
    fn insert_all_is_an_idempotent_union() {
        let mut selection = Selection::new();
        selection.insert_all([InstanceId::new(1), InstanceId::new(2)]);
        selection.insert_all([InstanceId::new(2), InstanceId::new(3)]);
        assert_eq!(selection.len(), 3);
    }
}
