//! C3: sparse, indexed property store.
//!
//! A `PropertyStore<V>` is a sparse mapping from a dense index (obtained
//! through an [`IndexMap`](crate::index_map::IndexMap)) to a value of type
//! `V`, backed by a `Vec` that grows lazily to the highest index touched.
//! Reading an index that was never written returns the store's default
//! value instead of panicking or requiring a presence check first.

/// Sparse per-index value storage with a default fallback.
#[derive(Debug, Clone)]
pub struct PropertyStore<V> {
    default: V,
    values: Vec<Option<V>>,
}

impl<V: Clone> PropertyStore<V> {
    /// Create a store whose unset slots read back as `default`.
    pub fn new(default: V) -> Self {
        PropertyStore {
            default,
            values: Vec::new(),
        }
    }

    pub fn with_capacity(default: V, capacity: usize) -> Self {
        PropertyStore {
            default,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Read the value at `index`, or the store's default if unset.
    pub fn get(&self, index: usize) -> &V {
        match self.values.get(index) {
            Some(Some(v)) => v,
            _ => &self.default,
        }
    }

    /// Materialise intermediate slots up to `index` with the default value,
    /// then return a mutable reference to the slot at `index`.
    pub fn get_mut(&mut self, index: usize) -> &mut V {
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
        let slot = &mut self.values[index];
        if slot.is_none() {
            *slot = Some(self.default.clone());
        }
        slot.as_mut().expect("slot just materialised")
    }

    pub fn set(&mut self, index: usize, value: V) {
        *self.get_mut(index) = value;
    }

    /// True if `index` has been written (distinct from reading the default
    /// because it is out of range).
    pub fn is_set(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// Drop all materialised slots; subsequent reads fall back to default.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Replace the default used for unmaterialised slots going forward.
    /// Already-materialised slots are unaffected.
    pub fn set_default(&mut self, default: V) {
        self.default = default;
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_reads_default() {
        let store: PropertyStore<i32> = PropertyStore::new(-1);
        assert_eq!(*store.get(5), -1);
        assert!(!store.is_set(5));
    }

    #[test]
    fn mutable_ref_materialises_with_default() {
        let mut store: PropertyStore<i32> = PropertyStore::new(0);
        *store.get_mut(3) += 10;
        assert_eq!(*store.get(3), 10);
        assert_eq!(*store.get(0), 0);
        assert!(store.is_set(0));
        assert!(store.is_set(3));
    }

    #[test]
    fn clear_resets_to_default() {
        let mut store: PropertyStore<i32> = PropertyStore::new(0);
        store.set(2, 42);
        store.clear();
        assert_eq!(*store.get(2), 0);
        assert!(!store.is_set(2));
    }

    #[test]
    fn change_default_does_not_disturb_materialised_slots() {
        let mut store: PropertyStore<i32> = PropertyStore::new(0);
        store.set(1, 5);
        store.set_default(99);
        assert_eq!(*store.get(1), 5);
        assert_eq!(*store.get(2), 99);
    }
}
