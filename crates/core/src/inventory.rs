//! Key inventory shared by doors and pickups.
//!
//! The inventory is a fixed-capacity set of boolean slots created once at
//! scene load. Slot indices are validated against the capacity when the
//! scene is loaded; runtime access is bounds-checked and out-of-range
//! indices are treated as "key absent" rather than panicking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index correlating a door's lock with an inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(pub usize);

/// Error raised when a configured key index does not fit the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key index {index} out of range (inventory has {capacity} slots)")]
pub struct InventoryError {
    /// The offending key index.
    pub index: usize,
    /// Number of slots in the inventory.
    pub capacity: usize,
}

/// Fixed-capacity key set, injected into doors and pickups.
#[derive(Debug, Clone)]
pub struct KeyInventory {
    slots: Vec<bool>,
}

impl KeyInventory {
    /// Create an inventory with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![false; capacity],
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Check that `key` refers to an existing slot.
    pub fn validate(&self, key: KeyId) -> Result<(), InventoryError> {
        if key.0 < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError {
                index: key.0,
                capacity: self.slots.len(),
            })
        }
    }

    /// Number of keys currently possessed.
    pub fn held_count(&self) -> usize {
        self.slots.iter().filter(|held| **held).count()
    }

    /// Whether the key is currently possessed. Out-of-range reads as absent.
    pub fn contains(&self, key: KeyId) -> bool {
        self.slots.get(key.0).copied().unwrap_or(false)
    }

    /// Mark the key as possessed. Out-of-range is a no-op.
    pub fn insert(&mut self, key: KeyId) {
        if let Some(slot) = self.slots.get_mut(key.0) {
            *slot = true;
        }
    }

    /// Remove the key (consumed on lock/unlock). Out-of-range is a no-op.
    pub fn remove(&mut self, key: KeyId) {
        if let Some(slot) = self.slots.get_mut(key.0) {
            *slot = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let inv = KeyInventory::new(3);
        assert_eq!(inv.capacity(), 3);
        for i in 0..3 {
            assert!(!inv.contains(KeyId(i)));
        }
    }

    #[test]
    fn insert_and_remove() {
        let mut inv = KeyInventory::new(2);
        inv.insert(KeyId(1));
        assert!(inv.contains(KeyId(1)));
        assert!(!inv.contains(KeyId(0)));
        assert_eq!(inv.held_count(), 1);

        inv.remove(KeyId(1));
        assert!(!inv.contains(KeyId(1)));
        assert_eq!(inv.held_count(), 0);
    }

    #[test]
    fn out_of_range_is_inert() {
        let mut inv = KeyInventory::new(1);
        inv.insert(KeyId(9));
        assert!(!inv.contains(KeyId(9)));
        inv.remove(KeyId(9));
        assert_eq!(inv.capacity(), 1);
    }

    #[test]
    fn validate_reports_capacity() {
        let inv = KeyInventory::new(2);
        assert!(inv.validate(KeyId(1)).is_ok());
        let err = inv.validate(KeyId(2)).unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.capacity, 2);
    }
}
