//! Fixed-capacity slot ring for lane entities
//!
//! Spawned entities go into the slot under the write index, which wraps to
//! zero at capacity. By the time a slot comes round again its previous
//! occupant has long left the screen, so it is simply overwritten.

use serde::{Deserialize, Serialize};

use crate::consts::SLOT_CAPACITY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRing<T> {
    slots: Vec<T>,
    write_index: usize,
    capacity: usize,
}

impl<T> Default for SlotRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotRing<T> {
    pub fn new() -> Self {
        Self::with_capacity(SLOT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "slot ring needs at least one slot");
        Self {
            slots: Vec::with_capacity(capacity),
            write_index: 0,
            capacity,
        }
    }

    /// Store `item` at the write index and advance it. Returns the slot used.
    pub fn insert(&mut self, item: T) -> usize {
        let slot = self.write_index;
        if slot < self.slots.len() {
            self.slots[slot] = item;
        } else {
            self.slots.push(item);
        }

        self.write_index += 1;
        if self.write_index == self.capacity {
            self.write_index = 0;
        }
        slot
    }

    /// Slot the next insert will occupy
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Drop every entry and rewind the write index
    pub fn clear(&mut self) {
        self.slots.clear();
        self.write_index = 0;
    }
}

impl<'a, T> IntoIterator for &'a SlotRing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SlotRing<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wraps_after_capacity() {
        let mut ring = SlotRing::new();
        ring.insert(0);
        ring.insert(1);
        assert_eq!(ring.write_index(), 2);

        // Slots 2..=13
        for n in 0..12 {
            assert_eq!(ring.insert(100 + n), 2 + n as usize);
        }
        assert_eq!(ring.write_index(), 0);
        assert_eq!(ring.len(), 14);

        // 13th spawn from index 2 lands in slot 0 and overwrites it
        assert_eq!(ring.insert(999), 0);
        assert_eq!(ring.get(0), Some(&999));
        assert_eq!(ring.len(), 14);
    }

    #[test]
    fn test_clear_rewinds() {
        let mut ring = SlotRing::with_capacity(3);
        ring.insert('a');
        ring.insert('b');
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.write_index(), 0);
        assert_eq!(ring.insert('c'), 0);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(inserts in 0usize..100) {
            let mut ring = SlotRing::new();
            for n in 0..inserts {
                let slot = ring.insert(n);
                prop_assert_eq!(slot, n % SLOT_CAPACITY);
            }
            prop_assert!(ring.len() <= SLOT_CAPACITY);
            prop_assert!(ring.write_index() < SLOT_CAPACITY);
        }
    }
}
