//! Specialized collection types

use std::ops::{Index, IndexMut};

pub use slotmap::SlotMap;

/// Free list arena with stable indices.
///
/// Removed slots are recycled by later inserts, so an index is only valid
/// until the item stored there is removed.
#[derive(Debug, Clone)]
pub struct FreeList<T> {
    items: Vec<Option<T>>,
    free_indices: Vec<usize>,
}

impl<T> FreeList<T> {
    /// Create a new free list
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            free_indices: Vec::new(),
        }
    }

    /// Insert an item and return its index
    pub fn insert(&mut self, item: T) -> usize {
        if let Some(index) = self.free_indices.pop() {
            self.items[index] = Some(item);
            index
        } else {
            let index = self.items.len();
            self.items.push(Some(item));
            index
        }
    }

    /// Remove an item by index
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.items.get_mut(index)?.take()?;
        self.free_indices.push(index);
        Some(item)
    }

    /// Get an item by index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)?.as_ref()
    }

    /// Get a mutable reference to an item by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)?.as_mut()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.items.len() - self.free_indices.len()
    }

    /// True when no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every item and forget all slots
    pub fn clear(&mut self) {
        self.items.clear();
        self.free_indices.clear();
    }
}

impl<T> Default for FreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for FreeList<T> {
    type Output = T;

    /// Panics when the slot is vacant
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!("invalid FreeList index {index}"),
        }
    }
}

impl<T> IndexMut<usize> for FreeList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("invalid FreeList index {index}"),
        }
    }
}
