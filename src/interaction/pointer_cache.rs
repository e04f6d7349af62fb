use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// Host-assigned identifier of an active pointer (mouse, pen or touch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub i64);

/// Last known plot-relative position per active pointer.
///
/// Insertion order is kept so the two pinch pointers are always the two
/// oldest contacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerCache {
    pointers: IndexMap<PointerId, PixelPoint>,
}

impl PointerCache {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: PointerId) -> Option<PixelPoint> {
        self.pointers.get(&id).copied()
    }

    /// Inserts or refreshes a pointer; re-inserting keeps its original slot.
    pub fn insert(&mut self, id: PointerId, point: PixelPoint) {
        self.pointers.insert(id, point);
    }

    /// Updates a known pointer; returns `false` for unknown ids.
    pub fn update(&mut self, id: PointerId, point: PixelPoint) -> bool {
        match self.pointers.get_mut(&id) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: PointerId) -> Option<PixelPoint> {
        self.pointers.shift_remove(&id)
    }

    /// The two oldest active pointers.
    #[must_use]
    pub fn first_pair(&self) -> Option<(PixelPoint, PixelPoint)> {
        let mut positions = self.pointers.values().copied();
        Some((positions.next()?, positions.next()?))
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}
