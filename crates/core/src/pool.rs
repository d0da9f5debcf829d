//! Fixed-capacity entity pools for obstacles and coins.
//!
//! Slots are preallocated and never compacted: allocation claims the first
//! free slot and deactivation empties it in place. Slot order is the
//! iteration order every consumer sees.

use crate::types::Lane;

/// An active obstacle or coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub lane: Lane,
    /// Distance along the track; large is far, decreasing toward the viewer.
    pub depth: f64,
}

/// Preallocated slot arena. `None` marks an inactive slot.
#[derive(Debug, Clone)]
pub struct EntityPool<const N: usize> {
    slots: [Option<Entity>; N],
}

impl<const N: usize> EntityPool<N> {
    pub fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Claim the first free slot. Returns the slot index, or `None` when the
    /// pool is full (the request is dropped).
    pub fn spawn(&mut self, lane: Lane, depth: f64) -> Option<usize> {
        let idx = self.slots.iter().position(Option::is_none)?;
        self.slots[idx] = Some(Entity { lane, depth });
        Some(idx)
    }

    /// Visit every active entity in slot order; returning `false` from `f`
    /// deactivates that entity.
    pub fn update(&mut self, mut f: impl FnMut(&mut Entity) -> bool) {
        for slot in self.slots.iter_mut() {
            if let Some(entity) = slot {
                if !f(entity) {
                    *slot = None;
                }
            }
        }
    }

    /// Active entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.slots.iter().flatten()
    }

    pub fn get(&self, idx: usize) -> Option<&Entity> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub fn active_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl<const N: usize> Default for EntityPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
