use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::{RenderWindow, SlotId};

/// What a [`KeyAllocator`] does when the new window shares no index with the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotReset {
    /// Drop the recycle pool and number the new window `0..len`.
    #[default]
    Restart,
    /// Drop the recycle pool and number the new window from the running counter, so slot ids
    /// handed out before the jump never reappear.
    Continue,
}

/// Assigns small recyclable slot ids to the indexes of a render window.
///
/// Each call to [`KeyAllocator::resolve`] diffs the new window against the previous one:
/// - indexes present in both keep their slot;
/// - indexes that left free their slot into a FIFO recycle pool;
/// - indexes that entered take the oldest freed slot, or a fresh one from the counter.
///
/// At every point the live map is a bijection between the window's indexes and a set of slot
/// ids, and no slot id is both live and in the recycle pool.
#[derive(Clone, Debug, Default)]
pub struct KeyAllocator {
    window: Option<RenderWindow>,
    slots: Vec<SlotId>, // slots[i] belongs to window.start_index + i
    recycled: VecDeque<SlotId>,
    next_slot: SlotId,
    reset: SlotReset,
}

impl KeyAllocator {
    pub fn new(reset: SlotReset) -> Self {
        Self {
            reset,
            ..Self::default()
        }
    }

    /// The window the current slot map covers.
    pub fn window(&self) -> Option<RenderWindow> {
        self.window
    }

    pub fn reset_policy(&self) -> SlotReset {
        self.reset
    }

    pub fn set_reset_policy(&mut self, reset: SlotReset) {
        self.reset = reset;
    }

    /// The slot id the counter hands out next.
    pub fn next_slot_id(&self) -> SlotId {
        self.next_slot
    }

    /// Freed slot ids, oldest first.
    pub fn recycled(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.recycled.iter().copied()
    }

    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    pub fn slot_of(&self, index: usize) -> Option<SlotId> {
        let window = self.window?;
        if !window.contains(index) {
            return None;
        }
        self.slots.get(index - window.start_index).copied()
    }

    /// Iterates `(index, slot)` pairs in increasing index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SlotId)> + '_ {
        let start = self.window.map_or(0, |w| w.start_index);
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, &slot)| (start + i, slot))
    }

    /// Forgets the window, the slot map and the recycle pool.
    pub fn clear(&mut self) {
        self.window = None;
        self.slots.clear();
        self.recycled.clear();
        if self.reset == SlotReset::Restart {
            self.next_slot = 0;
        }
    }

    /// Moves the allocator to `next`, reusing, freeing and assigning slots as needed.
    ///
    /// `None` (an empty list) clears everything.
    pub fn resolve(&mut self, next: Option<RenderWindow>) {
        let Some(next) = next else {
            self.clear();
            return;
        };
        // The fields are public; bounds built by hand may be out of order.
        let next = RenderWindow::new(next.start_index, next.end_index);
        match self.window {
            Some(prev) if !prev.is_disjoint(&next) => self.shift(prev, next),
            _ => self.restart(next),
        }
        debug_assert!(self.is_bijective(), "slot map lost its bijection");
    }

    /// Clamps the slot state to an item count that just shrank.
    pub fn truncate(&mut self, count: usize) {
        let Some(window) = self.window else {
            return;
        };
        if window.end_index < count {
            return;
        }
        let Some(clamped) = window.clamp_to(count) else {
            self.clear();
            return;
        };
        let keep = clamped.len();
        self.recycled.extend(self.slots.drain(keep..));
        self.window = Some(clamped);
    }

    fn restart(&mut self, next: RenderWindow) {
        let base = match self.reset {
            SlotReset::Restart => 0,
            SlotReset::Continue => self.next_slot,
        };
        vtrace!(
            start = next.start_index,
            end = next.end_index,
            base,
            "KeyAllocator::restart"
        );
        self.recycled.clear();
        self.slots.clear();
        self.slots.extend(base..base + next.len());
        self.next_slot = base + next.len();
        self.window = Some(next);
    }

    fn shift(&mut self, prev: RenderWindow, next: RenderWindow) {
        // Fell off the top and fell off the bottom are independent; a shrinking window does both.
        for index in prev.start_index..next.start_index {
            self.recycled.push_back(self.slots[index - prev.start_index]);
        }
        for index in next.end_index.saturating_add(1)..=prev.end_index {
            self.recycled.push_back(self.slots[index - prev.start_index]);
        }

        let mut slots = Vec::with_capacity(next.len());
        for index in next.indexes() {
            let slot = if prev.contains(index) {
                self.slots[index - prev.start_index]
            } else if let Some(slot) = self.recycled.pop_front() {
                slot
            } else {
                let slot = self.next_slot;
                self.next_slot += 1;
                slot
            };
            slots.push(slot);
        }
        vtrace!(
            start = next.start_index,
            end = next.end_index,
            recycled = self.recycled.len(),
            next_slot = self.next_slot,
            "KeyAllocator::shift"
        );
        self.slots = slots;
        self.window = Some(next);
    }

    fn is_bijective(&self) -> bool {
        let mut seen: Vec<SlotId> = self
            .slots
            .iter()
            .chain(self.recycled.iter())
            .copied()
            .collect();
        seen.sort_unstable();
        seen.windows(2).all(|w| w[0] != w[1])
            && self.slots.iter().all(|&s| s < self.next_slot)
    }
}
