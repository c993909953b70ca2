use core::cmp;
use core::ops::RangeInclusive;

/// Small recyclable identity attached to a rendered index.
pub type SlotId = usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Derives the direction of travel from two consecutive scroll offsets.
    ///
    /// Staying in place counts as moving forward.
    pub fn between(previous: u64, next: u64) -> Self {
        match next.cmp(&previous) {
            cmp::Ordering::Less => Self::Backward,
            cmp::Ordering::Equal | cmp::Ordering::Greater => Self::Forward,
        }
    }
}

/// The axis items are stacked along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// The contiguous range of indexes currently materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

#[allow(clippy::len_without_is_empty)] // never empty
impl RenderWindow {
    /// Creates a window, swapping the bounds if they are given out of order.
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index: cmp::min(start_index, end_index),
            end_index: cmp::max(start_index, end_index),
        }
    }

    pub fn len(&self) -> usize {
        self.end_index.abs_diff(self.start_index) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    /// Returns `true` when the two windows share no index.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        other.start_index > self.end_index || other.end_index < self.start_index
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Clamps the window to `[0, count - 1]`, returning `None` when nothing is left.
    pub fn clamp_to(self, count: usize) -> Option<Self> {
        if count == 0 || self.start_index >= count {
            return None;
        }
        Some(Self {
            start_index: self.start_index,
            end_index: cmp::min(self.end_index, count - 1),
        })
    }
}

/// Cached size and cumulative offset of one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetrics {
    pub size: u32,
    pub offset: u64,
}

impl ItemMetrics {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// One rendered index together with its slot and geometry along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedItem {
    pub index: usize,
    pub slot: SlotId,
    pub offset: u64,
    pub size: u32,
}

impl RenderedItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }

    pub fn metrics(&self) -> ItemMetrics {
        ItemMetrics {
            size: self.size,
            offset: self.offset,
        }
    }
}
