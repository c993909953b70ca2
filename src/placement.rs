//! Absolute placement records for rendered items.

use crate::{Axis, ItemMetrics};

/// Where a display layer should put one item.
///
/// The item occupies `[offset, offset + size)` along the scroll axis and stretches across the
/// whole cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub index: usize,
    pub axis: Axis,
    pub offset: u64,
    pub size: u32,
}

impl Placement {
    pub fn top(&self) -> u64 {
        if self.axis.is_vertical() { self.offset } else { 0 }
    }

    pub fn left(&self) -> u64 {
        if self.axis.is_vertical() { 0 } else { self.offset }
    }

    /// Fixed height, or `None` when the item stretches vertically.
    pub fn height(&self) -> Option<u32> {
        self.axis.is_vertical().then_some(self.size)
    }

    /// Fixed width, or `None` when the item stretches horizontally.
    pub fn width(&self) -> Option<u32> {
        (!self.axis.is_vertical()).then_some(self.size)
    }
}

/// Builds the placement of `index` from its cached metrics.
pub fn placement(index: usize, axis: Axis, metrics: ItemMetrics) -> Placement {
    Placement {
        index,
        axis,
        offset: metrics.offset,
        size: metrics.size,
    }
}
