use core::cmp;

use crate::error::{Error, Result};
use crate::{RenderWindow, ScrollDirection};

/// Closed-form window resolution for lists where every item has the same size.
///
/// No cache is needed: `offset(i) = i * item_size`. Overscan follows the same rule as the
/// variable-size path and goes to the side the viewport is scrolling towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSizeWindow {
    count: usize,
    item_size: u32,
    viewport_extent: u32,
    overscan: usize,
}

impl FixedSizeWindow {
    pub fn new(count: usize, item_size: u32, viewport_extent: u32, overscan: usize) -> Result<Self> {
        if item_size == 0 {
            return Err(Error::InvalidItemSize);
        }
        if viewport_extent == 0 {
            return Err(Error::InvalidViewportExtent);
        }
        Ok(Self {
            count,
            item_size,
            viewport_extent,
            overscan,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn item_size(&self) -> u32 {
        self.item_size
    }

    /// Number of items needed to cover the viewport.
    pub fn visible_count(&self) -> usize {
        self.viewport_extent.div_ceil(self.item_size) as usize
    }

    pub fn total_extent(&self) -> u64 {
        (self.count as u64).saturating_mul(self.item_size as u64)
    }

    pub fn offset_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.item_size as u64)
    }

    pub fn resolve(&self, scroll_offset: u64, direction: ScrollDirection) -> Option<RenderWindow> {
        let last = self.count.checked_sub(1)?;
        let size = self.item_size as u64;
        let scroll_end = scroll_offset.saturating_add(self.viewport_extent as u64);
        let visible_start = self.clamp(scroll_offset / size, last);
        // Last item starting before the end of the viewport.
        let visible_end = self.clamp((scroll_end - 1) / size, last);

        Some(match direction {
            ScrollDirection::Forward => RenderWindow::new(
                visible_start,
                cmp::min(visible_end.saturating_add(self.overscan), last),
            ),
            ScrollDirection::Backward => {
                RenderWindow::new(visible_start.saturating_sub(self.overscan), visible_end)
            }
        })
    }

    fn clamp(&self, index: u64, last: usize) -> usize {
        cmp::min(usize::try_from(index).unwrap_or(usize::MAX), last)
    }
}
