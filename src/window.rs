use core::cmp;

use crate::error::{Error, Result};
use crate::offsets::OffsetIndex;
use crate::{RenderWindow, ScrollDirection};

/// The viewport as reported by one scroll notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow {
    pub scroll_offset: u64,
    pub direction: ScrollDirection,
    pub visible_extent: u32,
}

impl ViewportWindow {
    pub fn new(scroll_offset: u64, direction: ScrollDirection, visible_extent: u32) -> Result<Self> {
        if visible_extent == 0 {
            return Err(Error::InvalidViewportExtent);
        }
        Ok(Self {
            scroll_offset,
            direction,
            visible_extent,
        })
    }

    /// Returns the viewport after scrolling to `scroll_offset`, deriving the direction from the
    /// current offset.
    pub fn scrolled_to(self, scroll_offset: u64) -> Self {
        Self {
            scroll_offset,
            direction: ScrollDirection::between(self.scroll_offset, scroll_offset),
            visible_extent: self.visible_extent,
        }
    }

    /// End of the visible range (exclusive).
    pub fn scroll_end(&self) -> u64 {
        self.scroll_offset.saturating_add(self.visible_extent as u64)
    }
}

/// Resolves the index range to render for `viewport`.
///
/// Overscan goes entirely to the side the viewport is moving towards: after the visible range
/// when scrolling forward, before it when scrolling backward. Every index in the returned window
/// is measured in `offsets` once this returns `Ok`.
///
/// Returns `Ok(None)` for an empty list.
pub fn resolve_window(
    offsets: &mut OffsetIndex,
    viewport: &ViewportWindow,
    overscan: usize,
) -> Result<Option<RenderWindow>> {
    let count = offsets.count();
    if count == 0 {
        return Ok(None);
    }
    if viewport.visible_extent == 0 {
        return Err(Error::InvalidViewportExtent);
    }
    let last = count - 1;

    let visible_start = offsets.find_index_at_offset(viewport.scroll_offset)?;
    let scroll_end = viewport.scroll_end();
    let mut reached = offsets.size_and_offset(visible_start)?.end();
    let mut visible_end = visible_start;
    while visible_end < last && reached < scroll_end {
        visible_end += 1;
        reached = reached.saturating_add(offsets.size_and_offset(visible_end)?.size as u64);
    }

    let window = match viewport.direction {
        ScrollDirection::Forward => {
            let end = cmp::min(visible_end.saturating_add(overscan), last);
            // Measure the overscan tail so callers can read geometry from the cache.
            offsets.size_and_offset(end)?;
            RenderWindow::new(visible_start, end)
        }
        ScrollDirection::Backward => {
            RenderWindow::new(visible_start.saturating_sub(overscan), visible_end)
        }
    };
    vtrace!(
        scroll_offset = viewport.scroll_offset,
        start = window.start_index,
        end = window.end_index,
        "resolve_window"
    );
    Ok(Some(window))
}
