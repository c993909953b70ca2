use alloc::sync::Arc;

use crate::error::{Error, Result, SizeError};
use crate::offsets::SizeFn;
use crate::{Axis, SlotReset};

/// Configuration for [`crate::Engine`].
///
/// This type is cheap to clone: the size provider lives in an `Arc`, so callers can tweak a few
/// fields and hand the result to `Engine::set_options` without reallocating the closure.
pub struct EngineOptions {
    pub count: usize,
    /// Size of each item along the scroll axis. Must return positive, per-index stable sizes.
    pub size_of: SizeFn,

    /// Size of the viewport along the scroll axis.
    pub viewport_extent: u32,

    /// Extra indexes rendered on the side the viewport is scrolling towards.
    pub overscan: usize,

    /// Size assumed for items that have not been measured yet when estimating the total extent.
    pub estimated_size: u32,

    pub axis: Axis,

    /// Scroll offset the engine starts at.
    pub initial_offset: u64,

    /// Slot numbering after a jump to a window that shares no index with the previous one.
    pub slot_reset: SlotReset,
}

impl Clone for EngineOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            size_of: Arc::clone(&self.size_of),
            viewport_extent: self.viewport_extent,
            overscan: self.overscan,
            estimated_size: self.estimated_size,
            axis: self.axis,
            initial_offset: self.initial_offset,
            slot_reset: self.slot_reset,
        }
    }
}

impl EngineOptions {
    /// Creates options over an infallible size function.
    pub fn new(
        count: usize,
        viewport_extent: u32,
        size_of: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self::try_new(count, viewport_extent, move |i| Ok(size_of(i)))
    }

    /// Creates options over a size function that may fail.
    ///
    /// A failure propagates out of whichever engine call needed that size, and leaves the engine
    /// as it was before the call.
    pub fn try_new(
        count: usize,
        viewport_extent: u32,
        size_of: impl Fn(usize) -> Result<u32, SizeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            size_of: Arc::new(size_of),
            viewport_extent,
            overscan: 5,
            estimated_size: 50,
            axis: Axis::Vertical,
            initial_offset: 0,
            slot_reset: SlotReset::Restart,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport_extent == 0 {
            return Err(Error::InvalidViewportExtent);
        }
        if self.estimated_size == 0 {
            return Err(Error::InvalidEstimatedSize);
        }
        Ok(())
    }

    pub fn with_size_of(mut self, size_of: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        self.size_of = Arc::new(move |i: usize| Ok::<_, SizeError>(size_of(i)));
        self
    }

    pub fn with_try_size_of(
        mut self,
        size_of: impl Fn(usize) -> Result<u32, SizeError> + Send + Sync + 'static,
    ) -> Self {
        self.size_of = Arc::new(size_of);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_estimated_size(mut self, estimated_size: u32) -> Self {
        self.estimated_size = estimated_size;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_slot_reset(mut self, slot_reset: SlotReset) -> Self {
        self.slot_reset = slot_reset;
        self
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("count", &self.count)
            .field("viewport_extent", &self.viewport_extent)
            .field("overscan", &self.overscan)
            .field("estimated_size", &self.estimated_size)
            .field("axis", &self.axis)
            .field("initial_offset", &self.initial_offset)
            .field("slot_reset", &self.slot_reset)
            .finish_non_exhaustive()
    }
}
