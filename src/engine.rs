use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::{Error, Result, SizeError};
use crate::offsets::{OffsetIndex, SizeFn};
use crate::placement::{Placement, placement};
use crate::render::Renderer;
use crate::slots::KeyAllocator;
use crate::window::{ViewportWindow, resolve_window};
use crate::{
    Axis, EngineOptions, ItemMetrics, RenderWindow, RenderedItem, ScrollDirection, ScrollState,
    SlotId, SlotReset,
};

/// A headless windowing engine for one scrollable viewport.
///
/// The engine owns the size/offset cache and the slot allocator for a whole session:
/// - your scroll source reports offsets through [`Engine::apply_scroll`];
/// - the engine resolves which indexes to render and which slot each one lives in;
/// - your display layer reads the result back via [`Engine::render`] or
///   [`Engine::for_each_rendered_item`] and places each slot's view at the given offset.
///
/// It holds no UI objects and does no work in the background. Calls on one engine must be
/// serialized by the caller.
///
/// Every mutating call either fully applies or, when the size provider fails, leaves the render
/// window, slot map and scroll position as they were.
#[derive(Clone, Debug)]
pub struct Engine {
    options: EngineOptions,
    offsets: OffsetIndex,
    slots: KeyAllocator,
    viewport: ViewportWindow,
    window: Option<RenderWindow>,
}

impl Engine {
    /// Creates an engine and resolves the window at `options.initial_offset`.
    pub fn new(options: EngineOptions) -> Result<Self> {
        options.validate()?;
        vdebug!(
            count = options.count,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            "Engine::new"
        );
        let viewport = ViewportWindow::new(
            options.initial_offset,
            ScrollDirection::Forward,
            options.viewport_extent,
        )?;
        let mut engine = Self {
            offsets: OffsetIndex::new(options.count, Arc::clone(&options.size_of)),
            slots: KeyAllocator::new(options.slot_reset),
            viewport,
            window: None,
            options,
        };
        engine.refresh()?;
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn offsets(&self) -> &OffsetIndex {
        &self.offsets
    }

    pub fn slots(&self) -> &KeyAllocator {
        &self.slots
    }

    pub fn viewport(&self) -> ViewportWindow {
        self.viewport
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.viewport.direction
    }

    /// The currently materialized window, or `None` for an empty list.
    pub fn render_window(&self) -> Option<RenderWindow> {
        self.window
    }

    /// The slot of a rendered index.
    pub fn slot_of(&self, index: usize) -> Option<SlotId> {
        self.slots.slot_of(index)
    }

    /// Handles one scroll notification.
    ///
    /// The direction is derived from the previous offset: staying in place or moving to a larger
    /// offset is forward.
    pub fn apply_scroll(&mut self, scroll_offset: u64) -> Result<Option<RenderWindow>> {
        vtrace!(
            from = self.viewport.scroll_offset,
            to = scroll_offset,
            "Engine::apply_scroll"
        );
        let viewport = self.viewport.scrolled_to(scroll_offset);
        self.apply(viewport, self.options.overscan)
    }

    pub fn set_viewport_extent(&mut self, extent: u32) -> Result<()> {
        let viewport = ViewportWindow::new(
            self.viewport.scroll_offset,
            self.viewport.direction,
            extent,
        )?;
        self.apply(viewport, self.options.overscan)?;
        self.options.viewport_extent = extent;
        Ok(())
    }

    pub fn set_overscan(&mut self, overscan: usize) -> Result<()> {
        self.apply(self.viewport, overscan)?;
        Ok(())
    }

    pub fn set_estimated_size(&mut self, estimated_size: u32) -> Result<()> {
        if estimated_size == 0 {
            return Err(Error::InvalidEstimatedSize);
        }
        self.options.estimated_size = estimated_size;
        Ok(())
    }

    pub fn set_axis(&mut self, axis: Axis) {
        self.options.axis = axis;
    }

    pub fn set_slot_reset(&mut self, slot_reset: SlotReset) {
        self.options.slot_reset = slot_reset;
        self.slots.set_reset_policy(slot_reset);
    }

    /// Updates the item count.
    ///
    /// A shrinking count clamps the cache, the render window and the slot map to the new bound.
    /// Nothing is clamped if the window cannot be resolved under the new count.
    pub fn set_count(&mut self, count: usize) -> Result<()> {
        if self.options.count == count {
            return Ok(());
        }
        self.update_options(|o| o.count = count)
    }

    /// Replaces the size function and drops every cached measurement.
    pub fn set_size_fn(&mut self, size_of: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Result<()> {
        self.set_size_provider(Arc::new(move |i: usize| Ok::<_, SizeError>(size_of(i))))
    }

    /// Same as [`Engine::set_size_fn`], for a provider that may fail.
    pub fn set_try_size_fn(
        &mut self,
        size_of: impl Fn(usize) -> Result<u32, SizeError> + Send + Sync + 'static,
    ) -> Result<()> {
        self.set_size_provider(Arc::new(size_of))
    }

    fn set_size_provider(&mut self, size_of: SizeFn) -> Result<()> {
        let mut options = self.options.clone();
        options.size_of = size_of;
        self.set_options(options)
    }

    /// Drops every cached measurement and measures again from scratch.
    ///
    /// Call this when item sizes changed while the size function stayed the same. If measuring
    /// fails, the old measurements are kept.
    pub fn reset_measurements(&mut self) -> Result<()> {
        let offsets = OffsetIndex::new(self.options.count, Arc::clone(&self.options.size_of));
        self.rebuild(self.options.clone(), offsets)
    }

    /// Replaces all options at once, rebuilding only what changed.
    ///
    /// A new size function (by `Arc` identity) resets the cache, a new count clamps it; any
    /// other change only resolves the window again. On failure the engine keeps its previous
    /// options, measurements, window and slots.
    pub fn set_options(&mut self, options: EngineOptions) -> Result<()> {
        options.validate()?;
        let size_unchanged = Arc::ptr_eq(&self.options.size_of, &options.size_of);
        vdebug!(
            count = options.count,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            size_unchanged,
            "Engine::set_options"
        );
        let offsets = if size_unchanged {
            let mut offsets = self.offsets.clone();
            offsets.set_count(options.count);
            offsets
        } else {
            OffsetIndex::new(options.count, Arc::clone(&options.size_of))
        };
        self.rebuild(options, offsets)
    }

    /// Clones the current options, applies `f`, then delegates to [`Engine::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut EngineOptions)) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Returns a snapshot of the scroll position and direction.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.viewport.scroll_offset,
            direction: self.viewport.direction,
        }
    }

    /// Restores a snapshot taken by [`Engine::scroll_state`], keeping its direction as is.
    pub fn restore_scroll_state(&mut self, state: ScrollState) -> Result<Option<RenderWindow>> {
        let viewport = ViewportWindow {
            scroll_offset: state.offset,
            direction: state.direction,
            ..self.viewport
        };
        self.apply(viewport, self.options.overscan)
    }

    /// Size and offset of `index` (clamped), measuring forward as needed.
    pub fn metrics(&mut self, index: usize) -> Result<ItemMetrics> {
        self.offsets.size_and_offset(index)
    }

    /// Placement of `index` (clamped) along the configured axis.
    pub fn placement(&mut self, index: usize) -> Result<Placement> {
        let index = self.offsets.clamp_index(index).ok_or(Error::Empty)?;
        let metrics = self.offsets.size_and_offset(index)?;
        Ok(placement(index, self.options.axis, metrics))
    }

    pub fn index_at_offset(&mut self, offset: u64) -> Result<usize> {
        self.offsets.find_index_at_offset(offset)
    }

    /// Approximate size of the scrollable track. Grows towards the true total as items get
    /// measured; never use it to place items.
    pub fn estimated_total_extent(&self) -> u64 {
        self.offsets
            .estimated_total_extent(self.options.estimated_size)
    }

    /// The rendered item at `index`, if `index` is inside the render window.
    pub fn rendered_item(&self, index: usize) -> Option<RenderedItem> {
        let slot = self.slots.slot_of(index)?;
        let metrics = self.offsets.cached(index)?;
        Some(RenderedItem {
            index,
            slot,
            offset: metrics.offset,
            size: metrics.size,
        })
    }

    /// Visits every rendered item in increasing index order.
    pub fn for_each_rendered_item(&self, mut f: impl FnMut(RenderedItem)) {
        for (index, slot) in self.slots.iter() {
            // The window is only committed once every index in it is measured.
            let Some(metrics) = self.offsets.cached(index) else {
                continue;
            };
            f(RenderedItem {
                index,
                slot,
                offset: metrics.offset,
                size: metrics.size,
            });
        }
    }

    /// Collects rendered items into `out` (clears `out` first).
    pub fn collect_rendered_items(&self, out: &mut Vec<RenderedItem>) {
        out.clear();
        self.for_each_rendered_item(|it| out.push(it));
    }

    /// Hands every rendered item to `renderer`.
    pub fn render(&self, renderer: &mut impl Renderer) {
        self.for_each_rendered_item(|it| renderer.render_slot(it));
    }

    fn refresh(&mut self) -> Result<Option<RenderWindow>> {
        self.apply(self.viewport, self.options.overscan)
    }

    /// Resolves the window for a new configuration against a candidate cache, and commits
    /// options, cache, viewport, slots and window together only if that succeeds.
    fn rebuild(&mut self, options: EngineOptions, mut offsets: OffsetIndex) -> Result<()> {
        let viewport = ViewportWindow::new(
            self.viewport.scroll_offset,
            self.viewport.direction,
            options.viewport_extent,
        )?;
        let window = resolve_window(&mut offsets, &viewport, options.overscan)?;
        self.slots.set_reset_policy(options.slot_reset);
        self.slots.resolve(window);
        self.options = options;
        self.offsets = offsets;
        self.viewport = viewport;
        self.window = window;
        Ok(())
    }

    // Scroll and viewport changes only ever extend the cache, so they resolve in place.
    fn apply(&mut self, viewport: ViewportWindow, overscan: usize) -> Result<Option<RenderWindow>> {
        let window = resolve_window(&mut self.offsets, &viewport, overscan)?;
        self.viewport = viewport;
        self.options.overscan = overscan;
        self.slots.resolve(window);
        self.window = window;
        Ok(window)
    }
}
