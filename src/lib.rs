//! A headless windowing engine for large, variably-sized lists with recyclable slot keys.
//!
//! Given a scroll offset, a viewport extent and an overscan budget, the engine decides which
//! contiguous range of indexes to materialize, and gives every materialized index a small slot
//! id that survives scrolling. A display layer keeps one view per slot and only rebinds views
//! whose index changed, instead of destroying and rebuilding them.
//!
//! The core pieces:
//! - [`OffsetIndex`]: lazily extended size/offset cache with binary + exponential search.
//! - [`resolve_window`]: direction-aware viewport → render window resolution.
//! - [`KeyAllocator`]: slot recycling across window changes.
//! - [`Engine`]: owns all of the above for one viewport.
//!
//! It is UI-agnostic. The caller provides:
//! - item count and a size function
//! - viewport extent and scroll offsets
//! - a [`Renderer`] (or a plain closure) that places each slot's view
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod fixed;
mod offsets;
mod options;
mod placement;
mod render;
mod slots;
mod state;
mod types;
mod window;


pub use engine::Engine;
pub use error::{Error, Result, SizeError};
pub use fixed::FixedSizeWindow;
pub use offsets::{OffsetIndex, SizeFn};
pub use options::EngineOptions;
pub use placement::{Placement, placement};
pub use render::Renderer;
pub use slots::{KeyAllocator, SlotReset};
pub use state::ScrollState;
pub use types::{Axis, ItemMetrics, RenderWindow, RenderedItem, ScrollDirection, SlotId};
pub use window::{ViewportWindow, resolve_window};
