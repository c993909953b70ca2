use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use crate::error::{Error, Result, SizeError};
use crate::ItemMetrics;

/// A fallible size provider: `index -> size` along the scroll axis.
///
/// Sizes must be positive and stable per index until the cache is reset.
pub type SizeFn = Arc<dyn Fn(usize) -> Result<u32, SizeError> + Send + Sync>;

/// Incrementally extended cache of item sizes and cumulative offsets.
///
/// Items are measured lazily, strictly in index order: asking for index `i` measures every
/// unmeasured index up to `i`. Every index `<= last_measured_index()` therefore has an entry, and
/// `offset(i + 1) == offset(i) + size(i)` holds across the measured prefix.
#[derive(Clone)]
pub struct OffsetIndex {
    count: usize,
    size_of: SizeFn,
    entries: Vec<ItemMetrics>,
}

impl OffsetIndex {
    pub fn new(count: usize, size_of: SizeFn) -> Self {
        Self {
            count,
            size_of,
            entries: Vec::new(),
        }
    }

    /// Creates an index over an infallible size function.
    pub fn from_fn(count: usize, size_of: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::new(count, Arc::new(move |i: usize| Ok::<_, SizeError>(size_of(i))))
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn size_fn(&self) -> &SizeFn {
        &self.size_of
    }

    /// Highest index with a cached entry, or `None` when nothing is measured yet.
    pub fn last_measured_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    pub fn measured_len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the cached entry for `index` without measuring anything.
    pub fn cached(&self, index: usize) -> Option<ItemMetrics> {
        self.entries.get(index).copied()
    }

    /// Drops every cached entry.
    pub fn reset(&mut self) {
        vdebug!(measured = self.entries.len(), "OffsetIndex::reset");
        self.entries.clear();
    }

    /// Updates the item count.
    ///
    /// Sizes are stable per index, so growing keeps the measured prefix. Shrinking clamps it to
    /// the new bound.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        vdebug!(from = self.count, to = count, "OffsetIndex::set_count");
        self.count = count;
        if self.entries.len() > count {
            self.entries.truncate(count);
        }
    }

    /// Replaces the size function. A different function (by identity) resets the cache.
    pub fn set_size_fn(&mut self, size_of: SizeFn) {
        if Arc::ptr_eq(&self.size_of, &size_of) {
            return;
        }
        self.size_of = size_of;
        self.reset();
    }

    /// Clamps `index` into `[0, count - 1]`.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        (self.count > 0).then(|| cmp::min(index, self.count - 1))
    }

    /// Returns the size and offset of `index`, measuring forward as needed.
    ///
    /// Out-of-range indexes are clamped. If the size provider fails, every entry measured before
    /// the failing index is kept and nothing at or past it is.
    pub fn size_and_offset(&mut self, index: usize) -> Result<ItemMetrics> {
        let index = self.clamp_index(index).ok_or(Error::Empty)?;
        if let Some(m) = self.entries.get(index) {
            return Ok(*m);
        }
        self.extend_to(index)?;
        Ok(self.entries[index])
    }

    fn extend_to(&mut self, index: usize) -> Result<()> {
        let mut offset = self.entries.last().map_or(0, ItemMetrics::end);
        self.entries
            .reserve(index.saturating_add(1).saturating_sub(self.entries.len()));

        for i in self.entries.len()..=index {
            let size = match (self.size_of)(i) {
                Ok(0) => {
                    vwarn!(index = i, "size provider returned zero");
                    return Err(Error::ZeroSize { index: i });
                }
                Ok(size) => size,
                Err(source) => {
                    vwarn!(index = i, error = source.message(), "size provider failed");
                    return Err(Error::SizeProvider { index: i, source });
                }
            };
            self.entries.push(ItemMetrics { size, offset });
            offset = offset.saturating_add(size as u64);
        }
        Ok(())
    }

    /// Returns the index whose `[offset, offset + size)` range contains `target`, or the last
    /// index when `target` is past the end.
    ///
    /// Targets inside the measured prefix are answered by binary search over the cache. Targets
    /// past it are bracketed by an exponential probe from the last measured index first, which
    /// measures only as far as the answer requires.
    pub fn find_index_at_offset(&mut self, target: u64) -> Result<usize> {
        if self.count == 0 {
            return Err(Error::Empty);
        }
        match self.last_measured_index() {
            Some(last) if self.entries[last].offset >= target => {
                let consumed = self.entries[..=last].partition_point(|m| m.offset <= target);
                Ok(consumed.saturating_sub(1))
            }
            last => self.exponential_search(last.unwrap_or(0), target),
        }
    }

    fn exponential_search(&mut self, from: usize, target: u64) -> Result<usize> {
        let last = self.count - 1;
        let mut interval = 1usize;
        loop {
            let probe = from.saturating_add(interval);
            if probe > last || self.size_and_offset(probe)?.offset >= target {
                break;
            }
            interval = interval.saturating_mul(2);
        }

        let start = from + interval / 2;
        let end = cmp::min(last, from.saturating_add(interval));
        vtrace!(from, start, end, offset = target, "OffsetIndex::exponential_search");
        self.binary_search(start, end, target)
    }

    /// Greatest index in `[start, end]` whose offset is `<= target`, clamped to `start`.
    fn binary_search(&mut self, start: usize, end: usize, target: u64) -> Result<usize> {
        let mut lo = start;
        let mut hi = end + 1;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let offset = self.size_and_offset(mid)?.offset;
            if offset == target {
                return Ok(mid);
            }
            if offset < target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(if lo > start { lo - 1 } else { start })
    }

    /// Approximate total extent used to size a scroll track.
    ///
    /// Measured items contribute their real sizes, the rest contribute `estimated_size` each.
    /// Never use this to place items.
    pub fn estimated_total_extent(&self, estimated_size: u32) -> u64 {
        let estimated_size = estimated_size as u64;
        match self.entries.last() {
            None => (self.count as u64).saturating_mul(estimated_size),
            Some(last) => {
                let remaining = self.count.saturating_sub(self.entries.len()) as u64;
                last.end()
                    .saturating_add(remaining.saturating_mul(estimated_size))
            }
        }
    }
}

impl core::fmt::Debug for OffsetIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OffsetIndex")
            .field("count", &self.count)
            .field("last_measured_index", &self.last_measured_index())
            .finish_non_exhaustive()
    }
}
