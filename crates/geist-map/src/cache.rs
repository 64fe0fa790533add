//! Epoch-based color cache keyed by column.
//!
//! The whole map is dropped once the current epoch is older than the
//! invalidation interval; there is no per-entry expiry and no capacity bound.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use geist_blocks::Rgb;
use geist_world::ColumnPos;
use hashbrown::HashMap;

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock starting at zero when created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub clears: u64,
    pub entries: usize,
}

pub struct ColorCache {
    colors: HashMap<ColumnPos, Rgb>,
    epoch_start: u64,
    interval_ms: u64,
    clock: Box<dyn Clock>,
    hits: u64,
    misses: u64,
    clears: u64,
}

impl ColorCache {
    pub fn new(interval_ms: u64, clock: Box<dyn Clock>) -> Self {
        let epoch_start = clock.now_ms();
        Self {
            colors: HashMap::new(),
            epoch_start,
            interval_ms,
            clock,
            hits: 0,
            misses: 0,
            clears: 0,
        }
    }

    /// Cached color for `column`, calling `resolve` on a miss.
    pub fn color_for<F>(&mut self, column: ColumnPos, resolve: F) -> Rgb
    where
        F: FnOnce(ColumnPos) -> Rgb,
    {
        self.refresh_epoch();
        if let Some(&c) = self.colors.get(&column) {
            self.hits += 1;
            return c;
        }
        self.misses += 1;
        let c = resolve(column);
        self.colors.insert(column, c);
        c
    }

    fn refresh_epoch(&mut self) {
        let now = self.clock.now_ms();
        // Strictly greater: an entry stays valid for exactly `interval_ms`.
        if now.saturating_sub(self.epoch_start) > self.interval_ms {
            log::debug!(
                "minimap cache: epoch expired after {} ms, dropping {} colors",
                now - self.epoch_start,
                self.colors.len()
            );
            self.colors.clear();
            self.epoch_start = now;
            self.clears += 1;
        }
    }

    /// Drops every color and starts a new epoch now.
    pub fn clear(&mut self) {
        self.colors.clear();
        self.epoch_start = self.clock.now_ms();
        self.clears += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn epoch_start(&self) -> u64 {
        self.epoch_start
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            clears: self.clears,
            entries: self.colors.len(),
        }
    }
}
