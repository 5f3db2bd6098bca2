#![forbid(unsafe_code)]

//! LRU cache of text layout results.
//!
//! Auto-resize convergence measures the same strings repeatedly at a handful
//! of sizes, and every later render pass repeats the final one. Entries are
//! keyed by a 64-bit FxHash of everything that affects the layout.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use hketa_core::{Constraints, Density};
use lru::LruCache;
use rustc_hash::FxHasher;

use crate::measure::{TextLayoutResult, TextStyle};

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache mapping measurement inputs to [`TextLayoutResult`]s.
///
/// Not thread-safe; each measurer owns its own.
#[derive(Debug)]
pub struct MeasureCache {
    cache: LruCache<u64, TextLayoutResult>,
    hits: u64,
    misses: u64,
}

impl MeasureCache {
    /// Create a cache holding up to `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached result for these inputs, or `compute()` stored under them.
    pub fn get_or_compute<F>(
        &mut self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
        compute: F,
    ) -> TextLayoutResult
    where
        F: FnOnce() -> TextLayoutResult,
    {
        let key = measure_key(text, style, constraints, density);
        if let Some(result) = self.cache.get(&key) {
            self.hits += 1;
            return *result;
        }

        self.misses += 1;
        let result = compute();
        self.cache.put(key, result);
        result
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn measure_key(text: &str, style: &TextStyle, constraints: Constraints, density: Density) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    style.font_size.to_bits().hash(&mut hasher);
    style.max_lines.hash(&mut hasher);
    style.soft_wrap.hash(&mut hasher);
    constraints.hash(&mut hasher);
    density.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hketa_core::{Size, Sp};

    fn result(width: u32) -> TextLayoutResult {
        TextLayoutResult {
            size: Size::new(width, 10),
            line_count: 1,
            ..TextLayoutResult::default()
        }
    }

    #[test]
    fn second_lookup_hits() {
        let mut cache = MeasureCache::new(8);
        let style = TextStyle::new(Sp(12.0));
        let c = Constraints::new(0, 100, 0, 100);
        let first = cache.get_or_compute("Hello", &style, c, Density::ONE, || result(60));
        let second = cache.get_or_compute("Hello", &style, c, Density::ONE, || result(999));
        assert_eq!(first, second);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn every_input_is_part_of_the_key() {
        let mut cache = MeasureCache::new(16);
        let style = TextStyle::new(Sp(12.0));
        let c = Constraints::new(0, 100, 0, 100);
        cache.get_or_compute("Hello", &style, c, Density::ONE, || result(1));
        cache.get_or_compute("Hello", &TextStyle::new(Sp(11.0)), c, Density::ONE, || result(2));
        cache.get_or_compute("Hello", &style.max_lines(1), c, Density::ONE, || result(3));
        cache.get_or_compute("Hello", &style.soft_wrap(false), c, Density::ONE, || result(4));
        cache.get_or_compute("Hello", &style, Constraints::new(0, 90, 0, 100), Density::ONE, || result(5));
        cache.get_or_compute("Hello", &style, c, Density::new(2.0, 1.0), || result(6));
        cache.get_or_compute("Hallo", &style, c, Density::ONE, || result(7));
        assert_eq!(cache.stats().misses, 7);
        assert_eq!(cache.len(), 7);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = MeasureCache::new(2);
        let style = TextStyle::new(Sp(12.0));
        let c = Constraints::UNBOUNDED;
        cache.get_or_compute("a", &style, c, Density::ONE, || result(1));
        cache.get_or_compute("b", &style, c, Density::ONE, || result(2));
        cache.get_or_compute("a", &style, c, Density::ONE, || result(0));
        cache.get_or_compute("c", &style, c, Density::ONE, || result(3));
        // "b" was evicted, "a" survived.
        assert_eq!(cache.get_or_compute("a", &style, c, Density::ONE, || result(0)), result(1));
        assert_eq!(cache.get_or_compute("b", &style, c, Density::ONE, || result(9)), result(9));
    }

    #[test]
    fn zero_capacity_holds_one() {
        let cache = MeasureCache::new(0);
        assert_eq!(cache.stats().capacity, 1);
        assert!(cache.is_empty());
    }
}
