//! Random number generation for layout generation
//!
//! Uses a seeded ChaCha RNG so the same seed always yields the same layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Generation random number generator
///
/// Wraps ChaCha8Rng. One instance is threaded through a whole generation
/// run; there is no ambient generator anywhere in the crate.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Only the seed is serialized; deserializing restarts the stream from it
impl Serialize for GenRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GenRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GenRng::new(seed))
    }
}

impl GenRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a value in `lo..=hi`
    ///
    /// Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Pick an index in `0..len`, or None for an empty collection
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len()).map(|i| &items[i])
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Non-positive weights are never picked. Returns None when no weight
    /// is positive.
    pub fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.rng.gen_range(0.0..total);
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            if remaining < w {
                return Some(i);
            }
            remaining -= w;
            last = Some(i);
        }
        // Float drift on the final bucket
        last
    }
}

/// Weighted selection without replacement
///
/// Each `take` removes the chosen entry, so an item is returned at most
/// once.
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    items: Vec<T>,
    weights: Vec<f64>,
}

impl<T> WeightedPool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Add an item with the given weight
    pub fn push(&mut self, item: T, weight: f64) {
        self.items.push(item);
        self.weights.push(weight);
    }

    /// Number of items still in the pool
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and return a weighted random item
    pub fn take(&mut self, rng: &mut GenRng) -> Option<T> {
        let idx = rng.pick_weighted(&self.weights)?;
        self.weights.remove(idx);
        Some(self.items.remove(idx))
    }
}

impl<T> Default for WeightedPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, f64)> for WeightedPool<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (item, weight) in iter {
            pool.push(item, weight);
        }
        pool
    }
}
