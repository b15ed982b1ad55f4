//! Order-independent reducers
//!
//! Floating-point addition is not associative, so summing the same values in a
//! different order can change the last bits of the result. [`SumAccumulator`]
//! keeps the raw values and reduces them in a canonical (sorted) order with
//! compensated summation: any permutation of the input yields the same bits.

use std::collections::HashMap;
use std::hash::Hash;

/// Collects values and sums them in canonical order
#[derive(Debug, Clone, Default)]
pub struct SumAccumulator {
    values: Vec<f64>,
}

impl SumAccumulator {
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn sum(mut self) -> f64 {
        self.values.sort_by(f64::total_cmp);
        neumaier_sum(&self.values)
    }

    /// Arithmetic mean, `None` when nothing was pushed
    pub fn mean(self) -> Option<f64> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        Some(self.sum() / count as f64)
    }
}

impl Extend<f64> for SumAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl FromIterator<f64> for SumAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Kahan-Babuska-Neumaier summation
pub fn neumaier_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;

    for &value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}

/// Round half away from zero to two decimals; never yields `-0.0`
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Occurrence counter that remembers the order keys were first seen in
#[derive(Debug, Clone)]
pub struct FirstSeenCounter<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K> Default for FirstSeenCounter<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FirstSeenCounter<K> {
    pub fn add(&mut self, key: K) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, 1);
            },
        }
    }

    /// Keys by descending count; equal counts keep first-seen order
    pub fn ranked(self) -> Vec<(K, usize)> {
        let Self { order, mut counts } = self;
        let mut ranked: Vec<(K, usize)> = order
            .into_iter()
            .map(|key| {
                let count = counts.remove(&key).unwrap_or(0);
                (key, count)
            })
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn most_common(self) -> Option<(K, usize)> {
        self.ranked().into_iter().next()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FirstSeenCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::default();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}
