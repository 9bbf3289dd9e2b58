// Capped percent series feeding the stats graphs

use std::collections::VecDeque;

/// Samples kept per metric; wider than any realistic graph.
pub const DEFAULT_CAPACITY: usize = 200;

/// Ring buffer of percents in `[0, 100]`, oldest first.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    data: VecDeque<f64>,
    capacity: usize,
}

impl SampleSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a sample, clamped to `[0, 100]`, evicting the oldest at capacity.
    /// Non-finite values are recorded as 0.
    pub fn push(&mut self, value: f64) {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            0.0
        };
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.data.back().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }
}

impl Default for SampleSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
