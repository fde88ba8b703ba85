//! Stack usage statistics
//!
//! Since overflow is fatal and the buffers never grow, the useful question
//! when provisioning a [`StackConfig`](crate::config::StackConfig) is how
//! close a workload came to the ceiling. Each stack keeps high-water marks
//! for both buffers and for the logical value count.
//!
//! Updates are plain stores on the owning stack (no atomics): a stack is
//! only ever touched by one execution context.

/// High-water marks, updated after every growing operation
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HighWater {
    data_bytes: usize,
    shape_nodes: usize,
    values: usize,
}

impl HighWater {
    #[inline]
    pub(crate) fn observe(&mut self, data_bytes: usize, shape_nodes: usize, values: usize) {
        self.data_bytes = self.data_bytes.max(data_bytes);
        self.shape_nodes = self.shape_nodes.max(shape_nodes);
        self.values = self.values.max(values);
    }
}

/// Point-in-time usage snapshot of one stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUsage {
    pub data_bytes: usize,
    pub shape_nodes: usize,
    pub values: usize,
    pub peak_data_bytes: usize,
    pub peak_shape_nodes: usize,
    pub peak_values: usize,
    pub data_capacity: usize,
    pub shape_capacity: usize,
}

impl StackUsage {
    pub(crate) fn new(
        current: (usize, usize, usize),
        peak: &HighWater,
        capacity: (usize, usize),
    ) -> Self {
        let (data_bytes, shape_nodes, values) = current;
        let (data_capacity, shape_capacity) = capacity;
        StackUsage {
            data_bytes,
            shape_nodes,
            values,
            peak_data_bytes: peak.data_bytes,
            peak_shape_nodes: peak.shape_nodes,
            peak_values: peak.values,
            data_capacity,
            shape_capacity,
        }
    }

    /// Fraction of the tighter buffer used at peak, in `0.0..=1.0`
    pub fn peak_fill(&self) -> f64 {
        let ratio = |used: usize, cap: usize| {
            if cap == 0 {
                if used == 0 { 0.0 } else { 1.0 }
            } else {
                used as f64 / cap as f64
            }
        };
        ratio(self.peak_data_bytes, self.data_capacity)
            .max(ratio(self.peak_shape_nodes, self.shape_capacity))
    }
}
