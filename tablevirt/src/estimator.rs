use alloc::vec::Vec;

use crate::{Px, Rect};

/// Per-row size source for the [`crate::Windower`].
///
/// Every row starts at the configured estimate. Once the rendering layer reports a real
/// measurement for a row, that value is authoritative for the row's index until the dataset is
/// replaced ([`SizeEstimator::reset`]) or the estimator is resized past it.
///
/// A measurement of `0` (or a missing element rectangle) is treated as "not measured yet": the
/// row keeps its current size. This keeps every row at least one pixel tall, which the range
/// search relies on.
#[derive(Clone, Debug)]
pub struct SizeEstimator {
    estimate_size: Px,
    sizes: Vec<Px>,
    measured: Vec<bool>,
    measured_count: usize,
}

impl SizeEstimator {
    /// Creates an estimator for `count` rows. An `estimate_size` of `0` is clamped to `1`.
    pub fn new(count: usize, estimate_size: Px) -> Self {
        let estimate_size = estimate_size.max(1);
        Self {
            estimate_size,
            sizes: alloc::vec![estimate_size; count],
            measured: alloc::vec![false; count],
            measured_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn estimate_size(&self) -> Px {
        self.estimate_size
    }

    /// Current size of row `index`: the measurement if one was recorded, the estimate otherwise.
    pub fn estimate(&self, index: usize) -> Px {
        self.sizes.get(index).copied().unwrap_or(self.estimate_size)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Number of rows with a recorded measurement.
    pub fn measured_len(&self) -> usize {
        self.measured_count
    }

    /// Records the real size of row `index` and returns `new - old`.
    ///
    /// Out-of-range indexes and zero sizes are ignored and return `0`.
    pub fn record(&mut self, index: usize, size: Px) -> i64 {
        if index >= self.sizes.len() {
            vwarn!(index, count = self.sizes.len(), "measurement for out-of-range row");
            return 0;
        }
        if size == 0 {
            vtrace!(index, "zero-size measurement, keeping current size");
            return 0;
        }
        if !self.measured[index] {
            self.measured[index] = true;
            self.measured_count += 1;
        }
        let cur = self.sizes[index];
        self.sizes[index] = size;
        size as i64 - cur as i64
    }

    /// Same as [`Self::record`], using the main-axis size of a measured rectangle.
    ///
    /// `None` means the element was not attached yet; the row keeps its current size.
    pub fn record_rect(&mut self, index: usize, rect: Option<Rect>) -> i64 {
        match rect {
            Some(rect) => self.record(index, rect.main),
            None => 0,
        }
    }

    /// Changes the estimate used for unmeasured rows. Returns `true` if any size changed.
    pub fn set_estimate_size(&mut self, estimate_size: Px) -> bool {
        let estimate_size = estimate_size.max(1);
        if self.estimate_size == estimate_size {
            return false;
        }
        self.estimate_size = estimate_size;
        for (size, &measured) in self.sizes.iter_mut().zip(self.measured.iter()) {
            if !measured {
                *size = estimate_size;
            }
        }
        true
    }

    /// Grows or shrinks to `count` rows. Surviving rows keep their measurements.
    pub fn resize(&mut self, count: usize) {
        let cur = self.sizes.len();
        if count < cur {
            let dropped = self.measured[count..].iter().filter(|&&m| m).count();
            self.measured_count -= dropped;
        }
        self.sizes.resize(count, self.estimate_size);
        self.measured.resize(count, false);
    }

    /// Forgets every measurement. Used when the dataset identity changes.
    pub fn reset(&mut self) {
        self.sizes.fill(self.estimate_size);
        self.measured.fill(false);
        self.measured_count = 0;
    }

    /// Exports recorded measurements as `(index, size)` pairs, ordered by index.
    pub fn export_measurements(&self) -> Vec<(usize, Px)> {
        let mut out = Vec::with_capacity(self.measured_count);
        for (i, (&size, &measured)) in self.sizes.iter().zip(self.measured.iter()).enumerate() {
            if measured {
                out.push((i, size));
            }
        }
        out
    }

    /// Replaces all measurements with `entries`. Out-of-range and zero entries are skipped.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (usize, Px)>) {
        self.reset();
        for (index, size) in entries {
            self.record(index, size);
        }
    }

    pub(crate) fn sizes(&self) -> &[Px] {
        &self.sizes
    }
}
