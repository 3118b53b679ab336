use alloc::collections::VecDeque;
use core::fmt;
use core::time::Duration;

/// Tables above this many rows are reported as large.
pub const LARGE_DATASET_THRESHOLD: usize = 1_000;

/// Tables above this many rows are worth virtualizing.
pub const VIRTUALIZATION_THRESHOLD: usize = 100;

/// Rough number of rows on screen, used when the live rendered count is not known.
pub const ESTIMATED_VISIBLE_ITEMS: usize = 20;

/// Share of rows that virtualization avoids materializing, in whole percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemorySaving(u8);

impl MemorySaving {
    pub const NONE: Self = Self(0);

    /// `round((total - visible) / total * 100)`, or `0` when nothing is saved.
    pub fn between(total_items: usize, visible_items: usize) -> Self {
        if total_items == 0 || visible_items >= total_items {
            return Self::NONE;
        }
        let saved = (total_items - visible_items) as u128;
        let total = total_items as u128;
        // Rounds half up in integer arithmetic.
        let percent = (saved * 200 + total) / (total * 2);
        Self(percent.min(100) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for MemorySaving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Descriptive numbers about one render of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceMetrics {
    pub total_items: usize,
    pub visible_items: usize,
    pub is_large_dataset: bool,
    pub recommend_virtualization: bool,
    pub estimated_memory_saving: MemorySaving,
    pub render_time: Duration,
}

impl PerformanceMetrics {
    pub fn compute(total_items: usize, visible_items: usize, render_time: Duration) -> Self {
        let recommend_virtualization = total_items > VIRTUALIZATION_THRESHOLD;
        let estimated_memory_saving = if recommend_virtualization {
            MemorySaving::between(total_items, visible_items)
        } else {
            MemorySaving::NONE
        };
        Self {
            total_items,
            visible_items,
            is_large_dataset: total_items > LARGE_DATASET_THRESHOLD,
            recommend_virtualization,
            estimated_memory_saving,
            render_time,
        }
    }

    /// Metrics using the fixed [`ESTIMATED_VISIBLE_ITEMS`] guess instead of a live row count.
    ///
    /// This is an approximation for callers that have no rendered window at hand.
    pub fn estimate(total_items: usize, render_time: Duration) -> Self {
        Self::compute(total_items, ESTIMATED_VISIBLE_ITEMS, render_time)
    }
}

/// Opaque marker taken before the state update that leads to a paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStart {
    at: Duration,
}

impl RenderStart {
    pub fn at(&self) -> Duration {
        self.at
    }
}

/// Records render timings and keeps a bounded history of derived metrics.
///
/// Timing is two-phase: [`Self::begin`] is called before the update, [`Self::observe`] once the
/// paint has committed. Timestamps come from the host (any monotonic clock, as a `Duration`
/// since an arbitrary epoch), so the monitor never reads a clock itself.
#[derive(Clone, Debug)]
pub struct PerformanceMonitor {
    history: VecDeque<PerformanceMetrics>,
    capacity: usize,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl PerformanceMonitor {
    pub const DEFAULT_CAPACITY: usize = 60;

    /// Creates a monitor that remembers the last `capacity` observations (`0` keeps none).
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn begin(&self, now: Duration) -> RenderStart {
        RenderStart { at: now }
    }

    /// Derives metrics for a paint that started at `start` and committed at `painted_at`.
    pub fn observe(
        &mut self,
        start: RenderStart,
        painted_at: Duration,
        total_items: usize,
        visible_items: usize,
    ) -> PerformanceMetrics {
        let render_time = painted_at.saturating_sub(start.at);
        let metrics = PerformanceMetrics::compute(total_items, visible_items, render_time);
        vtrace!(
            total_items,
            visible_items,
            render_time_us = render_time.as_micros() as u64,
            saving = metrics.estimated_memory_saving.percent(),
            "observe"
        );

        if self.capacity > 0 {
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(metrics);
        }
        metrics
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Observations from oldest to newest.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &PerformanceMetrics> + '_ {
        self.history.iter()
    }

    pub fn latest(&self) -> Option<&PerformanceMetrics> {
        self.history.back()
    }

    pub fn average_render_time(&self) -> Option<Duration> {
        if self.history.is_empty() {
            return None;
        }
        let sum: Duration = self.history.iter().map(|m| m.render_time).sum();
        Some(sum / self.history.len() as u32)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
