use alloc::vec::Vec;
use core::cmp;

use crate::prefix::PrefixOffsets;
use crate::{
    Align, Offset, Px, Rect, SizeEstimator, VirtualItem, VirtualizationConfig, VisibleRange,
    Window,
};

/// Computes which rows of a long table must be rendered for a given scroll position.
///
/// The windower holds no UI objects and no scroll state of its own: callers pass the scroll
/// offset and viewport height on every query, so the same instance can answer "what would be
/// visible at offset X" without side effects.
///
/// Row sizes come from a [`SizeEstimator`]; their running sums are kept in a Fenwick tree so a
/// measurement is an `O(log n)` update and every range query is an `O(log n)` search.
#[derive(Clone, Debug)]
pub struct Windower {
    estimator: SizeEstimator,
    offsets: PrefixOffsets,
}

impl Windower {
    pub fn new(count: usize, estimate_size: Px) -> Self {
        let estimator = SizeEstimator::new(count, estimate_size);
        let offsets = PrefixOffsets::build(estimator.sizes());
        vdebug!(count, estimate_size, "Windower::new");
        Self { estimator, offsets }
    }

    pub fn from_config(count: usize, config: &VirtualizationConfig) -> Self {
        Self::new(count, config.estimate_size)
    }

    pub fn count(&self) -> usize {
        self.estimator.len()
    }

    pub fn estimator(&self) -> &SizeEstimator {
        &self.estimator
    }

    /// Current size of row `index` (measured if available, estimated otherwise).
    pub fn estimate(&self, index: usize) -> Px {
        self.estimator.estimate(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.estimator.is_measured(index)
    }

    /// Changes the row count of the current dataset. Measurements of surviving rows are kept.
    pub fn set_count(&mut self, count: usize) {
        if self.count() == count {
            return;
        }
        self.estimator.resize(count);
        self.rebuild_offsets();
    }

    /// Switches to a different dataset with `count` rows, dropping every measurement.
    pub fn reset_dataset(&mut self, count: usize) {
        self.estimator.reset();
        self.estimator.resize(count);
        self.rebuild_offsets();
    }

    /// Applies a row count and estimate in one step, rebuilding offsets at most once.
    ///
    /// With `keep_measurements` this behaves like [`Self::set_count`] followed by
    /// [`Self::set_estimate_size`]; without it, like [`Self::reset_dataset`] on a windower using
    /// the new estimate.
    pub fn reconfigure(&mut self, count: usize, estimate_size: Px, keep_measurements: bool) {
        let mut changed = !keep_measurements;
        if !keep_measurements {
            self.estimator.reset();
        }
        changed |= self.estimator.set_estimate_size(estimate_size);
        if self.count() != count {
            self.estimator.resize(count);
            changed = true;
        }
        if changed {
            self.rebuild_offsets();
        }
    }

    pub fn set_estimate_size(&mut self, estimate_size: Px) {
        if self.estimator.set_estimate_size(estimate_size) {
            self.rebuild_offsets();
        }
    }

    pub fn reset_measurements(&mut self) {
        self.estimator.reset();
        self.rebuild_offsets();
    }

    /// Records the rendered size of row `index`. Returns the size delta.
    ///
    /// This does not move any scroll position; see [`Self::resize_row`] for that.
    pub fn measure(&mut self, index: usize, size: Px) -> i64 {
        let delta = self.estimator.record(index, size);
        self.offsets.apply_delta(index, delta);
        delta
    }

    /// Records a measured element rectangle. `None` (element not attached) keeps the estimate.
    pub fn measure_rect(&mut self, index: usize, rect: Option<Rect>) -> i64 {
        let delta = self.estimator.record_rect(index, rect);
        self.offsets.apply_delta(index, delta);
        delta
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, Px)>) {
        for (index, size) in measurements {
            self.measure(index, size);
        }
    }

    /// Records a measurement and returns how far a scroll offset must move so the content under
    /// it does not jump.
    ///
    /// Rows starting above `scroll_offset` push everything below them; the returned delta is
    /// non-zero only for those.
    pub fn resize_row(&mut self, index: usize, size: Px, scroll_offset: Offset) -> i64 {
        let Some(start) = self.item_start(index) else {
            return 0;
        };
        let delta = self.measure(index, size);
        if delta != 0 && start < scroll_offset {
            vtrace!(index, delta, scroll_offset, "resize_row adjusts scroll");
            delta
        } else {
            0
        }
    }

    /// Replaces the measurement cache, e.g. when a table view is re-mounted.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (usize, Px)>) {
        self.estimator.import_measurements(entries);
        self.rebuild_offsets();
    }

    pub fn export_measurements(&self) -> Vec<(usize, Px)> {
        self.estimator.export_measurements()
    }

    /// Height of the content if every row were laid out end-to-end.
    pub fn total_size(&self) -> Offset {
        self.offsets.total()
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        (index < self.count()).then(|| VirtualItem {
            index,
            start: self.offsets.offset_of(index),
            size: self.estimator.estimate(index),
        })
    }

    pub fn item_start(&self, index: usize) -> Option<Offset> {
        (index < self.count()).then(|| self.offsets.offset_of(index))
    }

    pub fn item_size(&self, index: usize) -> Option<Px> {
        (index < self.count()).then(|| self.estimator.estimate(index))
    }

    pub fn item_end(&self, index: usize) -> Option<Offset> {
        self.item(index).map(|it| it.end())
    }

    /// Row covering `offset`. Offsets past the end map to the last row.
    pub fn index_at_offset(&self, offset: Offset) -> Option<usize> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        Some(cmp::min(self.offsets.rows_ending_at_or_before(offset), count - 1))
    }

    pub fn max_scroll_offset(&self, viewport_height: Px) -> Offset {
        self.total_size().saturating_sub(viewport_height as Offset)
    }

    pub fn clamp_scroll_offset(&self, offset: Offset, viewport_height: Px) -> Offset {
        offset.min(self.max_scroll_offset(viewport_height))
    }

    /// Rows intersecting the viewport, without overscan.
    pub fn visible_range(&self, scroll_offset: Offset, viewport_height: Px) -> VisibleRange {
        let count = self.count();
        if count == 0 || viewport_height == 0 {
            return VisibleRange::EMPTY;
        }

        let offset = self.clamp_scroll_offset(scroll_offset, viewport_height);
        let last_pixel = offset.saturating_add(viewport_height as Offset - 1);

        // First row whose end is past `offset`, last row whose start is before the viewport end.
        let start_index = self.offsets.rows_ending_at_or_before(offset);
        if start_index >= count {
            return VisibleRange::EMPTY;
        }
        let last_index = cmp::min(self.offsets.rows_ending_at_or_before(last_pixel), count - 1);

        VisibleRange {
            start_index,
            end_index: last_index + 1,
        }
    }

    /// Visible rows expanded by `overscan` on each side, clamped to the row count.
    pub fn overscanned_range(
        &self,
        scroll_offset: Offset,
        viewport_height: Px,
        overscan: usize,
    ) -> VisibleRange {
        let visible = self.visible_range(scroll_offset, viewport_height);
        if visible.is_empty() {
            return visible;
        }
        VisibleRange {
            start_index: visible.start_index.saturating_sub(overscan),
            end_index: cmp::min(self.count(), visible.end_index.saturating_add(overscan)),
        }
    }

    /// Calls `f` for every row to render, in index order, without allocating.
    pub fn for_each_item(
        &self,
        scroll_offset: Offset,
        viewport_height: Px,
        overscan: usize,
        mut f: impl FnMut(VirtualItem),
    ) {
        let range = self.overscanned_range(scroll_offset, viewport_height, overscan);
        let mut start = self.offsets.offset_of(range.start_index);
        for index in range.start_index..range.end_index {
            let size = self.estimator.estimate(index);
            f(VirtualItem { index, start, size });
            start = start.saturating_add(size as Offset);
        }
    }

    /// Computes the rows to render plus the padding above and below them.
    ///
    /// `padding_top + Σ item.size + padding_bottom == total_size()` for every input.
    pub fn compute_window(
        &self,
        scroll_offset: Offset,
        viewport_height: Px,
        overscan: usize,
    ) -> Window {
        let total_size = self.total_size();
        let range = self.overscanned_range(scroll_offset, viewport_height, overscan);

        let mut items = Vec::with_capacity(range.len());
        self.for_each_item(scroll_offset, viewport_height, overscan, |it| items.push(it));

        let padding_top = if range.is_empty() {
            0
        } else {
            self.offsets.offset_of(range.start_index)
        };
        let rendered: Offset = items.iter().map(|it| it.size as Offset).sum();
        let padding_bottom = total_size.saturating_sub(padding_top).saturating_sub(rendered);

        vtrace!(
            scroll_offset,
            viewport_height,
            overscan,
            start = range.start_index,
            end = range.end_index,
            padding_top,
            padding_bottom,
            "compute_window"
        );

        Window {
            items,
            padding_top,
            padding_bottom,
            total_size,
        }
    }

    /// Scroll offset that brings row `index` into view with the requested alignment.
    ///
    /// The index is clamped to the last row and the result to [`Self::max_scroll_offset`].
    pub fn scroll_to_index_offset(
        &self,
        index: usize,
        align: Align,
        current_offset: Offset,
        viewport_height: Px,
    ) -> Offset {
        let count = self.count();
        if count == 0 {
            return 0;
        }
        let Some(item) = self.item(index.min(count - 1)) else {
            return 0;
        };
        let view = viewport_height as Offset;

        let target = match align {
            Align::Start => item.start,
            Align::End => item.end().saturating_sub(view),
            Align::Center => item
                .start
                .saturating_add(item.size as Offset / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let view_end = current_offset.saturating_add(view);
                if item.start >= current_offset && item.end() <= view_end {
                    current_offset
                } else if item.start < current_offset {
                    item.start
                } else {
                    item.end().saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target, viewport_height)
    }

    fn rebuild_offsets(&mut self) {
        vdebug!(
            count = self.count(),
            measured = self.estimator.measured_len(),
            "rebuild_offsets"
        );
        self.offsets = PrefixOffsets::build(self.estimator.sizes());
    }
}
