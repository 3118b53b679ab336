use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use tablevirt::{
    Align, ConfigOverrides, DatasetTier, Offset, Px, VirtualizationConfig, Window, Windower,
    derive_config,
};

use crate::key::TableKey;
use crate::{
    Column, PerformanceMetrics, PerformanceMonitor, RenderStart, ScrollPosition,
    ScrollPositionStore,
};

/// Stable identity of a rendered row, used by the rendering layer to reuse row elements.
pub type RowKey = u64;

/// Host callback invoked with `(top, left)` after every scroll event.
pub type OnScrollCallback = Arc<dyn Fn(Offset, Offset) + Send + Sync>;

/// What the table shows. Derived only from the loading flag and the row count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableState {
    /// Spinner, no header or body.
    Loading,
    /// Header only.
    Empty,
    /// Header plus the virtualized body.
    Populated,
}

impl TableState {
    pub fn from_inputs(is_loading: bool, row_count: usize) -> Self {
        if is_loading {
            Self::Loading
        } else if row_count == 0 {
            Self::Empty
        } else {
            Self::Populated
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: String,
    pub title: String,
    pub width: Option<Px>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Whether the header stays pinned to the top of the scroll container.
    pub sticky: bool,
    pub cells: Vec<HeaderCell>,
}

/// One row to paint.
#[derive(Debug)]
pub struct RenderedRow<'a, R> {
    pub key: RowKey,
    pub index: usize,
    /// Start of the row in the full virtual content.
    pub start: Offset,
    pub size: Px,
    /// Absolute position inside the body, below `padding_top` (`start - padding_top`).
    pub offset: Offset,
    pub cells: Vec<String>,
    pub record: &'a R,
}

/// The body container: sized to `total_size`, with only `rows` materialized.
#[derive(Debug)]
pub struct Body<'a, R> {
    pub total_size: Offset,
    pub padding_top: Offset,
    pub padding_bottom: Offset,
    pub rows: Vec<RenderedRow<'a, R>>,
}

#[derive(Debug)]
pub enum TableView<'a, R> {
    Loading,
    Empty { header: Header },
    Populated { header: Header, body: Body<'a, R> },
}

impl<'a, R> TableView<'a, R> {
    pub fn state(&self) -> TableState {
        match self {
            Self::Loading => TableState::Loading,
            Self::Empty { .. } => TableState::Empty,
            Self::Populated { .. } => TableState::Populated,
        }
    }

    pub fn header(&self) -> Option<&Header> {
        match self {
            Self::Loading => None,
            Self::Empty { header } | Self::Populated { header, .. } => Some(header),
        }
    }

    pub fn body(&self) -> Option<&Body<'a, R>> {
        match self {
            Self::Populated { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A virtualized table view.
///
/// The table holds no UI objects. Adapters drive it with events from their scroll container:
/// - `sync_data` whenever the row count, dataset or loading flag may have changed
/// - `on_scroll` / `set_viewport_height` on scroll and resize
/// - `view` to get the rows to paint, then `report_measurement` for each painted row
/// - `begin_paint` / `after_paint` around the paint to collect metrics
///
/// Scroll positions are persisted in a caller-owned [`ScrollPositionStore`] under this table's
/// key, so a re-mounted or refreshed table comes back where the user left it.
#[derive(Clone)]
pub struct VirtualTable<K = String> {
    key: K,
    overrides: ConfigOverrides,
    config: VirtualizationConfig,
    tier: DatasetTier,
    windower: Windower,
    dataset_id: Option<u64>,
    is_loading: bool,
    scroll: ScrollPosition,
    viewport_height: Option<Px>,
    window: Window,
    sticky_header: bool,
    on_scroll: Option<OnScrollCallback>,
    monitor: PerformanceMonitor,
}

impl<K: TableKey + Clone> VirtualTable<K> {
    pub fn new(key: K, overrides: ConfigOverrides) -> Self {
        let tier = DatasetTier::for_row_count(0);
        let config = derive_config(0, &overrides);
        Self {
            key,
            overrides,
            config,
            tier,
            windower: Windower::from_config(0, &config),
            dataset_id: None,
            is_loading: false,
            scroll: ScrollPosition::ORIGIN,
            viewport_height: None,
            window: Window::default(),
            sticky_header: true,
            on_scroll: None,
            monitor: PerformanceMonitor::default(),
        }
    }

    pub fn with_sticky_header(mut self, sticky_header: bool) -> Self {
        self.sticky_header = sticky_header;
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(Offset, Offset) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_monitor(mut self, monitor: PerformanceMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn config(&self) -> &VirtualizationConfig {
        &self.config
    }

    pub fn tier(&self) -> DatasetTier {
        self.tier
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// The window computed by the last scroll, resize, data sync or [`Self::refresh`].
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn row_count(&self) -> usize {
        self.windower.count()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn state(&self) -> TableState {
        TableState::from_inputs(self.is_loading, self.row_count())
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn total_size(&self) -> Offset {
        self.windower.total_size()
    }

    /// Viewport height: the last reported container height, else the configured one.
    pub fn viewport_height(&self) -> Px {
        self.viewport_height.unwrap_or(self.config.container_height)
    }

    /// Applies the host's current data inputs.
    ///
    /// When the row count or `dataset_id` changed, the tuning config is re-derived if the row
    /// count crossed into another [`DatasetTier`], the windower is updated (measurements are
    /// kept for the same dataset and dropped for a new one) and the stored scroll position for
    /// this table is restored. The restored (clamped) position is returned so the adapter can
    /// re-issue it to its scroll container; `None` means nothing changed.
    pub fn sync_data(
        &mut self,
        store: &ScrollPositionStore<K>,
        row_count: usize,
        dataset_id: u64,
        is_loading: bool,
    ) -> Option<ScrollPosition> {
        self.is_loading = is_loading;

        let new_dataset = self.dataset_id != Some(dataset_id);
        if !new_dataset && self.windower.count() == row_count {
            return None;
        }

        let tier = DatasetTier::for_row_count(row_count);
        if tier != self.tier {
            self.tier = tier;
            self.config = derive_config(row_count, &self.overrides);
            vdebug!(row_count, ?tier, config = ?self.config, "tier changed");
        }
        self.windower.reconfigure(row_count, self.config.estimate_size, !new_dataset);
        self.dataset_id = Some(dataset_id);

        let stored = store.restore(&self.key);
        self.scroll = ScrollPosition {
            top: self
                .windower
                .clamp_scroll_offset(stored.top, self.viewport_height()),
            left: stored.left,
        };
        self.refresh();
        vdebug!(
            row_count,
            dataset_id,
            new_dataset,
            top = self.scroll.top,
            "sync_data restored scroll"
        );
        Some(self.scroll)
    }

    /// Handles a scroll event from the container.
    ///
    /// Saves the offsets under this table's key, recomputes the window and calls the host
    /// `on_scroll` callback. Throttling is the host's business; this is `O(log n)`.
    pub fn on_scroll(
        &mut self,
        store: &mut ScrollPositionStore<K>,
        top: Offset,
        left: Offset,
    ) -> &Window {
        self.scroll = ScrollPosition { top, left };
        self.save_scroll(store);
        self.refresh();

        if self.config.enable_debug {
            vdebug!(
                top,
                left,
                first = ?self.window.first_index(),
                last = ?self.window.last_index(),
                padding_top = self.window.padding_top,
                padding_bottom = self.window.padding_bottom,
                "scroll window"
            );
        }
        if let Some(cb) = &self.on_scroll {
            cb(top, left);
        }
        &self.window
    }

    /// Handles a container resize. Zero is clamped to one pixel.
    pub fn set_viewport_height(&mut self, height: Px) {
        self.viewport_height = Some(height.max(1));
        self.refresh();
    }

    /// Recomputes the window for the current scroll position and sizes.
    ///
    /// Measurements reported since the last computation take effect here (or on the next scroll
    /// event); reporting a measurement never recomputes on its own.
    pub fn refresh(&mut self) {
        self.window = self.windower.compute_window(
            self.scroll.top,
            self.viewport_height(),
            self.config.overscan,
        );
    }

    /// Scrolls so that row `index` is placed per `align`. Returns the position to apply to the
    /// scroll container; it is also saved under this table's key.
    pub fn scroll_to_index(
        &mut self,
        store: &mut ScrollPositionStore<K>,
        index: usize,
        align: Align,
    ) -> ScrollPosition {
        self.scroll.top = self.windower.scroll_to_index_offset(
            index,
            align,
            self.scroll.top,
            self.viewport_height(),
        );
        self.save_scroll(store);
        self.refresh();
        self.scroll
    }

    /// Post-paint measurement of row `index`. `None` means the element had no rectangle.
    ///
    /// Returns the adjusted scroll position when a row above the current offset changed size,
    /// so the adapter can keep the visible content from jumping. The adjusted position is saved
    /// under this table's key so a later data refresh restores it.
    pub fn report_measurement(
        &mut self,
        store: &mut ScrollPositionStore<K>,
        index: usize,
        size: Option<Px>,
    ) -> Option<ScrollPosition> {
        let Some(size) = size else {
            vtrace!(index, "measurement without rect, keeping estimate");
            return None;
        };
        let delta = self.windower.resize_row(index, size, self.scroll.top);
        if delta == 0 {
            return None;
        }
        self.scroll.top = self.scroll.top.saturating_add_signed(delta);
        self.save_scroll(store);
        Some(self.scroll)
    }

    fn save_scroll(&self, store: &mut ScrollPositionStore<K>) {
        store.save(self.key.clone(), self.scroll.top, self.scroll.left);
    }

    pub fn begin_paint(&self, now: Duration) -> RenderStart {
        self.monitor.begin(now)
    }

    /// Records metrics for a committed paint, using the live rendered row count.
    pub fn after_paint(&mut self, start: RenderStart, painted_at: Duration) -> PerformanceMetrics {
        let total_items = self.windower.count();
        let visible_items = self.window.len();
        let metrics = self
            .monitor
            .observe(start, painted_at, total_items, visible_items);
        if self.config.enable_debug {
            vdebug!(?metrics, "after_paint");
        }
        metrics
    }

    /// Forgets this table's stored scroll position. Call when the view is discarded.
    pub fn teardown(&self, store: &mut ScrollPositionStore<K>) {
        store.clear(&self.key);
    }

    fn header<R>(&self, columns: &[Column<R>]) -> Header {
        Header {
            sticky: self.sticky_header,
            cells: columns
                .iter()
                .map(|c| HeaderCell {
                    id: c.id.clone(),
                    title: c.header.clone(),
                    width: c.width,
                })
                .collect(),
        }
    }

    /// Builds the view for `rows`, keying rows by index.
    pub fn view<'a, R>(&self, rows: &'a [R], columns: &[Column<R>]) -> TableView<'a, R> {
        self.view_with_keys(rows, columns, |index, _| index as RowKey)
    }

    /// Builds the view for `rows`, keying rows with `row_key`.
    ///
    /// Only rows of the current window are rendered. If `rows` is shorter than the synced row
    /// count, the body stops at the last available row.
    pub fn view_with_keys<'a, R>(
        &self,
        rows: &'a [R],
        columns: &[Column<R>],
        mut row_key: impl FnMut(usize, &R) -> RowKey,
    ) -> TableView<'a, R> {
        let row_count = rows.len().min(self.windower.count());
        match TableState::from_inputs(self.is_loading, row_count) {
            TableState::Loading => TableView::Loading,
            TableState::Empty => TableView::Empty {
                header: self.header(columns),
            },
            TableState::Populated => {
                let mut out = Vec::with_capacity(self.window.len());
                for item in &self.window.items {
                    let Some(record) = rows.get(item.index) else {
                        vwarn!(index = item.index, rows = rows.len(), "window past end of rows");
                        break;
                    };
                    out.push(RenderedRow {
                        key: row_key(item.index, record),
                        index: item.index,
                        start: item.start,
                        size: item.size,
                        offset: item.start.saturating_sub(self.window.padding_top),
                        cells: columns.iter().map(|c| c.render_cell(record)).collect(),
                        record,
                    });
                }
                TableView::Populated {
                    header: self.header(columns),
                    body: Body {
                        total_size: self.window.total_size,
                        padding_top: self.window.padding_top,
                        padding_bottom: self.window.padding_bottom,
                        rows: out,
                    },
                }
            }
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for VirtualTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualTable")
            .field("key", &self.key)
            .field("config", &self.config)
            .field("tier", &self.tier)
            .field("row_count", &self.windower.count())
            .field("dataset_id", &self.dataset_id)
            .field("is_loading", &self.is_loading)
            .field("scroll", &self.scroll)
            .field("viewport_height", &self.viewport_height)
            .field("sticky_header", &self.sticky_header)
            .finish_non_exhaustive()
    }
}
