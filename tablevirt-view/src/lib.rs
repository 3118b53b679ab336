//! Table-level orchestration for the `tablevirt` crate.
//!
//! `tablevirt` is the pure windowing math. This crate wraps it into what a host table needs:
//!
//! - [`VirtualTable`]: loading/empty/populated states, sticky header, the rows to paint with
//!   their absolute offsets, scroll and resize handling, post-paint measurement
//! - [`ScrollPositionStore`]: per-table scroll offsets that survive re-mounts and data refreshes
//! - [`PerformanceMonitor`]: render timings and derived metrics
//!
//! Nothing here binds to a UI framework (no DOM, ratatui or egui types). Adapters feed events in
//! and paint what comes out.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod key;
mod monitor;
mod store;
mod table;


pub use column::{CellRenderer, Column};
pub use key::TableKey;
pub use monitor::{
    ESTIMATED_VISIBLE_ITEMS, LARGE_DATASET_THRESHOLD, MemorySaving, PerformanceMetrics,
    PerformanceMonitor, RenderStart, VIRTUALIZATION_THRESHOLD,
};
pub use store::{ScrollPosition, ScrollPositionStore};
pub use table::{
    Body, Header, HeaderCell, OnScrollCallback, RenderedRow, RowKey, TableState, TableView,
    VirtualTable,
};
