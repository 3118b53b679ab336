//! Headless windowing math for virtualized tables.
//!
//! Rendering tens of thousands of rows is only cheap if the UI materializes the handful that
//! are on screen. This crate answers the questions a table renderer asks on every scroll event:
//!
//! - which rows intersect the viewport (plus overscan), via `O(log n)` prefix-offset search
//! - how much padding to place above and below them, and how tall the whole content is
//! - what size to assume for rows that have not been painted yet, and how to fold real
//!   measurements back in
//! - which tuning parameters suit a dataset of a given size
//!
//! It is UI-agnostic. The rendering layer provides the viewport height and scroll offset and
//! reports measured row sizes after paint. For the table-level orchestration (scroll position
//! store, metrics, loading/empty states) see the `tablevirt-view` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod estimator;
mod prefix;
mod types;
mod windower;

#[cfg(test)]
mod tests;

pub use config::{ConfigOverrides, DatasetTier, VirtualizationConfig, derive_config};
pub use estimator::SizeEstimator;
pub use types::{Align, Offset, Px, Rect, VirtualItem, VisibleRange, Window};
pub use windower::Windower;
