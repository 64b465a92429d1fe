//! A headless sliding-window data source with row grouping for grid/table
//! UIs.
//!
//! For adapter-level utilities (boundary watching, scroll-trigger
//! coordination, re-anchoring), see the `gridsource-adapter` crate.
//!
//! This crate focuses on the data-shaping core needed to feed a recycled-row
//! table from an arbitrarily large dataset: a bounded render window that
//! grows forward/backward in page-sized steps and reports evictions, plus a
//! grouping transform that re-expresses a flat ordered dataset as group
//! header and member rows with persistent expand/collapse state.
//!
//! It is UI-agnostic. A render layer is expected to provide:
//! - dataset snapshots (static, pushed, or pulled per viewer change)
//! - grow requests when the viewport nears a window boundary
//! - row recycling that honors each emission's `removed_count`
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod expansion;
mod group;
mod map;
mod options;
mod source;
mod types;
mod window;


pub use error::ConfigError;
pub use expansion::{ExpansionChangeCallback, ExpansionSnapshot, GroupExpansion};
pub use group::{
    GroupByCallback, GroupConfig, GroupLabelCallback, GroupingSession, collect_grouped_rows,
    for_each_grouped_row,
};
pub use options::{OnUpdateCallback, WindowOptions};
pub use source::{DataInput, SnapshotSource, ViewerHandle};
pub use types::{
    GroupRow, GroupValue, GroupedRow, GroupedRowRef, LoadDirection, LoadingState, WindowUpdate,
};
pub use window::WindowedBuffer;
