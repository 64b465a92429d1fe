//! Adapter utilities for the `gridsource` crate.
//!
//! The `gridsource` crate is UI-agnostic and focuses on the core window and
//! grouping state. This crate provides small, framework-neutral helpers
//! commonly needed by render-layer adapters:
//!
//! - Boundary watching (near-start/near-end proximity with scroll gating)
//! - Scroll-trigger coordination (at most one pull in flight)
//! - Re-anchoring math for eviction-corrected scroll restoration
//!
//! This crate is intentionally framework-agnostic: no DOM, no intersection
//! observers, no widget-toolkit bindings. The host wires real viewport
//! events into [`ScrollCoordinator`] and applies the returned
//! [`ScrollAnchorTarget`] after its next layout pass.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod boundary;
mod coordinator;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchorTarget, reanchor_after_update};
pub use boundary::{BoundaryHits, BoundaryThresholds, BoundaryWatcher};
pub use coordinator::{LoadMoreCallback, LoadingCallback, PullState, ScrollCoordinator};
