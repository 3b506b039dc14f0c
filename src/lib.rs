//! A headless windowing core for very large, variable-height row lists.
//!
//! Given a row count, per-row height lookups, and a scroll anchor (which row
//! sits at the top or bottom of the viewport), this crate computes which rows
//! must be materialized, their pixel offsets, the current/maximum scroll
//! position, and a stable reusable slot id per row so a rendering layer can
//! reuse already-allocated visual objects instead of recreating them on every
//! scroll tick.
//!
//! It is UI-agnostic. A table/list layer is expected to provide:
//! - viewport height and buffer sizing
//! - the row count
//! - per-row (and sub-row) height lookups
//!
//! All state is threaded explicitly: [`WindowState::compute`] consumes the
//! previous snapshot and returns the next one, so no holder of an old snapshot
//! ever observes a half-updated offset tree.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod map;
mod offset_tree;
mod options;
mod slots;
mod types;
mod window;


pub use offset_tree::OffsetTree;
pub use options::WindowOptions;
pub use slots::SlotAllocator;
pub use types::{RowRange, ScrollAnchor, WindowRow};
pub use window::WindowState;
