//! Context-scoped attribute propagation.
//!
//! This module provides:
//! - An immutable context chain with typed, process-unique slots
//! - The copy-on-write attribute store bound into that chain

mod attrs;
mod chain;

pub use attrs::{AttrMap, LogAttrs};
pub use chain::{Context, Slot};
