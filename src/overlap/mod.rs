//! Overlap module: ghost-cell sets for distributed stencil computation.
//!
//! This module re-exports the [`overlap`] submodule.

pub mod overlap;

pub use overlap::{CellOverlap, OverlapConfig, OverlapSubject, add_overlap_layer, build_overlap};
