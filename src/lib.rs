#![cfg_attr(docsrs, feature(doc_cfg))]
//! # grid-partition
//!
//! grid-partition splits the leaf cells of a logically Cartesian 3-D grid into
//! sub-domains and computes the ghost (overlap) cells every sub-domain needs
//! for stencil computations. It is a one-shot preprocessing step ahead of a
//! distributed solver.
//!
//! ## Features
//! - Cartesian bucketing of the logical `(i, j, k)` box with balanced bucket sizes
//! - Compaction of empty buckets (inactive cells, sub-domain grids)
//! - Connectivity repair: disconnected buckets are split into separate partitions,
//!   using either a bounded recursive or an explicit-stack flood fill
//! - Multi-layer overlap construction across faces and corners
//! - Partition metrics and per-partition ownership views
//!
//! ## Determinism
//!
//! For identical grid, split and leaf order, the partition assignment and the
//! overlap map are bit-for-bit reproducible. Overlap sets are `BTreeSet`s, so
//! their iteration order is fixed as well.
//!
//! ## Usage
//! ```
//! use grid_partition::prelude::*;
//!
//! let grid = StructuredGrid::cartesian_2d(4, 4).unwrap();
//! let parts = partition(&grid, &PartitionerConfig::with_split([2, 2, 1])).unwrap();
//! assert_eq!(parts.num_parts, 4);
//! let overlap = add_overlap_layer(&grid, &parts.cell_part, OverlapSubject::All, 1);
//! assert_eq!(overlap.len(), 16);
//! ```
//!
//! Enable the `rayon` feature to compute initial buckets in parallel, and
//! `strict-invariants` to keep invariant checks in release builds.

pub mod debug_invariants;
pub mod mesh_error;
pub mod mesh_generation;
pub mod overlap;
pub mod partitioning;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::StructuredGrid;
    pub use crate::overlap::{
        CellOverlap, OverlapConfig, OverlapSubject, add_overlap_layer, build_overlap,
    };
    pub use crate::partitioning::{
        FloodFill, PartitionAssignment, PartitionError, PartitionerConfig,
        ensure_connected_partitions, partition,
    };
    pub use crate::topology::{CartesianGrid, CellIndex, CellOwnership, OwnershipEntry};
}
