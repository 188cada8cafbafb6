//! MeshError: error type for grid construction and invariant checks.
//!
//! Partitioning failures have their own [`PartitionError`]; it converts into
//! `MeshError` so drivers can use a single error type end to end.

use crate::partitioning::error::PartitionError;
use thiserror::Error;

/// Unified error type for grid-partition operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A structured grid was requested with a zero extent along some axis.
    #[error("Grid extent must be non-zero along every axis, got {extent:?}")]
    ZeroExtent { extent: [usize; 3] },
    /// The active-cell mask does not cover the logical box exactly.
    #[error("Active mask has {found} entries, expected {expected} (nx*ny*nz)")]
    ActiveMaskLength { expected: usize, found: usize },
    /// A partition assignment or overlap map broke one of its invariants.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Partitioning was rejected.
    #[error(transparent)]
    Partition(#[from] PartitionError),
}
