//! Partitioning errors for grid-partition

use thiserror::Error;

/// Errors from the Cartesian-bucket partitioner.
///
/// Every variant describes a rejected request; nothing is retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// More buckets were requested along an axis than the grid has cells there.
    #[error("In direction {axis} requested splitting {split} size {extent}")]
    InvalidConfiguration {
        axis: usize,
        split: usize,
        extent: usize,
    },
    /// A split count of zero leaves the axis without any bucket.
    #[error("In direction {axis} requested splitting 0")]
    ZeroSplit { axis: usize },
}
