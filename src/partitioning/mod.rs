//! Entry-point for Cartesian-bucket partitioning.
//!
//! [`partition`] splits the logical box of a grid into `sx * sy * sz` buckets,
//! drops buckets that received no cell, and optionally splits buckets that are
//! not face-connected (see [`connectivity`]).

pub mod bucket;
pub mod connectivity;
pub mod error;
pub mod index;
pub mod metrics;

#[cfg(test)]
mod tests;

pub use self::connectivity::{FloodFill, ensure_connected_partitions};
pub use self::error::PartitionError;
pub use self::metrics::*;

use serde::{Deserialize, Serialize};

use self::bucket::{BucketRenumbering, initial_partition};
use self::index::IndexToIjk;
use crate::topology::grid::CartesianGrid;

pub type PartitionId = usize;

/// Options for [`partition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionerConfig {
    /// Requested number of buckets along each logical axis.
    pub split: [usize; 3],
    /// Split buckets whose cells are not face-connected into separate partitions.
    pub ensure_connectivity: bool,
    /// Traversal used for the connectivity repair.
    pub flood_fill: FloodFill,
}

impl Default for PartitionerConfig {
    fn default() -> Self {
        Self {
            split: [1, 1, 1],
            ensure_connectivity: true,
            flood_fill: FloodFill::default(),
        }
    }
}

impl PartitionerConfig {
    /// Config with the given split and default connectivity handling.
    pub fn with_split(split: [usize; 3]) -> Self {
        Self {
            split,
            ..Default::default()
        }
    }

    /// Number of buckets requested before empty ones are dropped.
    pub fn num_buckets(&self) -> usize {
        self.split.iter().product()
    }

    /// Check the split against a logical extent.
    pub fn validate(&self, extent: [usize; 3]) -> Result<(), PartitionError> {
        for (axis, (&split, &extent)) in self.split.iter().zip(extent.iter()).enumerate() {
            if split == 0 {
                return Err(PartitionError::ZeroSplit { axis });
            }
            if split > extent {
                return Err(PartitionError::InvalidConfiguration {
                    axis,
                    split,
                    extent,
                });
            }
        }
        Ok(())
    }
}

/// Cell to partition map indexed by leaf cell index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionAssignment {
    /// Number of partition ids in use; every entry of `cell_part` is below it.
    pub num_parts: usize,
    /// Partition of each leaf cell.
    pub cell_part: Vec<PartitionId>,
}

impl PartitionAssignment {
    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.cell_part.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_part.is_empty()
    }

    /// Partition of `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is out of range.
    pub fn part_of(&self, cell: usize) -> PartitionId {
        self.cell_part[cell]
    }

    /// Cells owned by `part`, in leaf order.
    pub fn cells_of(&self, part: PartitionId) -> impl Iterator<Item = usize> + '_ {
        self.cell_part
            .iter()
            .enumerate()
            .filter(move |&(_, &p)| p == part)
            .map(|(c, _)| c)
    }
}

#[cfg(not(feature = "rayon"))]
fn initial_buckets<G: CartesianGrid>(grid: &G, split: [usize; 3]) -> Vec<usize> {
    let extent = grid.logical_extent();
    let ijk = IndexToIjk::new(extent);
    (0..grid.cell_count())
        .map(|c| initial_partition(ijk.ijk(grid.logical_index(c)), extent, split))
        .collect()
}

#[cfg(feature = "rayon")]
fn initial_buckets<G: CartesianGrid>(grid: &G, split: [usize; 3]) -> Vec<usize> {
    use rayon::prelude::*;
    let extent = grid.logical_extent();
    let ijk = IndexToIjk::new(extent);
    let logical: Vec<usize> = (0..grid.cell_count())
        .map(|c| grid.logical_index(c))
        .collect();
    logical
        .par_iter()
        .map(|&idx| initial_partition(ijk.ijk(idx), extent, split))
        .collect()
}

/// Partition the leaf cells of `grid` into Cartesian buckets.
///
/// # Arguments
/// * `grid` - The grid to partition.
/// * `cfg` - Split counts and connectivity handling.
///
/// # Returns
/// * `Ok(PartitionAssignment)` with contiguous ids starting at 0.
/// * `Err(PartitionError)` if a split count is zero or exceeds the logical extent.
pub fn partition<G: CartesianGrid>(
    grid: &G,
    cfg: &PartitionerConfig,
) -> Result<PartitionAssignment, PartitionError> {
    let extent = grid.logical_extent();
    cfg.validate(extent)?;
    log::debug!(
        "partitioning {} cells of {:?} box with split {:?}",
        grid.cell_count(),
        extent,
        cfg.split
    );

    // 1. Initial buckets from (i, j, k)
    let buckets = initial_buckets(grid, cfg.split);
    let mut num_in_part = vec![0usize; cfg.num_buckets()];
    for &b in &buckets {
        num_in_part[b] += 1;
    }

    // 2. Empty buckets get no id
    let renumbering = BucketRenumbering::from_counts(&num_in_part);
    if renumbering.num_empty() > 0 {
        log::debug!(
            "dropping {} empty buckets out of {}",
            renumbering.num_empty(),
            num_in_part.len()
        );
    }
    let mut assignment = PartitionAssignment {
        num_parts: renumbering.num_parts(),
        cell_part: renumbering.apply(&buckets),
    };

    // 3. Connectivity
    if cfg.ensure_connectivity {
        ensure_connected_partitions(grid, &mut assignment, cfg.flood_fill);
    }

    crate::debug_invariants!(
        crate::DebugInvariants::validate_invariants(&assignment),
        "partition"
    );
    Ok(assignment)
}
