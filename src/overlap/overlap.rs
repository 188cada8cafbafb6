//! Ghost-layer construction: which partitions need a copy of which cell.
//!
//! Starting from every boundary cell of the subject partition(s), face
//! neighbours owned elsewhere are walked up to `layers` hops deep. The last hop
//! also picks up cells that touch the source cell only through a vertex, so the
//! halo supports stencils with diagonal couplings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;
use crate::partitioning::PartitionId;
use crate::topology::grid::{CartesianGrid, CellIndex};

/// Which cells act as halo sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapSubject {
    /// Only cells of this partition, which is also the owner of every halo.
    Part(PartitionId),
    /// Every cell, owned by its own partition.
    #[default]
    All,
}

/// Options for [`build_overlap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    pub subject: OverlapSubject,
    /// Halo depth in face hops. `0` is treated like `1`.
    pub layers: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            subject: OverlapSubject::All,
            layers: 1,
        }
    }
}

/// Per-cell set of partitions that hold a ghost copy of the cell.
///
/// Indexed by leaf cell. A cell never lists its own owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOverlap(Vec<BTreeSet<PartitionId>>);

impl From<Vec<BTreeSet<PartitionId>>> for CellOverlap {
    fn from(v: Vec<BTreeSet<PartitionId>>) -> Self {
        Self(v)
    }
}

impl CellOverlap {
    /// Empty sets for `n` cells.
    pub fn with_cells(n: usize) -> Self {
        Self(vec![BTreeSet::new(); n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Partitions that need a copy of `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is out of range.
    pub fn get(&self, cell: CellIndex) -> &BTreeSet<PartitionId> {
        &self.0[cell]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<PartitionId>> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<BTreeSet<PartitionId>> {
        self.0
    }

    fn insert(&mut self, cell: CellIndex, part: PartitionId) {
        self.0[cell].insert(part);
    }

    /// `cell` becomes a ghost of the partition owning `other`, unless both share an owner.
    fn link(&mut self, cell_part: &[PartitionId], cell: CellIndex, other: CellIndex) {
        if cell_part[other] != cell_part[cell] {
            self.0[cell].insert(cell_part[other]);
        }
    }

    /// Check the map against the assignment it was built from.
    ///
    /// One set per cell, and no cell lists its own owner.
    pub fn validate_against(&self, cell_part: &[PartitionId]) -> Result<(), MeshError> {
        if self.0.len() != cell_part.len() {
            return Err(MeshError::InvariantViolation(format!(
                "overlap covers {} cells, assignment {}",
                self.0.len(),
                cell_part.len()
            )));
        }
        for (cell, parts) in self.0.iter().enumerate() {
            if parts.contains(&cell_part[cell]) {
                return Err(MeshError::InvariantViolation(format!(
                    "cell {cell} lists its owner {} as a ghost partition",
                    cell_part[cell]
                )));
            }
        }
        Ok(())
    }

    /// Partitions `my_part` exchanges halo data with, sorted.
    ///
    /// Union of the partitions that receive cells of `my_part` and the owners
    /// of cells `my_part` receives.
    pub fn neighbours(&self, cell_part: &[PartitionId], my_part: PartitionId) -> Vec<PartitionId> {
        let mut out = BTreeSet::new();
        for (cell, parts) in self.0.iter().enumerate() {
            if cell_part[cell] == my_part {
                out.extend(parts.iter().copied());
            } else if parts.contains(&my_part) {
                out.insert(cell_part[cell]);
            }
        }
        out.into_iter().collect()
    }

    /// Cells owned by `my_part` that must be copied to `to_part`, in leaf order.
    pub fn send_cells(
        &self,
        cell_part: &[PartitionId],
        my_part: PartitionId,
        to_part: PartitionId,
    ) -> Vec<CellIndex> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(cell, parts)| cell_part[cell] == my_part && parts.contains(&to_part))
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Cells `part` holds as ghosts, in leaf order.
    pub fn ghost_cells(&self, part: PartitionId) -> Vec<CellIndex> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, parts)| parts.contains(&part))
            .map(|(cell, _)| cell)
            .collect()
    }
}

/// Register `candidate` as a corner ghost of `from` if the two share a vertex.
///
/// The first shared vertex settles the pair.
fn add_overlap_corner_cell<G: CartesianGrid>(
    grid: &G,
    owner: PartitionId,
    from: CellIndex,
    candidate: CellIndex,
    cell_part: &[PartitionId],
    overlap: &mut CellOverlap,
) {
    let from_vertices: Vec<usize> = grid.vertices(from).collect();
    if grid.vertices(candidate).any(|v| from_vertices.contains(&v)) {
        overlap.insert(candidate, owner);
        overlap.link(cell_part, from, candidate);
    }
}

fn add_overlap_layer_from<G: CartesianGrid>(
    grid: &G,
    cell: CellIndex,
    owner: PartitionId,
    cell_part: &[PartitionId],
    overlap: &mut CellOverlap,
    depth: usize,
) {
    for nb in grid.face_neighbors(cell) {
        if cell_part[nb] == owner {
            continue;
        }
        overlap.insert(nb, owner);
        overlap.link(cell_part, cell, nb);
        if depth > 0 {
            add_overlap_layer_from(grid, nb, owner, cell_part, overlap, depth - 1);
        } else {
            // cells that only share a corner with `cell`
            for nb2 in grid.face_neighbors(nb) {
                if cell_part[nb2] == owner {
                    continue;
                }
                add_overlap_corner_cell(grid, owner, cell, nb2, cell_part, overlap);
            }
        }
    }
}

/// Build the overlap map of `layers` face hops around the subject partition(s).
///
/// # Panics
/// Panics if `cell_part` does not have one entry per grid cell.
pub fn add_overlap_layer<G: CartesianGrid>(
    grid: &G,
    cell_part: &[PartitionId],
    subject: OverlapSubject,
    layers: usize,
) -> CellOverlap {
    assert_eq!(
        cell_part.len(),
        grid.cell_count(),
        "partition assignment length does not match grid cell count"
    );
    let mut overlap = CellOverlap::with_cells(cell_part.len());
    let depth = layers.saturating_sub(1);
    for cell in grid.leaf_cells() {
        let owner = match subject {
            OverlapSubject::Part(mypart) if cell_part[cell] == mypart => mypart,
            OverlapSubject::Part(_) => continue,
            OverlapSubject::All => cell_part[cell],
        };
        add_overlap_layer_from(grid, cell, owner, cell_part, &mut overlap, depth);
    }
    crate::debug_invariants!(overlap.validate_against(cell_part), "overlap");
    log::trace!(
        "overlap with {layers} layer(s) for {subject:?}: {} ghost entries",
        overlap.iter().map(BTreeSet::len).sum::<usize>()
    );
    overlap
}

/// [`add_overlap_layer`] driven by an [`OverlapConfig`].
pub fn build_overlap<G: CartesianGrid>(
    grid: &G,
    cell_part: &[PartitionId],
    cfg: &OverlapConfig,
) -> CellOverlap {
    add_overlap_layer(grid, cell_part, cfg.subject, cfg.layers)
}
