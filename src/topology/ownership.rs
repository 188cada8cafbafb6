//! Ownership metadata for the cells one partition stores.
//!
//! [`CellOwnership`] lists the owned cells of a partition followed by its ghost
//! cells, each tagged with its owning partition. This is the hand-off structure
//! a distributed solver needs to lay out local arrays and plan halo exchange.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::overlap::overlap::CellOverlap;
use crate::partitioning::PartitionId;
use crate::topology::grid::CellIndex;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OwnershipEntry {
    pub owner: PartitionId,
    pub is_ghost: bool,
}

/// Local view of one partition: owned cells first, then ghosts, both in leaf order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellOwnership {
    part: PartitionId,
    cells: Vec<CellIndex>,
    entries: Vec<OwnershipEntry>,
    local_of: HashMap<CellIndex, usize>,
    num_owned: usize,
}

impl CellOwnership {
    /// Build the view of `my_part` from an assignment and its overlap map.
    pub fn new(cell_part: &[PartitionId], overlap: &CellOverlap, my_part: PartitionId) -> Self {
        let owned = cell_part
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p == my_part)
            .map(|(c, _)| c);
        let mut cells: Vec<CellIndex> = owned.collect();
        let num_owned = cells.len();
        cells.extend(
            overlap
                .ghost_cells(my_part)
                .into_iter()
                .filter(|&c| cell_part[c] != my_part),
        );

        let entries = cells
            .iter()
            .enumerate()
            .map(|(local, &c)| OwnershipEntry {
                owner: cell_part[c],
                is_ghost: local >= num_owned,
            })
            .collect();
        let local_of = cells.iter().enumerate().map(|(l, &c)| (c, l)).collect();
        Self {
            part: my_part,
            cells,
            entries,
            local_of,
            num_owned,
        }
    }

    /// Partition this view belongs to.
    pub fn part(&self) -> PartitionId {
        self.part
    }

    /// Owned plus ghost cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn num_owned(&self) -> usize {
        self.num_owned
    }

    pub fn num_ghosts(&self) -> usize {
        self.cells.len() - self.num_owned
    }

    /// Global (leaf) cell index of every local slot.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Local slot of a global cell, if this partition stores it.
    pub fn local_index(&self, cell: CellIndex) -> Option<usize> {
        self.local_of.get(&cell).copied()
    }

    /// Ownership of a global cell, if this partition stores it.
    pub fn entry(&self, cell: CellIndex) -> Option<OwnershipEntry> {
        self.local_index(cell).map(|l| self.entries[l])
    }

    /// `(cell, entry)` pairs in local order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, OwnershipEntry)> + '_ {
        self.cells.iter().copied().zip(self.entries.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::StructuredGrid;
    use crate::overlap::overlap::{OverlapSubject, add_overlap_layer};

    #[test]
    fn owned_then_ghost_cells() {
        // 0 0 | 1 1
        let g = StructuredGrid::cartesian_3d(4, 1, 1).unwrap();
        let part = [0, 0, 1, 1];
        let ov = add_overlap_layer(&g, &part, OverlapSubject::All, 1);
        let view = CellOwnership::new(&part, &ov, 1);
        assert_eq!(view.part(), 1);
        assert_eq!(view.cells(), &[2, 3, 1]);
        assert_eq!(view.num_owned(), 2);
        assert_eq!(view.num_ghosts(), 1);
        assert_eq!(view.local_index(1), Some(2));
        assert_eq!(view.local_index(0), None);
        assert_eq!(
            view.entry(1),
            Some(OwnershipEntry {
                owner: 0,
                is_ghost: true
            })
        );
        assert!(view.iter().take(2).all(|(_, e)| !e.is_ghost && e.owner == 1));
    }

    #[test]
    fn partition_without_neighbours_has_no_ghosts() {
        let g = StructuredGrid::cartesian_2d(2, 2).unwrap();
        let part = [0; 4];
        let ov = add_overlap_layer(&g, &part, OverlapSubject::All, 2);
        let view = CellOwnership::new(&part, &ov, 0);
        assert_eq!(view.len(), 4);
        assert_eq!(view.num_ghosts(), 0);
        assert!(!view.is_empty());
    }
}
