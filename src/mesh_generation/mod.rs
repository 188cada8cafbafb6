//! Structured Cartesian grids with optional inactive cells.
//!
//! [`StructuredGrid`] is the reference implementation of
//! [`CartesianGrid`]: unit hexahedra laid out in an `nx * ny * nz` box, with
//! an optional mask removing cells from the leaf set. Leaf cells keep their
//! logical index, so a masked grid behaves like a sub-domain of its box.

use itertools::iproduct;

use crate::mesh_error::MeshError;
use crate::partitioning::index::IndexToIjk;
use crate::topology::grid::{CartesianGrid, CellIndex};

/// Offsets of the eight corners of a hexahedron, `i` fastest.
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Logically Cartesian hexahedral grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredGrid {
    extent: [usize; 3],
    /// Leaf cell -> logical index.
    global_cell: Vec<usize>,
    /// Logical index -> leaf cell, `None` for inactive cells.
    leaf_of: Vec<Option<CellIndex>>,
}

impl StructuredGrid {
    /// Two-dimensional grid of `nx * ny` cells (one layer in `k`).
    pub fn cartesian_2d(nx: usize, ny: usize) -> Result<Self, MeshError> {
        Self::cartesian_3d(nx, ny, 1)
    }

    /// Three-dimensional grid with every cell active.
    pub fn cartesian_3d(nx: usize, ny: usize, nz: usize) -> Result<Self, MeshError> {
        Self::from_predicate([nx, ny, nz], |_| true)
    }

    /// Grid whose active cells are given by a mask in logical order.
    pub fn with_active_mask(extent: [usize; 3], active: &[bool]) -> Result<Self, MeshError> {
        let expected: usize = extent.iter().product();
        if active.len() != expected {
            return Err(MeshError::ActiveMaskLength {
                expected,
                found: active.len(),
            });
        }
        let nx = extent[0];
        let ny = extent[1];
        Self::from_predicate(extent, |[i, j, k]| active[i + nx * (j + ny * k)])
    }

    /// Grid keeping the cells at which `is_active([i, j, k])` holds.
    pub fn from_predicate(
        extent: [usize; 3],
        is_active: impl Fn([usize; 3]) -> bool,
    ) -> Result<Self, MeshError> {
        if extent.contains(&0) {
            return Err(MeshError::ZeroExtent { extent });
        }
        let [nx, ny, nz] = extent;
        let mut global_cell = Vec::with_capacity(nx * ny * nz);
        let mut leaf_of = Vec::with_capacity(nx * ny * nz);
        for (k, j, i) in iproduct!(0..nz, 0..ny, 0..nx) {
            if is_active([i, j, k]) {
                leaf_of.push(Some(global_cell.len()));
                global_cell.push(i + nx * (j + ny * k));
            } else {
                leaf_of.push(None);
            }
        }
        Ok(Self {
            extent,
            global_cell,
            leaf_of,
        })
    }

    /// Leaf cell -> logical index map.
    pub fn global_cell(&self) -> &[usize] {
        &self.global_cell
    }

    /// Leaf cell at logical coordinate `ijk`, if that cell is active.
    pub fn cell_at(&self, ijk: [usize; 3]) -> Option<CellIndex> {
        let [nx, ny, nz] = self.extent;
        if ijk[0] >= nx || ijk[1] >= ny || ijk[2] >= nz {
            return None;
        }
        self.leaf_of[ijk[0] + nx * (ijk[1] + ny * ijk[2])]
    }

    /// Logical coordinate of a leaf cell.
    pub fn ijk(&self, cell: CellIndex) -> [usize; 3] {
        IndexToIjk::new(self.extent).ijk(self.global_cell[cell])
    }

    /// Number of nodes of the vertex lattice, `(nx+1)(ny+1)(nz+1)`.
    pub fn num_vertices(&self) -> usize {
        self.extent.iter().map(|n| n + 1).product()
    }
}

impl CartesianGrid for StructuredGrid {
    type NeighIter<'a> = std::iter::Flatten<std::array::IntoIter<Option<CellIndex>, 6>>;
    type VertexIter<'a> = std::array::IntoIter<usize, 8>;

    fn logical_extent(&self) -> [usize; 3] {
        self.extent
    }

    fn cell_count(&self) -> usize {
        self.global_cell.len()
    }

    fn logical_index(&self, cell: CellIndex) -> usize {
        self.global_cell[cell]
    }

    /// Active axis neighbours in the order -i, +i, -j, +j, -k, +k.
    fn face_neighbors(&self, cell: CellIndex) -> Self::NeighIter<'_> {
        let ijk = self.ijk(cell);
        let step = |axis: usize, up: bool| {
            let mut at = ijk;
            at[axis] = if up { at[axis] + 1 } else { at[axis].checked_sub(1)? };
            self.cell_at(at)
        };
        [
            step(0, false),
            step(0, true),
            step(1, false),
            step(1, true),
            step(2, false),
            step(2, true),
        ]
        .into_iter()
        .flatten()
    }

    fn vertices(&self, cell: CellIndex) -> Self::VertexIter<'_> {
        let [i, j, k] = self.ijk(cell);
        let vx = self.extent[0] + 1;
        let vy = self.extent[1] + 1;
        CORNERS
            .map(|[di, dj, dk]| (i + di) + vx * ((j + dj) + vy * (k + dk)))
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_box_numbering() {
        let g = StructuredGrid::cartesian_3d(3, 2, 2).unwrap();
        assert_eq!(g.cell_count(), 12);
        assert_eq!(g.logical_extent(), [3, 2, 2]);
        assert!((0..12).all(|c| g.logical_index(c) == c));
        assert_eq!(g.ijk(7), [1, 0, 1]);
        assert_eq!(g.num_vertices(), 4 * 3 * 3);
    }

    #[test]
    fn interior_cell_has_six_neighbours() {
        let g = StructuredGrid::cartesian_3d(3, 3, 3).unwrap();
        let centre = g.cell_at([1, 1, 1]).unwrap();
        let nbs: Vec<_> = g.face_neighbors(centre).collect();
        assert_eq!(nbs, vec![12, 14, 10, 16, 4, 22]);
        let corner = g.cell_at([0, 0, 0]).unwrap();
        assert_eq!(g.face_neighbors(corner).count(), 3);
    }

    #[test]
    fn diagonal_cells_share_one_vertex() {
        let g = StructuredGrid::cartesian_2d(2, 2).unwrap();
        let a: Vec<_> = g.vertices(0).collect();
        let shared: Vec<_> = g.vertices(3).filter(|v| a.contains(v)).collect();
        // 2D grids are one cell thick, so the shared corner is an edge of two nodes
        assert_eq!(shared.len(), 2);
        let g3 = StructuredGrid::cartesian_3d(2, 2, 2).unwrap();
        let a: Vec<_> = g3.vertices(0).collect();
        let shared: Vec<_> = g3.vertices(7).filter(|v| a.contains(v)).collect();
        assert_eq!(shared, vec![13]);
    }

    #[test]
    fn masked_cells_are_skipped() {
        // 3x1 box without its middle cell
        let g = StructuredGrid::with_active_mask([3, 1, 1], &[true, false, true]).unwrap();
        assert_eq!(g.cell_count(), 2);
        assert_eq!(g.global_cell(), &[0, 2]);
        assert_eq!(g.cell_at([1, 0, 0]), None);
        assert_eq!(g.face_neighbors(0).count(), 0);
        assert_eq!(g.face_neighbors(1).count(), 0);
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            StructuredGrid::cartesian_3d(2, 0, 1),
            Err(MeshError::ZeroExtent { extent: [2, 0, 1] })
        );
        assert_eq!(
            StructuredGrid::with_active_mask([2, 2, 1], &[true; 3]),
            Err(MeshError::ActiveMaskLength {
                expected: 4,
                found: 3
            })
        );
    }
}
