//! Capability trait through which the partitioner and the overlap builder see a grid.
//!
//! Only topology queries are required: the logical Cartesian box the leaf cells
//! live in, face neighbours, and corner vertex indices. Geometry is never
//! consulted, so any structure that can answer these questions (a corner-point
//! grid, a masked Cartesian box, a synthetic test graph) can be partitioned.

/// Leaf cell index, `0..cell_count()`.
pub type CellIndex = usize;

/// Read-only topology queries over the leaf cells of a logically Cartesian grid.
///
/// Implementors must keep every enumeration consistent for the lifetime of a
/// borrow: the same cell must report the same neighbours and vertices while a
/// traversal is running. Face adjacency is expected to be symmetric.
pub trait CartesianGrid {
    /// Iterator over face neighbours of a cell.
    type NeighIter<'a>: Iterator<Item = CellIndex> + 'a
    where
        Self: 'a;
    /// Iterator over the vertex indices of a cell's corners.
    type VertexIter<'a>: Iterator<Item = usize> + 'a
    where
        Self: 'a;

    /// Extent `[nx, ny, nz]` of the logical Cartesian box.
    fn logical_extent(&self) -> [usize; 3];

    /// Number of leaf cells.
    fn cell_count(&self) -> usize;

    /// Position of a leaf cell in the logical box, `i + nx * (j + ny * k)`.
    ///
    /// This differs from the leaf index as soon as the grid is a sub-domain of
    /// its box (inactive cells, local patch of a larger grid).
    fn logical_index(&self, cell: CellIndex) -> usize;

    /// Cells reachable from `cell` through exactly one shared face.
    fn face_neighbors(&self, cell: CellIndex) -> Self::NeighIter<'_>;

    /// Vertex indices of the corners of `cell`.
    fn vertices(&self, cell: CellIndex) -> Self::VertexIter<'_>;

    /// Leaf cells in their stable iteration order.
    fn leaf_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        0..self.cell_count()
    }
}
