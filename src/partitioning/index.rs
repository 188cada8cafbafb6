//! Linear logical index -> `(i, j, k)` coordinate.

/// Converts linear logical indices of an `nx * ny * nz` box into coordinates.
///
/// Caches `nx` and `nx * ny` so the per-cell conversion is two divisions and
/// two remainders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexToIjk {
    num_i: usize,
    num_ij: usize,
}

impl IndexToIjk {
    /// Converter for a box of the given logical extent.
    pub fn new(extent: [usize; 3]) -> Self {
        Self {
            num_i: extent[0],
            num_ij: extent[0] * extent[1],
        }
    }

    /// Coordinate of `index`. The caller guarantees `index < nx * ny * nz`.
    #[inline]
    pub fn ijk(&self, index: usize) -> [usize; 3] {
        [
            index % self.num_i,
            (index % self.num_ij) / self.num_i,
            index / self.num_ij,
        ]
    }
}
