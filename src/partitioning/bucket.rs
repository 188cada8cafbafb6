//! Initial Cartesian bucketing and renumbering of empty buckets.

/// Bucket index of coordinate `c` along one axis of length `size` split into `split` buckets.
///
/// The first `size % split` buckets hold one extra cell.
#[inline]
fn axis_bucket(c: usize, size: usize, split: usize) -> usize {
    let n = size / split;
    let extra = size % split;
    if c < (n + 1) * extra {
        c / (n + 1)
    } else {
        (c - (n + 1) * extra) / n + extra
    }
}

/// Initial partition of the cell at coordinate `c`.
///
/// Per-axis buckets are flattened row-major: `p0 + s0 * (p1 + s1 * p2)`.
/// Requires `1 <= split[d] <= size[d]` on every axis.
pub fn initial_partition(c: [usize; 3], size: [usize; 3], split: [usize; 3]) -> usize {
    let p = [
        axis_bucket(c[0], size[0], split[0]),
        axis_bucket(c[1], size[1], split[1]),
        axis_bucket(c[2], size[2], split[2]),
    ];
    p[0] + split[0] * (p[1] + split[1] * p[2])
}

/// Maps bucket ids to a contiguous id space that skips empty buckets.
///
/// `mapping[b]` is `None` for an empty bucket and otherwise the new id, which
/// is `b` minus the number of empty buckets before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketRenumbering {
    mapping: Vec<Option<usize>>,
    num_parts: usize,
}

impl BucketRenumbering {
    /// Build the renumbering from per-bucket occupancy counts.
    pub fn from_counts(counts: &[usize]) -> Self {
        let mut next = 0;
        let mapping = counts
            .iter()
            .map(|&n| {
                (n > 0).then(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect();
        Self {
            mapping,
            num_parts: next,
        }
    }

    /// Number of non-empty buckets.
    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    /// Number of buckets dropped.
    pub fn num_empty(&self) -> usize {
        self.mapping.len() - self.num_parts
    }

    /// New id of an occupied bucket, `None` when the bucket is empty or out of range.
    pub fn get(&self, bucket: usize) -> Option<usize> {
        self.mapping.get(bucket).copied().flatten()
    }

    /// Rewrite a bucket assignment into the compacted id space.
    ///
    /// # Panics
    /// Panics if an entry names an empty bucket, which cannot happen when the
    /// counts were tallied from the same assignment.
    pub fn apply(&self, buckets: &[usize]) -> Vec<usize> {
        buckets
            .iter()
            .map(|&b| {
                self.get(b)
                    .unwrap_or_else(|| panic!("bucket {b} was counted as empty"))
            })
            .collect()
    }
}
