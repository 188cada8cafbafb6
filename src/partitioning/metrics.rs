//! Partitioning metrics utilities.
//!
//! This module provides functions for evaluating the quality of a grid
//! partitioning: bucket sizes, edge cut, per-partition component counts and
//! the replication factor implied by an overlap map. These are intended for
//! debugging, testing, and CI validation.

use std::collections::VecDeque;

use super::PartitionAssignment;
use crate::overlap::overlap::CellOverlap;
use crate::topology::grid::CartesianGrid;

/// Number of cells in each partition.
pub fn part_sizes(assignment: &PartitionAssignment) -> Vec<usize> {
    let mut sizes = vec![0; assignment.num_parts];
    for &p in &assignment.cell_part {
        sizes[p] += 1;
    }
    sizes
}

/// Computes the edge cut of a partitioning (O(E)).
///
/// The edge cut is the number of face-adjacent cell pairs owned by different
/// partitions. Each pair is counted once.
pub fn edge_cut<G: CartesianGrid>(grid: &G, cell_part: &[usize]) -> usize {
    grid.leaf_cells()
        .map(|c| {
            grid.face_neighbors(c)
                .filter(|&nb| c < nb && cell_part[c] != cell_part[nb])
                .count()
        })
        .sum()
}

/// Number of face-connected components of every partition.
///
/// Runs an independent breadth-first fill per component, so it can serve as a
/// reference for the connectivity repair.
pub fn component_counts<G: CartesianGrid>(
    grid: &G,
    assignment: &PartitionAssignment,
) -> Vec<usize> {
    let cell_part = &assignment.cell_part;
    let mut counts = vec![0; assignment.num_parts];
    let mut seen = vec![false; cell_part.len()];
    let mut queue = VecDeque::new();
    for start in grid.leaf_cells() {
        if seen[start] {
            continue;
        }
        let part = cell_part[start];
        counts[part] += 1;
        seen[start] = true;
        queue.push_back(start);
        while let Some(c) = queue.pop_front() {
            for nb in grid.face_neighbors(c) {
                if !seen[nb] && cell_part[nb] == part {
                    seen[nb] = true;
                    queue.push_back(nb);
                }
            }
        }
    }
    counts
}

/// True when every partition is a single face-connected component.
pub fn is_connected<G: CartesianGrid>(grid: &G, assignment: &PartitionAssignment) -> bool {
    component_counts(grid, assignment).iter().all(|&n| n <= 1)
}

/// Average number of copies of a cell: its owner plus every partition holding a ghost.
pub fn replication_factor(overlap: &CellOverlap) -> f64 {
    if overlap.is_empty() {
        return 0.0;
    }
    let total: usize = overlap.iter().map(|parts| 1 + parts.len()).sum();
    total as f64 / overlap.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::StructuredGrid;

    fn assignment(num_parts: usize, cell_part: Vec<usize>) -> PartitionAssignment {
        PartitionAssignment {
            num_parts,
            cell_part,
        }
    }

    #[test]
    fn sizes_of_three_parts() {
        let a = assignment(3, vec![0, 1, 1, 2, 2, 2]);
        assert_eq!(part_sizes(&a), vec![1, 2, 3]);
    }

    #[test]
    fn edge_cut_of_2x2_quadrants() {
        // 2x2 grid, every cell its own part -> 4 interior faces, all cut
        let g = StructuredGrid::cartesian_2d(2, 2).unwrap();
        assert_eq!(edge_cut(&g, &[0, 1, 2, 3]), 4);
        // left/right halves -> only the two faces between columns are cut
        assert_eq!(edge_cut(&g, &[0, 1, 0, 1]), 2);
        assert_eq!(edge_cut(&g, &[0, 0, 0, 0]), 0);
    }

    #[test]
    fn components_of_alternating_line() {
        let g = StructuredGrid::cartesian_2d(5, 1).unwrap();
        let a = assignment(2, vec![0, 1, 0, 1, 0]);
        assert_eq!(component_counts(&g, &a), vec![3, 2]);
        assert!(!is_connected(&g, &a));
        let b = assignment(2, vec![0, 0, 0, 1, 1]);
        assert!(is_connected(&g, &b));
    }

    #[test]
    fn replication_factor_counts_owner_and_ghosts() {
        let ov = CellOverlap::from(vec![
            [1].into_iter().collect(),
            Default::default(),
            [0, 2].into_iter().collect(),
        ]);
        // (2 + 1 + 3) / 3
        assert!((replication_factor(&ov) - 2.0).abs() < 1e-12);
        assert_eq!(replication_factor(&CellOverlap::default()), 0.0);
    }
}
