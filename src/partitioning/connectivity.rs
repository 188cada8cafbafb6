//! Splitting of partitions that are not face-connected.
//!
//! Cells are scanned in leaf order; every uncoloured cell seeds a flood fill
//! over face neighbours of the same partition. The first component found for a
//! partition keeps its id, every later component of that partition receives a
//! fresh id in discovery order.

use serde::{Deserialize, Serialize};

use super::PartitionAssignment;
use crate::topology::grid::{CartesianGrid, CellIndex};

/// Call depth after which [`FloodFill::Recursive`] continues on an explicit stack.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Traversal used to colour a connected component.
///
/// Both strategies colour exactly the same cells, so the resulting assignment
/// does not depend on the choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodFill {
    /// Call-based depth-first walk, bounded by [`MAX_RECURSION_DEPTH`].
    Recursive,
    /// Depth-first walk on a heap-allocated stack.
    #[default]
    ExplicitStack,
}

fn colour_component_recursive<G: CartesianGrid>(
    grid: &G,
    cell: CellIndex,
    colour: usize,
    cell_part: &[usize],
    cell_colour: &mut [Option<usize>],
    depth: usize,
) {
    cell_colour[cell] = Some(colour);
    for nb in grid.face_neighbors(cell) {
        if cell_part[nb] == cell_part[cell] && cell_colour[nb].is_none() {
            if depth < MAX_RECURSION_DEPTH {
                colour_component_recursive(grid, nb, colour, cell_part, cell_colour, depth + 1);
            } else {
                colour_component(grid, nb, colour, cell_part, cell_colour);
            }
        }
    }
}

fn colour_component<G: CartesianGrid>(
    grid: &G,
    cell: CellIndex,
    colour: usize,
    cell_part: &[usize],
    cell_colour: &mut [Option<usize>],
) {
    let part = cell_part[cell];
    cell_colour[cell] = Some(colour);
    let mut stack = vec![cell];
    while let Some(c) = stack.pop() {
        for nb in grid.face_neighbors(c) {
            if cell_part[nb] == part && cell_colour[nb].is_none() {
                // coloured on push, so each cell enters the stack once
                cell_colour[nb] = Some(colour);
                stack.push(nb);
            }
        }
    }
}

/// Split every partition of `assignment` into its face-connected components.
///
/// Leaves the assignment untouched when all partitions are already connected.
/// Returns the number of partition ids that were added.
///
/// # Panics
/// Panics if the assignment does not have one entry per grid cell or names a
/// partition `>= num_parts`.
pub fn ensure_connected_partitions<G: CartesianGrid>(
    grid: &G,
    assignment: &mut PartitionAssignment,
    strategy: FloodFill,
) -> usize {
    assert_eq!(
        assignment.cell_part.len(),
        grid.cell_count(),
        "partition assignment length does not match grid cell count"
    );
    let num_parts = assignment.num_parts;
    let cell_part = &assignment.cell_part;
    let mut cell_colour: Vec<Option<usize>> = vec![None; cell_part.len()];
    let mut partition_used = vec![false; num_parts];
    let mut max_part = num_parts;

    for cell in grid.leaf_cells() {
        if cell_colour[cell].is_some() {
            continue;
        }
        let part = cell_part[cell];
        assert!(
            part < num_parts,
            "cell {cell} has partition {part}, expected < {num_parts}"
        );
        let colour = if partition_used[part] {
            max_part += 1;
            max_part - 1
        } else {
            partition_used[part] = true;
            part
        };
        match strategy {
            FloodFill::Recursive => {
                colour_component_recursive(grid, cell, colour, cell_part, &mut cell_colour, 0)
            }
            FloodFill::ExplicitStack => {
                colour_component(grid, cell, colour, cell_part, &mut cell_colour)
            }
        }
    }

    let added = max_part - num_parts;
    if added > 0 {
        log::info!("connectivity repair split {num_parts} partitions into {max_part}");
        assignment.cell_part = cell_colour
            .into_iter()
            .enumerate()
            .map(|(cell, c)| {
                c.unwrap_or_else(|| panic!("cell {cell} was not visited by leaf iteration"))
            })
            .collect();
        assignment.num_parts = max_part;
    }
    added
}
