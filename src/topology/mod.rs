//! Top-level module for grid topology abstractions.
//!
//! This module provides the narrow view of a grid the partitioner works on:
//! - The [`CartesianGrid`] capability trait (leaf cells, face neighbours, vertices)
//! - Per-partition ownership of owned and ghost cells
//!
//! Most users will implement `CartesianGrid` for their own grid type, or use
//! [`crate::mesh_generation::StructuredGrid`].

pub mod grid;
pub mod ownership;

pub use grid::{CartesianGrid, CellIndex};
pub use ownership::{CellOwnership, OwnershipEntry};
