use crate::mesh_error::MeshError;
use crate::partitioning::PartitionAssignment;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl DebugInvariants for PartitionAssignment {
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "PartitionAssignment");
    }

    /// Every id lies in `[0, num_parts)` and every id owns at least one cell.
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let mut used = vec![false; self.num_parts];
        for (cell, &p) in self.cell_part.iter().enumerate() {
            let slot = used.get_mut(p).ok_or_else(|| {
                MeshError::InvariantViolation(format!(
                    "cell {cell} has partition {p}, expected < {}",
                    self.num_parts
                ))
            })?;
            *slot = true;
        }
        if let Some(p) = used.iter().position(|&u| !u) {
            return Err(MeshError::InvariantViolation(format!(
                "partition {p} owns no cells"
            )));
        }
        Ok(())
    }
}
