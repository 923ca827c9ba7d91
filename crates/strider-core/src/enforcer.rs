use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Rank mismatch. {accepted:?} != {actual}.")]
    RankMismatch {
        accepted: RangeInclusive<usize>,
        actual: usize,
    },
    #[error("Axis {axis} out of range for a view of rank {rank}.")]
    AxisOutOfRange { axis: usize, rank: usize },
    #[error("Duplicate dims in permutation.")]
    DuplicateDims,
}

/// # Enforcer
///
/// Checks the caller contracts that the unchecked view operations assume.
pub struct Enforcer;

impl Enforcer {
    pub fn check_axis(axis: usize, rank: usize) -> Result<(), InvariantError> {
        if axis >= rank {
            log::debug!("Rejecting axis {} for rank {}", axis, rank);
            return Err(InvariantError::AxisOutOfRange { axis, rank });
        }
        Ok(())
    }

    /// `perm` must hold every axis in `0..rank` exactly once.
    pub fn check_permutation(perm: &[usize], rank: usize) -> Result<(), InvariantError> {
        if perm.len() != rank {
            log::debug!("Permutation {:?} has wrong arity for rank {}", perm, rank);
            return Err(InvariantError::RankMismatch {
                accepted: rank..=rank,
                actual: perm.len(),
            });
        }
        let mut seen = vec![false; rank];
        for &axis in perm {
            Self::check_axis(axis, rank)?;
            if std::mem::replace(&mut seen[axis], true) {
                log::debug!("Permutation {:?} repeats axis {}", perm, axis);
                return Err(InvariantError::DuplicateDims);
            }
        }
        Ok(())
    }
}
