//! Rejection reasons for owner behaviour transitions.
use std::fmt;

use super::state::OwnerState;

/// Raised when a transition is requested from a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerTransitionError {
    pub from: OwnerState,
    pub requested: OwnerState,
}

impl OwnerTransitionError {
    pub fn new(from: OwnerState, requested: OwnerState) -> Self {
        Self { from, requested }
    }
}

impl fmt::Display for OwnerTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Owner cannot go from {} to {}",
            self.from.label(),
            self.requested.label()
        )
    }
}

impl std::error::Error for OwnerTransitionError {}
