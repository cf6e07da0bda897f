use std::fmt;

use crate::owner::errors::OwnerTransitionError;

/// Why a distraction could not start or end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractionError {
    AlreadyDistracted,
    NotDistracted,
    Owner(OwnerTransitionError),
}

impl fmt::Display for DistractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDistracted => write!(f, "a distraction is already active"),
            Self::NotDistracted => write!(f, "no distraction is active"),
            Self::Owner(err) => write!(f, "owner refused: {}", err),
        }
    }
}

impl std::error::Error for DistractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Owner(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OwnerTransitionError> for DistractionError {
    fn from(err: OwnerTransitionError) -> Self {
        Self::Owner(err)
    }
}
