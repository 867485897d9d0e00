use std::collections::TryReserveError;

use thiserror::Error;

/// Resource exhaustion while growing a container.
///
/// Misuse of a container (dereferencing an end cursor, popping an empty list)
/// is not represented here; those are contract violations and panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("node allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("container is full: at most {max} nodes can be addressed")]
    CapacityExceeded { max: usize },
}
