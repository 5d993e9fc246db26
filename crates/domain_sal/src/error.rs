//! SAL domain errors

use thiserror::Error;

/// Errors that can occur in the SAL domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalError {
    /// Checkpoint not found
    #[error("Checkpoint not found: {0}")]
    CheckpointNotFound(String),

    /// Only the last checkpoint may be deleted
    #[error("Cannot delete SAL {number}: only the last checkpoint (SAL {last}) can be deleted")]
    NotLastCheckpoint {
        number: u32,
        last: u32,
    },

    /// Locked checkpoints are immutable
    #[error("SAL {0} is locked")]
    CheckpointLocked(u32),

    /// Loaded checkpoints are not numbered 1..=n
    #[error("Checkpoint sequence broken: expected SAL {expected}, found SAL {found}")]
    SequenceGap {
        expected: u32,
        found: u32,
    },

    /// Loaded checkpoints share an id
    #[error("Duplicate checkpoint id: {0}")]
    DuplicateCheckpoint(String),
}
