//! Draw errors

use thiserror::Error;

/// Errors that can occur while drawing teams.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The selection cannot fill a single team of the requested size.
    ///
    /// The caller is expected to surface this as an advisory to the user; no
    /// partial result is produced.
    #[error("at least {required} participants are needed to draw, got {available}")]
    InsufficientParticipants { available: usize, required: usize },

    /// The requested group size is zero.
    #[error("group size must be a positive integer")]
    InvalidGroupSize,
}
