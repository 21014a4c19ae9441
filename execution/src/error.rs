use std::io;

use thiserror::Error;

/// Faults that end a round early.
///
/// A player choosing to exit is not a fault; it surfaces as `Ok(None)` from
/// draws and as [`crate::RoundOutcome::Exited`] from the sequencer.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("commitment self-check failed before reveal")]
    CommitmentMismatch,
    #[error("no dice left to choose from")]
    NoDiceAvailable,
    #[error("no die chosen for {0:?}")]
    DieNotChosen(crate::Player),
    #[error("face index {index} out of range for a die with {faces} faces")]
    FaceOutOfRange { index: u64, faces: usize },
}
