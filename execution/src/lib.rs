//! fairdice execution layer.
//!
//! This crate contains the commit-reveal pipeline, the fair draws built on it and the
//! turn sequencer that plays one round of the game over a [`Console`].
//!
//! ## Fairness requirements
//! - Every number the computer contributes is sealed with HMAC-SHA3-256 before the player
//!   is asked for anything, and revealed only after the player has answered.
//! - An aborted draw never reveals its key or number.
//! - Randomness only comes from the injected [`RandomSource`].
//!
//! The primary entrypoint is [`TurnSequencer`].

pub mod console;
mod error;
pub mod fair_random;
pub mod help;
pub mod random;
pub mod rng_pipeline;
pub mod turn_sequencer;

#[cfg(test)]
mod mocks;


pub use console::{Command, Console, Menu, Tone};
pub use error::GameError;
pub use fair_random::{DrawOutcome, FairRandom, GuessOutcome};
pub use help::HelpScreen;
pub use random::{OsRandom, RandomSource};
pub use rng_pipeline::{
    compute_digest, verify_commitment, verify_disclosure, Commitment, CommitmentError, DIGEST_LEN,
    KEY_LEN,
};
pub use turn_sequencer::{GameSession, Phase, Player, RoundOutcome, ThrowResult, TurnSequencer, Winner};
