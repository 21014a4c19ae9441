//! Common types used throughout fairdice.
//!
//! A [`Die`] is an immutable list of [`FACES_PER_DIE`] signed faces and a [`DiceSet`] is the
//! ordered pool the players choose from. Both are produced once from the process configuration
//! and only read afterwards.

mod constants;
pub mod dice;
pub mod probability;

pub use constants::*;
pub use dice::{ConfigError, DiceSet, Die};
pub use probability::{tie_probability, win_probability, wins};
