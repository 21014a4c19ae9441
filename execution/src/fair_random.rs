//! Jointly random numbers the player can audit.
//!
//! A [`FairRandom::draw`] combines a number sealed by the computer with a
//! number picked by the player:
//!
//! 1. A fresh key and the computer's number are drawn from the [`RandomSource`].
//! 2. The HMAC of the number is printed together with the range.
//! 3. The player picks their own number (help and exit are accepted here).
//! 4. The key and the computer's number are printed so the HMAC can be checked.
//! 5. The result is `(computer + player) mod (max + 1)`.
//!
//! Exiting at step 3 reveals nothing: the key and number of an aborted draw are
//! dropped unpublished.
//!
//! [`FairRandom::guess_bit`] reuses the same commitment for first-move
//! arbitration, but the player's input is a guess compared against the sealed
//! bit rather than a contribution to a sum.

use tracing::{debug, warn};

use crate::console::{solicit, Console, Menu, Tone};
use crate::rng_pipeline::{Commitment, KEY_LEN};
use crate::{GameError, HelpScreen, RandomSource};

/// Printed when a freshly drawn key equals the previous draw's key.
pub const KEY_REUSE_WARNING: &str = "ERROR: The key is overused!";

/// Result of a joint draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub system_number: u64,
    pub counterpart_number: u64,
    pub result: u64,
}

/// Result of the guess-my-bit arbitration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub system_number: u64,
    pub guess: u64,
    pub correct: bool,
}

/// Commit-reveal draws over an injected randomness source.
///
/// The only state kept between calls is the previous key, used to report
/// generator anomalies.
pub struct FairRandom<R: RandomSource> {
    source: R,
    last_key: Option<[u8; KEY_LEN]>,
}

impl<R: RandomSource> FairRandom<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            last_key: None,
        }
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Draw fresh key material and seal a number in `[0, max]`.
    fn commit(&mut self, console: &mut dyn Console, max: u64) -> Commitment {
        let key = self.source.secret_key();
        if self.last_key == Some(key) {
            warn!(max, "commitment key repeated from previous draw");
            console.emit(Tone::Danger, KEY_REUSE_WARNING);
        }
        self.last_key = Some(key);

        let number = self.source.uniform(max);
        Commitment::seal(key, number)
    }

    /// Check the sealed record still matches what was published.
    fn open(commitment: &Commitment) -> Result<(), GameError> {
        if commitment.verify() {
            Ok(())
        } else {
            Err(GameError::CommitmentMismatch)
        }
    }

    /// Produce a jointly random integer in `[0, max]`.
    ///
    /// Returns `Ok(None)` if the player exits. For `max == 0` the result is
    /// always `0` and nothing is asked.
    pub fn draw(
        &mut self,
        max: u64,
        console: &mut dyn Console,
        help: &HelpScreen,
    ) -> Result<Option<DrawOutcome>, GameError> {
        if max == 0 {
            debug!("single-value range, skipping commitment");
            return Ok(Some(DrawOutcome {
                system_number: 0,
                counterpart_number: 0,
                result: 0,
            }));
        }
        let modulus = max + 1;

        let commitment = self.commit(console, max);
        debug!(max, digest = %commitment.digest_hex(), "committed");

        let menu = (0..=max).fold(
            Menu::new()
                .heading(
                    Tone::Info,
                    format!(
                        "I selected a random value in the range 0..{max} (HMAC={}).",
                        commitment.digest_hex()
                    ),
                )
                .heading(Tone::Plain, format!("Add your number modulo {modulus}.")),
            |menu, value| menu.choice(value.to_string()),
        );
        let invalid = format!("Invalid input. Please enter a number between 0 and {max}.");
        let Some(counterpart_number) = solicit(console, &menu, help, &invalid)? else {
            debug!(max, "draw aborted before reveal");
            return Ok(None);
        };

        Self::open(&commitment)?;
        let system_number = commitment.number();
        let result = (system_number + counterpart_number) % modulus;
        console.info(&format!(
            "My number is {system_number} (KEY={}).",
            commitment.key_hex()
        ));
        console.info(&format!(
            "The result is {system_number} + {counterpart_number} = {result} (mod {modulus})."
        ));

        Ok(Some(DrawOutcome {
            system_number,
            counterpart_number,
            result,
        }))
    }

    /// Let the player guess a sealed bit.
    ///
    /// Returns `Ok(None)` if the player exits.
    pub fn guess_bit(
        &mut self,
        console: &mut dyn Console,
        help: &HelpScreen,
    ) -> Result<Option<GuessOutcome>, GameError> {
        let commitment = self.commit(console, 1);
        debug!(digest = %commitment.digest_hex(), "committed first-move bit");

        let menu = Menu::new()
            .heading(
                Tone::Info,
                format!(
                    "I selected a random value in the range 0..1 (HMAC={}).",
                    commitment.digest_hex()
                ),
            )
            .heading(Tone::Info, "Try to guess my selection.")
            .choice("0")
            .choice("1");
        let Some(guess) = solicit(console, &menu, help, "Invalid selection. Please try again.")? else {
            debug!("guess aborted before reveal");
            return Ok(None);
        };

        Self::open(&commitment)?;
        let system_number = commitment.number();
        console.info(&format!(
            "My selection: {system_number} (KEY={}).",
            commitment.key_hex()
        ));

        Ok(Some(GuessOutcome {
            system_number,
            guess,
            correct: guess == system_number,
        }))
    }

    /// Uncommitted uniform pick in `[0, len)`, used for the computer's die choice.
    pub fn choose_index(&mut self, len: usize) -> Result<usize, GameError> {
        if len == 0 {
            return Err(GameError::NoDiceAvailable);
        }
        Ok(self.source.uniform(len as u64 - 1) as usize)
    }
}
