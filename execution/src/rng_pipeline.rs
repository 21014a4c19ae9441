//! HMAC commit-reveal pipeline for provably fair draws.
//!
//! Every number the computer contributes to a draw is sealed in a
//! [`Commitment`] before the player is asked for anything.
//!
//! ## Commit-Reveal Flow
//!
//! 1. **Generate** - Draw a fresh 256-bit key and the computer's number
//! 2. **Commit** - Publish `HMAC-SHA3-256(key, number)` as hex
//! 3. **Reveal** - After the player's number is fixed, publish the key and number
//! 4. **Verify** - Anyone can recompute the HMAC and compare it to the published one
//!
//! ## Encoding
//!
//! The HMAC key is the lowercase hex rendering of the key bytes, exactly the
//! string printed as `KEY=...`, and the message is the decimal ASCII form of
//! the number. A player can therefore check a disclosure with stock tools:
//! ```text
//! printf 3 | openssl dgst -sha3-256 -hmac <KEY>
//! ```

use hmac::{Hmac, Mac};
use sha3::Sha3_256;
use thiserror::Error;

type HmacSha3 = Hmac<Sha3_256>;

/// Length of commitment keys in bytes.
pub const KEY_LEN: usize = 32;

/// Length of commitment digests in bytes.
pub const DIGEST_LEN: usize = 32;

/// Errors that can occur while checking a disclosure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("invalid hex in {field}")]
    InvalidHex { field: &'static str },
    #[error("invalid key length: {0} (expected 32)")]
    InvalidKeyLength(usize),
    #[error("invalid digest length: {0} (expected 32)")]
    InvalidDigestLength(usize),
    #[error("commitment verification failed")]
    VerificationFailed,
}

/// Message bytes committed for `number`.
pub fn encode_number(number: u64) -> Vec<u8> {
    number.to_string().into_bytes()
}

fn keyed_mac(key: &[u8; KEY_LEN], number: u64) -> HmacSha3 {
    let mut mac: HmacSha3 =
        Mac::new_from_slice(hex::encode(key).as_bytes()).expect("hmac accepts any key length");
    mac.update(&encode_number(number));
    mac
}

/// Compute the commitment digest for `number` under `key`.
pub fn compute_digest(key: &[u8; KEY_LEN], number: u64) -> [u8; DIGEST_LEN] {
    keyed_mac(key, number).finalize().into_bytes().into()
}

/// Verify that `digest` commits to `number` under `key`.
///
/// The comparison is constant time.
pub fn verify_commitment(digest: &[u8; DIGEST_LEN], key: &[u8; KEY_LEN], number: u64) -> bool {
    keyed_mac(key, number).verify_slice(digest).is_ok()
}

/// Verify printed values (hex digest, hex key, decimal number) from a finished draw.
pub fn verify_disclosure(digest_hex: &str, key_hex: &str, number: u64) -> Result<(), CommitmentError> {
    let digest = hex::decode(digest_hex.trim())
        .map_err(|_| CommitmentError::InvalidHex { field: "digest" })?;
    let key = hex::decode(key_hex.trim()).map_err(|_| CommitmentError::InvalidHex { field: "key" })?;

    let digest: [u8; DIGEST_LEN] = digest
        .as_slice()
        .try_into()
        .map_err(|_| CommitmentError::InvalidDigestLength(digest.len()))?;
    let key: [u8; KEY_LEN] = key
        .as_slice()
        .try_into()
        .map_err(|_| CommitmentError::InvalidKeyLength(key.len()))?;

    if verify_commitment(&digest, &key, number) {
        Ok(())
    } else {
        Err(CommitmentError::VerificationFailed)
    }
}

/// A sealed number: the digest may be shown right away, the key and number
/// only once the counterpart has answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    key: [u8; KEY_LEN],
    number: u64,
    digest: [u8; DIGEST_LEN],
}

impl Commitment {
    /// Seal `number` under `key`.
    pub fn seal(key: [u8; KEY_LEN], number: u64) -> Self {
        let digest = compute_digest(&key, number);
        Self {
            key,
            number,
            digest,
        }
    }

    pub fn digest(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    /// Published form of the digest.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Revealed form of the key.
    pub fn key_hex(&self) -> String {
        hex::encode(self.key)
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// Recompute the digest from the key and number.
    pub fn verify(&self) -> bool {
        verify_commitment(&self.digest, &self.key, self.number)
    }
}
