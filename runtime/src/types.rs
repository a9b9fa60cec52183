//! # Fixed-Width Identifiers
//!
//! Every identifier the contracts deal in — token ids, party identifiers,
//! contract addresses — is an opaque 32-byte value. Equality is exact
//! byte-for-byte comparison: no case folding, no padding tolerance, no
//! truncation. The human-facing encoding is lowercase hex without a `0x`
//! prefix, which is also how the value travels through serde so that JSON
//! ledger dumps stay readable.

use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a [`Bytes32`] out of its hex encoding.
#[derive(Debug, Error, PartialEq)]
pub enum ParseBytes32Error {
    /// The input did not decode as hex at all.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The input decoded, but not to exactly 32 bytes.
    #[error("wrong length: expected 32 bytes, got {0}")]
    WrongLength(usize),
}

/// An opaque 32-byte identifier.
///
/// Used for token ids, owner/creator identifiers, and contract addresses.
/// The contracts never interpret the bytes; they only compare and copy them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    /// Wraps a raw 32-byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Bytes32(bytes)
    }

    /// Returns a fresh identifier filled with OS entropy.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Bytes32(bytes)
    }

    /// Builds an identifier from a small integer, big-endian in the low
    /// bytes. Handy for tests and demo fixtures (`1` → `0x00…01`).
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Bytes32(bytes)
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding, 64 characters, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Bytes32(bytes)
    }
}

impl FromStr for Bytes32 {
    type Err = ParseBytes32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A stripped `0x` prefix is the one leniency we allow on input;
        // output is always unprefixed.
        let s = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(s)?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| ParseBytes32Error::WrongLength(decoded.len()))?;
        Ok(Bytes32(bytes))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({})", self.to_hex())
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
