//! Errors raised while checking or decoding proofs.

use thiserror::Error;

/// Failure to interpret a [`Proof`](crate::Proof) or
/// [`Confirmation`](crate::Confirmation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("malformed proof: {entries} sequence entries, at least 2 required")]
    /// The authentication path is too short to fold.
    Malformed {
        /// Number of entries the proof carried.
        entries: usize,
    },
    #[error("invalid JSON: {0}")]
    /// The serialized form could not be parsed.
    InvalidJson(String),
    #[error("invalid hex: {0}")]
    /// A byte string was not valid hex.
    InvalidHex(String),
    #[error("invalid key encoding ({0} bytes)")]
    /// The encoded key has the wrong width for the key type.
    InvalidKeyLength(usize),
    #[error("invalid digest length {0}")]
    /// A confirmation digest is not 32 bytes.
    InvalidDigestLength(usize),
}

impl From<serde_json::Error> for ProofError {
    fn from(err: serde_json::Error) -> Self {
        ProofError::InvalidJson(err.to_string())
    }
}

impl From<hex::FromHexError> for ProofError {
    fn from(err: hex::FromHexError) -> Self {
        ProofError::InvalidHex(err.to_string())
    }
}
