//! Proof and confirmation value types.
//!
//! A [`Proof`] is the flat authentication path for one key; a
//! [`Confirmation`] is the root digest the owner publishes.  Both carry the
//! dictionary version they were taken at.  Sequence entries are either
//! encoded keys or digests, distinguished only by position, so their order is
//! preserved exactly by every conversion in this module.
//!
//! The JSON forms hex-encode every byte string.

use crate::error::ProofError;
use crate::hash::{Digest, DIGEST_LEN};
use crate::key::DictKey;
use serde::Deserialize;
use serde_json::json;

/// Evidence that a key is (or is not) stored in a specific dictionary
/// version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof<K> {
    key: K,
    version: u64,
    present: bool,
    sequence: Vec<Vec<u8>>,
}

#[derive(Deserialize)]
struct ProofWire {
    key: String,
    version: u64,
    present: bool,
    sequence: Vec<String>,
}

impl<K: DictKey> Proof<K> {
    /// Reassembles a proof from its parts, e.g. after transport.
    pub fn new(key: K, version: u64, present: bool, sequence: Vec<Vec<u8>>) -> Self {
        Self {
            key,
            version,
            present,
            sequence,
        }
    }

    /// The queried key.
    pub fn key(&self) -> K {
        self.key
    }

    /// Dictionary version the proof was built against.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the key was stored when the proof was built.
    pub fn present(&self) -> bool {
        self.present
    }

    /// The authentication path, bottom level first.
    pub fn sequence(&self) -> &[Vec<u8>] {
        &self.sequence
    }

    /// Serialises the proof to a JSON string with hex-encoded byte strings.
    pub fn to_json_string(&self) -> String {
        let sequence: Vec<String> = self.sequence.iter().map(hex::encode).collect();
        json!({
            "key": hex::encode(self.key.encode()),
            "version": self.version,
            "present": self.present,
            "sequence": sequence
        })
        .to_string()
    }

    /// Parses a proof previously emitted by [`Proof::to_json_string`].
    pub fn from_json_str(input: &str) -> Result<Self, ProofError> {
        let wire: ProofWire = serde_json::from_str(input)?;
        let key_bytes = hex::decode(&wire.key)?;
        if key_bytes.len() != K::WIDTH {
            return Err(ProofError::InvalidKeyLength(key_bytes.len()));
        }
        let key = K::decode(&key_bytes).ok_or(ProofError::InvalidKeyLength(key_bytes.len()))?;
        let sequence = wire
            .sequence
            .iter()
            .map(hex::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(key, wire.version, wire.present, sequence))
    }
}

/// Published trust anchor: a root digest and the version it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Confirmation {
    version: u64,
    digest: Digest,
}

#[derive(Deserialize)]
struct ConfirmationWire {
    version: u64,
    digest: String,
}

impl Confirmation {
    /// Creates a confirmation for `digest` at `version`.
    pub fn new(version: u64, digest: Digest) -> Self {
        Self { version, digest }
    }

    /// Dictionary version the digest was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The root digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Serialises the confirmation to a JSON string.
    pub fn to_json_string(&self) -> String {
        json!({
            "version": self.version,
            "digest": self.digest.to_hex()
        })
        .to_string()
    }

    /// Parses a confirmation previously emitted by
    /// [`Confirmation::to_json_string`].
    pub fn from_json_str(input: &str) -> Result<Self, ProofError> {
        let wire: ConfirmationWire = serde_json::from_str(input)?;
        let bytes = hex::decode(&wire.digest)?;
        if bytes.len() != DIGEST_LEN {
            return Err(ProofError::InvalidDigestLength(bytes.len()));
        }
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self::new(wire.version, Digest::from(out)))
    }
}
