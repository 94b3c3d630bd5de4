//! Stateless proof validation.
//!
//! The validator never sees the dictionary.  It folds the proof's sequence
//! with the commutative combiner, adds the root's own `+∞` term, and compares
//! the result with the published digest.

use crate::error::ProofError;
use crate::hash::{combine, DigestBytes, NIL};
use crate::key::DictKey;
use crate::proof::{Confirmation, Proof};
use tracing::debug;

/// Outcome of checking a proof against a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// The proof recomputes the confirmed digest.
    Correct,
    /// The digests differ and the proof is not older than the confirmation.
    Wrong,
    /// The digests differ and the proof predates the confirmation.
    Outdated,
}

/// Recomputes the root digest implied by a proof sequence.
pub fn fold_sequence(sequence: &[Vec<u8>]) -> Result<DigestBytes, ProofError> {
    let [first, second, rest @ ..] = sequence else {
        return Err(ProofError::Malformed {
            entries: sequence.len(),
        });
    };
    let mut acc = combine(first, second);
    for entry in rest {
        acc = combine(&acc, entry);
    }
    Ok(combine(&acc, NIL))
}

/// Checks `proof` against `confirmation`.
///
/// A matching digest is [`ValidationResult::Correct`] regardless of the
/// version stamps.  On a mismatch, a proof stamped with an older version
/// than the confirmation is reported as [`ValidationResult::Outdated`];
/// anything else is [`ValidationResult::Wrong`].
pub fn validate<K: DictKey>(
    proof: &Proof<K>,
    confirmation: &Confirmation,
) -> Result<ValidationResult, ProofError> {
    let digest = fold_sequence(proof.sequence())?;
    if digest[..] == *confirmation.digest().as_bytes() {
        return Ok(ValidationResult::Correct);
    }
    let result = if proof.version() < confirmation.version() {
        ValidationResult::Outdated
    } else {
        ValidationResult::Wrong
    };
    debug!(
        key = ?proof.key(),
        proof_version = proof.version(),
        confirmed_version = confirmation.version(),
        ?result,
        "proof digest mismatch"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Digest;
    use crate::AuthDict;

    #[test]
    fn short_sequences_are_malformed() {
        let conf = Confirmation::new(0, Digest::nil());
        let empty: Proof<i32> = Proof::new(1, 0, false, Vec::new());
        assert_eq!(
            validate(&empty, &conf),
            Err(ProofError::Malformed { entries: 0 })
        );
        let single: Proof<i32> = Proof::new(1, 0, false, vec![vec![0, 0, 0, 1]]);
        assert_eq!(
            validate(&single, &conf),
            Err(ProofError::Malformed { entries: 1 })
        );
    }

    #[test]
    fn empty_dictionary_fold() {
        let dict: AuthDict<i32> = AuthDict::with_seed(0);
        let sentinel = i32::MIN.to_be_bytes();
        let expected = combine(&combine(NIL, &sentinel), NIL);
        assert_eq!(dict.root_digest().as_bytes(), &expected[..]);
        let proof = dict.make_proof(1);
        assert_eq!(proof.sequence(), &[NIL.to_vec(), sentinel.to_vec()][..]);
        assert_eq!(fold_sequence(proof.sequence()).unwrap(), expected);
    }

    #[test]
    fn tampered_entry_is_wrong() {
        let dict = AuthDict::from_keys_with_seed(1..=64, 21);
        let conf = dict.confirmation();
        let proof = dict.make_proof(33);
        let mut sequence = proof.sequence().to_vec();
        let last = sequence.len() - 1;
        sequence[last].push(0);
        let forged = Proof::new(proof.key(), proof.version(), proof.present(), sequence);
        assert_eq!(validate(&forged, &conf).unwrap(), ValidationResult::Wrong);
    }

    #[test]
    fn newer_proof_against_older_confirmation_is_wrong() {
        let mut dict = AuthDict::from_keys_with_seed([1, 2, 3], 22);
        let old = dict.confirmation();
        dict.insert(10);
        let proof = dict.make_proof(10);
        assert_eq!(validate(&proof, &old).unwrap(), ValidationResult::Wrong);
    }
}
