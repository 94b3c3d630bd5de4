//! Commutative SHA-256 combiner.
//!
//! Every digest in the dictionary is produced by [`combine`], which hashes
//! the concatenation of its two operands after sorting them.  Because the
//! operand order does not matter, a verifier can fold a flat sequence of
//! proof entries left to right without knowing which side each sibling sat
//! on.  The empty byte string ([`NIL`]) stands for "no further data".

use sha2::{Digest as _, Sha256};
use std::cmp::Ordering;
use std::fmt;

/// Length in bytes of a SHA-256 output.
pub const DIGEST_LEN: usize = 32;

/// Placeholder value contributed by a `+∞` sentinel.
pub const NIL: &[u8] = &[];

/// Raw SHA-256 output.
pub type DigestBytes = [u8; DIGEST_LEN];

/// Lexicographic order over bytes read as `i8`.  A proper prefix sorts
/// first, so [`NIL`] precedes every other operand.
fn signed_cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(|&x| x as i8)
        .cmp(b.iter().map(|&x| x as i8))
}

/// Hashes `a` and `b` in signed-byte lexicographic order so that
/// `combine(a, b) == combine(b, a)`.
pub fn combine(a: &[u8], b: &[u8]) -> DigestBytes {
    let (lo, hi) = match signed_cmp(a, b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };
    let mut hasher = Sha256::new();
    hasher.update(lo);
    hasher.update(hi);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Digest committed to by a node or published in a confirmation.
///
/// A node whose right neighbour is the `+∞` sentinel carries the empty
/// digest; every other digest is a full SHA-256 output.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// The empty digest, equal to [`NIL`].
    pub fn nil() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` for the empty digest.
    pub fn is_nil(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the digest, returning the owned bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Hex rendering of the digest bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub(crate) fn of(a: &[u8], b: &[u8]) -> Self {
        Self(combine(a, b).to_vec())
    }
}

impl From<DigestBytes> for Digest {
    fn from(bytes: DigestBytes) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("nil")
        } else {
            f.write_str(&self.to_hex())
        }
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn combine_is_commutative() {
        let a1 = [1u8, 2, 3, 4];
        let a2 = [5u8, 6, 7];
        let a3 = [8u8, 9];
        let p1 = combine(&a1, &a2);
        let p2 = combine(&a2, &a1);
        assert_eq!(p1, p2);
        assert_eq!(combine(&p1, &a3), combine(&a3, &p2));
    }

    #[test]
    fn combine_with_nil() {
        let a = [5u8, 6, 7];
        assert_eq!(combine(NIL, &a), combine(&a, NIL));
        assert_ne!(combine(NIL, &a), combine(&a, &a));
    }

    fn sha256_concat(lo: &[u8], hi: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(lo);
        hasher.update(hi);
        hasher.finalize().to_vec()
    }

    #[test]
    fn combine_sorts_bytes_as_signed() {
        // 0x80 is -128 and sorts before 0x00.
        assert_eq!(signed_cmp(&[0x80], &[0x00]), Ordering::Less);
        assert_eq!(combine(&[0x00], &[0x80])[..], sha256_concat(&[0x80], &[0x00])[..]);
        assert_eq!(combine(&[0x80], &[0x00])[..], sha256_concat(&[0x80], &[0x00])[..]);

        let lo = [0x00u8, 0xff];
        let hi = [0x7fu8];
        assert_eq!(combine(&hi, &lo)[..], sha256_concat(&lo, &hi)[..]);
    }

    #[test]
    fn negative_keys_sort_below_positive() {
        let min = i32::MIN.to_be_bytes();
        let one = 1i32.to_be_bytes();
        assert_eq!(combine(&one, &min)[..], sha256_concat(&min, &one)[..]);
        let minus_one = (-1i32).to_be_bytes();
        assert_eq!(combine(&one, &minus_one)[..], sha256_concat(&minus_one, &one)[..]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(signed_cmp(&[0x80], &[0x80, 0x00]), Ordering::Less);
        assert_eq!(signed_cmp(NIL, &[0x80]), Ordering::Less);
        assert_eq!(combine(&[0x80, 0x00], &[0x80])[..], sha256_concat(&[0x80], &[0x80, 0x00])[..]);
    }

    #[test]
    fn digest_display() {
        assert_eq!(Digest::nil().to_string(), "nil");
        let d = Digest::of(b"a", b"b");
        assert_eq!(d.to_string().len(), 2 * DIGEST_LEN);
        assert!(!d.is_nil());
    }

    proptest! {
        #[test]
        fn combine_commutes_on_arbitrary_bytes(
            a in proptest::collection::vec(any::<u8>(), 0..48),
            b in proptest::collection::vec(any::<u8>(), 0..48),
        ) {
            prop_assert_eq!(combine(&a, &b), combine(&b, &a));
            let (lo, hi) = if signed_cmp(&a, &b) == Ordering::Greater { (&b, &a) } else { (&a, &b) };
            prop_assert_eq!(combine(&a, &b).to_vec(), sha256_concat(lo, hi));
        }
    }
}
