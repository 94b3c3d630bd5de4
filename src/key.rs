//! Canonical fixed-width key encodings.
//!
//! Digests commit to keys through their big-endian encoding.  The `−∞`
//! sentinel borrows the encoding of the key type's minimum value.

use std::fmt;

/// A key storable in the dictionary.
///
/// Implementations must encode every value to exactly [`DictKey::WIDTH`]
/// bytes, and [`DictKey::decode`] must invert [`DictKey::encode`].
pub trait DictKey: Ord + Copy + fmt::Debug + Send + Sync + 'static {
    /// Width of the canonical encoding in bytes.
    const WIDTH: usize;
    /// Smallest value of the key domain.
    const MIN: Self;

    /// Canonical big-endian encoding.
    fn encode(&self) -> Vec<u8>;

    /// Parses a canonical encoding, returning `None` on a width mismatch.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_dict_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DictKey for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const MIN: Self = <$ty>::MIN;

                fn encode(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }

                fn decode(bytes: &[u8]) -> Option<Self> {
                    let raw = bytes.try_into().ok()?;
                    Some(<$ty>::from_be_bytes(raw))
                }
            }
        )*
    };
}

impl_dict_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

/// Encoding committed for the `−∞` sentinel.
pub(crate) fn lower_sentinel<K: DictKey>() -> Vec<u8> {
    K::MIN.encode()
}
