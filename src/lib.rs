#![deny(missing_docs)]

//! # auth_skiplist
//!
//! An authenticated dictionary built on a skip list.  The dictionary keeps a
//! sorted set of fixed-width keys and commits to its exact contents with a
//! single SHA-256 root digest.  Any key, stored or not, can be proven against
//! that digest with an `O(log n)` authentication path, and anyone holding the
//! published [`Confirmation`] can check the proof without seeing the set.
//!
//! ## Features
//!
//! * **Authenticated skip list**: [`AuthDict`] supports `find`, `insert`,
//!   `delete`, `make_proof` and `confirmation`.  Mutations rehash only the
//!   nodes on the search path.
//! * **Membership and non-membership proofs**: a [`Proof`] for an absent key
//!   authenticates its predecessor and successor instead.
//! * **Stateless validation**: [`validate`] folds the proof with a
//!   commutative SHA-256 combiner and compares it with the confirmation,
//!   reporting stale proofs as [`ValidationResult::Outdated`].
//! * **Reproducible shapes**: promotion coins come from an explicit,
//!   seedable random source.
//! * **Sharing**: [`SharedDictionary`] guards a dictionary with a
//!   reader-writer lock and publishes confirmations only after complete
//!   mutations.
//!
//! ## Usage
//!
//! ```rust
//! use auth_skiplist::{validate, AuthDict, ValidationResult};
//!
//! let mut dict = AuthDict::with_seed(7);
//! for key in [5, 2, 3] {
//!     dict.insert(key);
//! }
//! let stale = dict.make_proof(5);
//! assert_eq!(
//!     validate(&stale, &dict.confirmation()).unwrap(),
//!     ValidationResult::Correct
//! );
//!
//! dict.insert(4);
//! let confirmation = dict.confirmation();
//! assert_eq!(
//!     validate(&dict.make_proof(4), &confirmation).unwrap(),
//!     ValidationResult::Correct
//! );
//! assert_eq!(
//!     validate(&stale, &confirmation).unwrap(),
//!     ValidationResult::Outdated
//! );
//! ```
//!
//! The dictionary is single-writer: mutation takes `&mut self`.  Wrap it in
//! a [`SharedDictionary`] (or any lock) to share it between threads.

mod config;
mod dict;
mod error;
pub mod hash;
mod key;
mod proof;
mod shared;
mod tower;
mod validator;

pub use config::DictConfig;
pub use dict::AuthDict;
pub use error::ProofError;
pub use hash::{combine, Digest, DIGEST_LEN};
pub use key::DictKey;
pub use proof::{Confirmation, Proof};
pub use shared::SharedDictionary;
pub use tower::Keys;
pub use validator::{fold_sequence, validate, ValidationResult};
