//! Lock-guarded handle for sharing one dictionary between threads.
//!
//! Writers take the lock exclusively and read the new confirmation before
//! releasing it, so a confirmation handed out by [`SharedDictionary`] always
//! belongs to a completed mutation.

use crate::dict::AuthDict;
use crate::key::DictKey;
use crate::proof::{Confirmation, Proof};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable single-writer / multi-reader handle over an [`AuthDict`].
#[derive(Debug, Clone)]
pub struct SharedDictionary<K: DictKey> {
    inner: Arc<RwLock<AuthDict<K>>>,
}

impl<K: DictKey> SharedDictionary<K> {
    /// Wraps an existing dictionary.
    pub fn new(dict: AuthDict<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dict)),
        }
    }

    /// Inserts `key` and returns the confirmation that follows it.
    pub fn insert(&self, key: K) -> Confirmation {
        let mut dict = self.inner.write();
        dict.insert(key);
        dict.confirmation()
    }

    /// Deletes `key` and returns the confirmation that follows it.
    pub fn delete(&self, key: K) -> Confirmation {
        let mut dict = self.inner.write();
        dict.delete(key);
        dict.confirmation()
    }

    /// Returns `true` if `key` is stored.
    pub fn find(&self, key: K) -> bool {
        self.inner.read().find(key)
    }

    /// Builds a proof for `key`.
    pub fn make_proof(&self, key: K) -> Proof<K> {
        self.inner.read().make_proof(key)
    }

    /// Current confirmation.
    pub fn confirmation(&self) -> Confirmation {
        self.inner.read().confirmation()
    }

    /// Proof for `key` together with the confirmation of the same version.
    pub fn snapshot(&self, key: K) -> (Proof<K>, Confirmation) {
        let dict = self.inner.read();
        (dict.make_proof(key), dict.confirmation())
    }
}

impl<K: DictKey> From<AuthDict<K>> for SharedDictionary<K> {
    fn from(dict: AuthDict<K>) -> Self {
        Self::new(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{validate, ValidationResult};
    use std::thread;

    #[test]
    fn writers_publish_after_mutation() {
        let shared = SharedDictionary::new(AuthDict::with_seed(31));
        let conf = shared.insert(7);
        assert_eq!(conf.version(), 1);
        assert_eq!(conf, shared.confirmation());
        let (proof, current) = shared.snapshot(7);
        assert!(proof.present());
        assert_eq!(validate(&proof, &current).unwrap(), ValidationResult::Correct);
        let conf = shared.delete(7);
        assert_eq!(conf.version(), 2);
        assert!(!shared.find(7));
    }

    #[test]
    fn concurrent_readers_see_complete_versions() {
        let shared: SharedDictionary<i32> = AuthDict::with_seed(32).into();
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for key in 0..200 {
                    shared.insert(key);
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|offset| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for key in 0..200 {
                        let (proof, conf) = shared.snapshot(key + offset);
                        assert_eq!(proof.version(), conf.version());
                        assert_eq!(validate(&proof, &conf).unwrap(), ValidationResult::Correct);
                    }
                })
            })
            .collect();
        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.confirmation().version(), 200);
        assert!((0..200).all(|key| shared.find(key)));
    }
}
