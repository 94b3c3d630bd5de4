//! The authenticated dictionary.
//!
//! [`AuthDict`] keeps a skip list whose nodes double as a hash commitment.
//! Each node caches a digest derived from its right neighbour and the node
//! below it, and the `−∞` sentinel of the (always sentinel-only) top level
//! carries the digest published in every [`Confirmation`].
//!
//! Mutations rehash only the nodes visited on the way down, bottom level
//! first, so inserts and deletes cost `O(log n)` hashes in expectation.

use crate::hash::{Digest, NIL};
use crate::key::{lower_sentinel, DictKey};
use crate::proof::{Confirmation, Proof};
use crate::tower::{Bound, Keys, NodeId, Step, Tower};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, trace};

/// A skip list over `K` that commits to its contents with a root digest.
///
/// `R` supplies the promotion coins.  Seed it (see [`AuthDict::with_seed`])
/// for reproducible tower shapes.
///
/// # Examples
///
/// ```
/// use auth_skiplist::{validate, AuthDict, ValidationResult};
///
/// let mut dict = AuthDict::with_seed(42);
/// for key in [16, 5, 2, 8] {
///     dict.insert(key);
/// }
/// assert!(dict.find(8));
/// assert!(!dict.find(7));
///
/// let proof = dict.make_proof(7);
/// assert!(!proof.present());
/// assert_eq!(
///     validate(&proof, &dict.confirmation()).unwrap(),
///     ValidationResult::Correct
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AuthDict<K: DictKey, R = StdRng> {
    tower: Tower<K>,
    rng: R,
    version: u64,
}

impl<K: DictKey> AuthDict<K, StdRng> {
    /// Creates an empty dictionary seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty dictionary with a deterministic coin source.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Builds a dictionary over `keys`, seeded from system entropy.
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_keys_with_rng(keys, StdRng::from_entropy())
    }

    /// Builds a dictionary over `keys` with a deterministic coin source.
    pub fn from_keys_with_seed<I: IntoIterator<Item = K>>(keys: I, seed: u64) -> Self {
        Self::from_keys_with_rng(keys, StdRng::seed_from_u64(seed))
    }
}

impl<K: DictKey> Default for AuthDict<K, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DictKey, R: RngCore> AuthDict<K, R> {
    /// Creates an empty dictionary drawing promotions from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::from_keys_with_rng(std::iter::empty(), rng)
    }

    /// Builds a dictionary over `keys` (duplicates are ignored), drawing
    /// promotions from `rng`.
    pub fn from_keys_with_rng<I: IntoIterator<Item = K>>(keys: I, mut rng: R) -> Self {
        let mut sorted: Vec<K> = keys.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        let tower = Tower::build(&sorted, &mut rng);
        let mut dict = Self {
            tower,
            rng,
            version: 0,
        };
        dict.rehash_all();
        debug!(
            keys = dict.tower.len(),
            height = dict.tower.height(),
            "built authenticated dictionary"
        );
        dict
    }

    /// Returns `true` if `key` is stored.
    pub fn find(&self, key: K) -> bool {
        self.tower.contains(key)
    }

    /// Inserts `key`.  Inserting a stored key changes nothing.
    pub fn insert(&mut self, key: K) {
        if self.find(key) {
            return;
        }
        let descent = self.tower.descend(key, Step::Before);
        let top = self.tower.height() - 1;

        let mut below: Option<NodeId> = None;
        let mut grew = false;
        for (level, &pred) in descent.stops.iter().rev().enumerate() {
            if level > 0 && !self.rng.gen::<bool>() {
                break;
            }
            let id = self.tower.splice_after(pred, key, below);
            if let Some(lower) = below {
                self.tower[lower].plateau = false;
            }
            below = Some(id);
            grew = level == top;
        }
        if grew {
            self.tower.push_level();
        }

        for &id in descent.visited.iter().rev() {
            if let Some(right) = self.tower.right(id) {
                self.rehash(right);
            }
            self.rehash(id);
        }
        if grew {
            self.rehash(self.tower.root());
        }

        self.version += 1;
        debug!(
            ?key,
            version = self.version,
            height = self.tower.height(),
            grew,
            "inserted key"
        );
    }

    /// Removes `key`.  Removing an absent key changes nothing.
    pub fn delete(&mut self, key: K) {
        if !self.find(key) {
            return;
        }
        let descent = self.tower.descend(key, Step::Before);
        for &pred in &descent.stops {
            let hit = self
                .tower
                .right(pred)
                .is_some_and(|next| self.tower[next].bound == Bound::Key(key));
            if hit {
                self.tower.unlink_after(pred);
            }
        }
        for &id in descent.visited.iter().rev() {
            self.rehash(id);
        }

        self.version += 1;
        debug!(?key, version = self.version, "deleted key");
    }

    /// Builds a membership or non-membership proof for `key` against the
    /// current version.
    pub fn make_proof(&self, key: K) -> Proof<K> {
        let mut path = self.tower.descend(key, Step::Through).visited;
        path.reverse();
        let located = path[0];
        let present = self.tower[located].bound == Bound::Key(key);

        let mut sequence = Vec::with_capacity(path.len() + 1);
        sequence.push(self.right_term(located));
        sequence.push(self.encode(located));

        // The root's own term is folded in by the validator.
        for i in 1..path.len() - 1 {
            let v = path[i];
            let Some(w) = self.tower.right(v) else {
                continue;
            };
            if !self.tower[w].plateau {
                continue;
            }
            if w != path[i - 1] {
                sequence.push(self.tower[w].digest.as_bytes().to_vec());
            } else {
                match self.tower[v].down {
                    None => sequence.push(self.encode(v)),
                    Some(down) => sequence.push(self.tower[down].digest.as_bytes().to_vec()),
                }
            }
        }

        trace!(
            ?key,
            present,
            entries = sequence.len(),
            version = self.version,
            "built proof"
        );
        Proof::new(key, self.version, present, sequence)
    }

    /// Snapshot of the current root digest and version.
    pub fn confirmation(&self) -> Confirmation {
        Confirmation::new(self.version, self.root_digest().clone())
    }

    /// Digest of the root node.
    pub fn root_digest(&self) -> &Digest {
        &self.tower[self.tower.root()].digest
    }

    /// Number of structural mutations applied since construction.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.tower.len()
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.tower.len() == 0
    }

    /// Number of levels, including the sentinel-only top level.
    pub fn height(&self) -> usize {
        self.tower.height()
    }

    /// Stored keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K> {
        self.tower.keys()
    }

    fn encode(&self, id: NodeId) -> Vec<u8> {
        match self.tower[id].bound {
            Bound::NegInf => lower_sentinel::<K>(),
            Bound::Key(key) => key.encode(),
            Bound::PosInf => NIL.to_vec(),
        }
    }

    /// What a bottom-level node learns from its right neighbour: the
    /// neighbour's digest if it is a plateau, otherwise its key (or NIL for
    /// `+∞`).
    fn right_term(&self, id: NodeId) -> Vec<u8> {
        let Some(w) = self.tower.right(id) else {
            return NIL.to_vec();
        };
        let right = &self.tower[w];
        if right.plateau {
            right.digest.as_bytes().to_vec()
        } else if right.right.is_none() {
            NIL.to_vec()
        } else {
            self.encode(w)
        }
    }

    fn rehash(&mut self, id: NodeId) {
        let node = &self.tower[id];
        let digest = match (node.right, node.down) {
            (None, _) => Digest::nil(),
            (Some(_), None) => Digest::of(&self.encode(id), &self.right_term(id)),
            (Some(w), Some(down)) => {
                let below = &self.tower[down].digest;
                if self.tower[w].plateau {
                    Digest::of(below.as_bytes(), self.tower[w].digest.as_bytes())
                } else {
                    below.clone()
                }
            }
        };
        self.tower[id].digest = digest;
    }

    /// Rehashes every node, lower levels first and right to left within a
    /// level.
    fn rehash_all(&mut self) {
        for level in 0..self.tower.height() {
            for id in self.tower.level_ids(level).into_iter().rev() {
                self.rehash(id);
            }
        }
    }
}
