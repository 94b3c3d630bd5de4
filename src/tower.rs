//! Skip-list tower engine.
//!
//! Levels are singly-linked chains bounded by `−∞`/`+∞` sentinels, with
//! down links joining copies of the same key on consecutive levels.  Nodes
//! live in one arena and refer to each other by [`NodeId`]; unlinked slots go
//! on a free list and are reused by later splices.
//!
//! The engine only maintains shape (keys, links and plateau flags).  Cached
//! digests are stored on the nodes but computed by the dictionary.

use crate::hash::Digest;
use crate::key::DictKey;
use rand::Rng;
use std::ops::{Index, IndexMut};

/// Stable arena index of a node.
pub(crate) type NodeId = usize;

/// Position of a node on the number line.  Sentinels sort outside every key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Bound<K> {
    NegInf,
    Key(K),
    PosInf,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) bound: Bound<K>,
    pub(crate) right: Option<NodeId>,
    pub(crate) down: Option<NodeId>,
    /// No node on the level above has `down` pointing here.
    pub(crate) plateau: bool,
    pub(crate) digest: Digest,
}

impl<K> Node<K> {
    fn new(bound: Bound<K>, right: Option<NodeId>, down: Option<NodeId>) -> Self {
        Self {
            bound,
            right,
            down,
            plateau: true,
            digest: Digest::nil(),
        }
    }
}

/// How far a descent advances along each level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Stop on the last node strictly smaller than the target.
    Before,
    /// Stop on the last node smaller than or equal to the target.
    Through,
}

/// Nodes touched by a root-to-bottom descent.
#[derive(Debug, Default)]
pub(crate) struct Descent {
    /// Every visited node, top level first and left to right within a level.
    pub(crate) visited: Vec<NodeId>,
    /// The node the descent stopped on at each level, top level first.
    pub(crate) stops: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Tower<K> {
    nodes: Vec<Node<K>>,
    free: Vec<NodeId>,
    /// `−∞` sentinel of every level, bottom level first.
    heads: Vec<NodeId>,
    /// `+∞` sentinel of every level, bottom level first.
    tails: Vec<NodeId>,
    len: usize,
}

impl<K: DictKey> Tower<K> {
    /// Builds a tower over `sorted` (strictly increasing) using one fair coin
    /// per node and level.  The top level is always sentinel-only, so an
    /// empty `sorted` yields two levels.  Digests are left unset.
    pub(crate) fn build<R: Rng + ?Sized>(sorted: &[K], rng: &mut R) -> Self {
        let mut tower = Self {
            nodes: Vec::with_capacity(2 * sorted.len() + 4),
            free: Vec::new(),
            heads: Vec::new(),
            tails: Vec::new(),
            len: 0,
        };
        tower.push_sentinels(None, None);
        let mut last = tower.heads[0];
        for &key in sorted {
            last = tower.splice_after(last, key, None);
        }

        loop {
            let below = tower.level_ids(tower.height() - 1);
            tower.push_level();
            let top = tower.height() - 1;
            let mut last = tower.heads[top];
            let mut promoted = false;
            for id in below {
                let Bound::Key(key) = tower[id].bound else {
                    continue;
                };
                if rng.gen::<bool>() {
                    last = tower.splice_after(last, key, Some(id));
                    tower[id].plateau = false;
                    promoted = true;
                }
            }
            if !promoted {
                break;
            }
        }
        tower
    }

    /// Number of levels, including the sentinel-only top level.
    pub(crate) fn height(&self) -> usize {
        self.heads.len()
    }

    /// Number of keys stored on the bottom level.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// `−∞` sentinel of the top level.
    pub(crate) fn root(&self) -> NodeId {
        self.heads[self.heads.len() - 1]
    }

    /// Right neighbour of `id`; `None` only for `+∞` sentinels.
    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self[id].right
    }

    /// Ids of every node on `level`, left to right, sentinels included.
    pub(crate) fn level_ids(&self, level: usize) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut cur = Some(self.heads[level]);
        while let Some(id) = cur {
            ids.push(id);
            cur = self[id].right;
        }
        ids
    }

    /// Bottom-level node after which `key` is or would be stored.
    pub(crate) fn predecessor(&self, key: K) -> NodeId {
        let target = Bound::Key(key);
        let mut cur = self.root();
        loop {
            while let Some(next) = self[cur].right {
                if self[next].bound >= target {
                    break;
                }
                cur = next;
            }
            match self[cur].down {
                Some(down) => cur = down,
                None => return cur,
            }
        }
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        let pred = self.predecessor(key);
        self[pred]
            .right
            .is_some_and(|next| self[next].bound == Bound::Key(key))
    }

    /// Walks from the root to the bottom level recording every node visited.
    pub(crate) fn descend(&self, key: K, step: Step) -> Descent {
        let target = Bound::Key(key);
        let advance = |bound: Bound<K>| match step {
            Step::Before => bound < target,
            Step::Through => bound <= target,
        };
        let mut descent = Descent::default();
        let mut cur = self.root();
        loop {
            descent.visited.push(cur);
            while let Some(next) = self[cur].right {
                if !advance(self[next].bound) {
                    break;
                }
                cur = next;
                descent.visited.push(cur);
            }
            descent.stops.push(cur);
            match self[cur].down {
                Some(down) => cur = down,
                None => return descent,
            }
        }
    }

    /// Inserts a node for `key` directly after `pred` and returns its id.
    pub(crate) fn splice_after(&mut self, pred: NodeId, key: K, down: Option<NodeId>) -> NodeId {
        let node = Node::new(Bound::Key(key), self[pred].right, down);
        let id = self.alloc(node);
        self[pred].right = Some(id);
        if down.is_none() {
            self.len += 1;
        }
        id
    }

    /// Unlinks the right neighbour of `pred` and frees its slot.
    pub(crate) fn unlink_after(&mut self, pred: NodeId) -> Option<NodeId> {
        let victim = self[pred].right?;
        if self[victim].right.is_none() {
            return None;
        }
        self[pred].right = self[victim].right;
        if self[victim].down.is_none() {
            self.len -= 1;
        }
        self.free.push(victim);
        Some(victim)
    }

    /// Adds a sentinel-only level above the current top.
    pub(crate) fn push_level(&mut self) {
        let head = self.root();
        let tail = self.tails[self.tails.len() - 1];
        self[head].plateau = false;
        self[tail].plateau = false;
        self.push_sentinels(Some(head), Some(tail));
    }

    /// Keys in ascending order.
    pub(crate) fn keys(&self) -> Keys<'_, K> {
        Keys {
            tower: self,
            cur: self[self.heads[0]].right,
        }
    }

    fn push_sentinels(&mut self, head_down: Option<NodeId>, tail_down: Option<NodeId>) {
        let tail = self.alloc(Node::new(Bound::PosInf, None, tail_down));
        let head = self.alloc(Node::new(Bound::NegInf, Some(tail), head_down));
        self.heads.push(head);
        self.tails.push(tail);
    }

    fn alloc(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}

impl<K> Index<NodeId> for Tower<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }
}

impl<K> IndexMut<NodeId> for Tower<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id]
    }
}

/// Ascending iterator over the keys of a dictionary.
#[derive(Debug, Clone)]
pub struct Keys<'a, K> {
    tower: &'a Tower<K>,
    cur: Option<NodeId>,
}

impl<'a, K: DictKey> Iterator for Keys<'a, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let id = self.cur?;
        match self.tower[id].bound {
            Bound::Key(key) => {
                self.cur = self.tower[id].right;
                Some(key)
            }
            _ => {
                self.cur = None;
                None
            }
        }
    }
}
