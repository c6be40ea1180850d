use crate::arena::TypedArena;
use crate::error::Result;
use crate::treap::node::Node;
use crate::treap::tree::{self, Arena, Tree};
use log::{debug, trace};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::fmt::Display;
use std::io::{self, Write};

/// An ordered set implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left subtree
/// and less than all keys occuring in its right subtree. The priority of a node is greater than or
/// equal to the priority of all nodes in its subtrees. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Nodes are stored in a `TypedArena` and linked by index. The blocks of removed nodes are reused
/// by later insertions. Priorities are drawn from a random number generator owned by the set, which
/// can be seeded or supplied by the caller for reproducible trees.
///
/// # Examples
///
/// ```
/// use arena_treap::TreapSet;
///
/// let mut t = TreapSet::new();
/// t.insert(0);
/// t.insert(3);
///
/// assert_eq!(t.len(), 2);
/// assert!(t.contains(&3));
///
/// assert_eq!(t.remove(&0), Some(0));
/// assert_eq!(t.remove(&1), None);
/// ```
pub struct TreapSet<T, R = XorShiftRng> {
    root: Tree,
    arena: Arena<T>,
    rng: R,
}

impl<T: Ord> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>` whose generator is seeded from the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let t: TreapSet<u32> = TreapSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_rng(rand::weak_rng())
    }

    /// Constructs a new, empty `TreapSet<T>` whose generator is seeded with `seed`. Two sets built
    /// with the same seed and the same sequence of operations have identical shapes.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let t: TreapSet<u32> = TreapSet::with_seed([1, 2, 3, 4]);
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_rng(XorShiftRng::from_seed(seed))
    }
}

impl<T: Ord, R: Rng> TreapSet<T, R> {
    /// Constructs a new, empty `TreapSet<T, R>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    /// use rand::StdRng;
    ///
    /// let t: TreapSet<u32, StdRng> = TreapSet::with_rng(StdRng::new().unwrap());
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapSet {
            root: None,
            arena: TypedArena::new(),
            rng,
        }
    }

    /// Inserts a key into the treap. Returns `true` if the key was not present. If the key already
    /// exists the treap is left untouched and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.insert(1), true);
    /// assert_eq!(t.insert(1), false);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        if tree::contains(&self.arena, self.root, &key) {
            trace!("key already present, skipping insertion");
            return false;
        }
        self.insert_absent(key);
        true
    }

    /// Inserts a key into the treap like `insert`, but reserves space for the new node first and
    /// returns `Error::AllocationFailed` if the arena cannot grow. The treap is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.try_insert(1).unwrap(), true);
    /// assert_eq!(t.try_insert(1).unwrap(), false);
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<bool> {
        if tree::contains(&self.arena, self.root, &key) {
            trace!("key already present, skipping insertion");
            return Ok(false);
        }
        self.arena.try_reserve(1)?;
        self.insert_absent(key);
        Ok(true)
    }

    fn insert_absent(&mut self, key: T) {
        let TreapSet {
            ref mut root,
            ref mut arena,
            ref mut rng,
        } = self;
        let priority = rng.next_u64();
        trace!("inserting key with priority {}", priority);
        *root = tree::insert(arena, root.take(), Node::new(key, priority));
    }

    /// Removes a key from the treap. If the key exists in the treap, it will return the removed
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// assert_eq!(t.remove(&1), Some(1));
    /// assert_eq!(t.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let TreapSet {
            ref mut root,
            ref mut arena,
            ..
        } = self;
        let (new_root, ret) = tree::remove(arena, root.take(), key);
        *root = new_root;
        match ret {
            Some(_) => trace!("removed key, {} keys remain", arena.len()),
            None => trace!("key not present, nothing removed"),
        }
        ret
    }

    /// Checks if a key exists in the treap. An empty treap contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.contains(&1), false);
    /// t.insert(1);
    /// assert_eq!(t.contains(&0), false);
    /// assert_eq!(t.contains(&1), true);
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.arena, self.root, key)
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the treap holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key from the treap. The generator keeps its state.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// t.clear();
    /// assert!(t.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing treap of {} keys", self.arena.len());
        self.root = None;
        self.arena.clear();
    }

    /// Returns every key paired with its priority, in ascending key order. Intended for debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(2);
    /// t.insert(1);
    /// let keys: Vec<u32> = t.traverse().into_iter().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![1, 2]);
    /// ```
    pub fn traverse(&self) -> Vec<(&T, u64)> {
        let mut nodes = Vec::with_capacity(self.arena.len());
        tree::traverse(&self.arena, self.root, &mut nodes);
        nodes.into_iter().map(|node| (&node.key, node.priority)).collect()
    }

    /// Writes one line per key, `"{key} {priority}"`, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// let mut out = Vec::new();
    /// t.write_tree(&mut out).unwrap();
    /// assert!(String::from_utf8(out).unwrap().starts_with("1 "));
    /// ```
    pub fn write_tree<W: Write>(&self, mut writer: W) -> io::Result<()>
    where
        T: Display,
    {
        for (key, priority) in self.traverse() {
            writeln!(writer, "{} {}", key, priority)?;
        }
        Ok(())
    }

    /// Prints the treap to standard output in the format of `write_tree`.
    pub fn print(&self) -> io::Result<()>
    where
        T: Display,
    {
        let stdout = io::stdout();
        let handle = stdout.lock();
        self.write_tree(handle)
    }
}

impl<T: Ord> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TreapSet;

    #[test]
    fn test_len_empty() {
        let t: TreapSet<u32> = TreapSet::with_seed([1, 1, 1, 1]);
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert!(!t.contains(&0));
    }

    #[test]
    fn test_duplicate_insert_draws_no_priority() {
        let mut t = TreapSet::with_seed([1, 1, 1, 1]);
        let mut u = TreapSet::with_seed([1, 1, 1, 1]);
        t.insert(1);
        t.insert(1);
        t.insert(2);
        u.insert(1);
        u.insert(2);
        assert_eq!(t.traverse(), u.traverse());
    }

    #[test]
    fn test_removed_blocks_are_reused() {
        let mut t = TreapSet::with_seed([1, 1, 1, 1]);
        for key in 0..100 {
            t.insert(key);
        }
        for key in 0..50 {
            assert_eq!(t.remove(&key), Some(key));
        }
        for key in 100..150 {
            t.insert(key);
        }
        assert_eq!(t.len(), 100);
        assert_eq!(t.arena.blocks(), 100);
    }

    #[test]
    fn test_try_insert_reserves() {
        let mut t = TreapSet::with_seed([1, 1, 1, 1]);
        assert_eq!(t.try_insert(3).unwrap(), true);
        assert_eq!(t.try_insert(3).unwrap(), false);
        assert_eq!(t.try_insert(4).unwrap(), true);
        assert_eq!(t.len(), 2);
        assert_eq!(t.arena.blocks(), 2);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut t = TreapSet::with_seed([1, 1, 1, 1]);
        t.insert(1);
        t.insert(2);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(!t.contains(&1));
        assert!(t.insert(1));
        assert_eq!(t.len(), 1);
    }
}
