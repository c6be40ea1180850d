//! Index-addressed storage for treap nodes.

use crate::error::Result;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry {
    index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Entry>),
}

/// A growable arena that stores a single type of object.
///
/// Objects are addressed by `Entry` handles that stay valid until the object is freed. Freed
/// blocks are threaded onto a free list and handed out again by later allocations, so the number
/// of blocks never exceeds the peak number of live objects. The underlying container is a `Vec`
/// and the arena uses no unsafe code.
///
/// # Examples
///
/// ```
/// use arena_treap::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Entry>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Ensures that the next `additional` allocations will not need to grow the underlying
    /// storage. Returns `Error::AllocationFailed` if the storage cannot grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::arena::TypedArena;
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.try_reserve(16).is_ok());
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self.blocks.len() - self.len;
        if additional > vacant {
            self.blocks.try_reserve(additional - vacant)?;
        }
        Ok(())
    }

    /// Allocates an object in the arena and returns its `Entry`. A block released by `free` is
    /// reused before the storage grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Entry {
                    index: self.blocks.len() - 1,
                }
            },
            Some(entry) => {
                let vacant_block = mem::replace(&mut self.blocks[entry.index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_entry) => {
                        self.head = next_entry;
                        entry
                    },
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is out of bounds or refers to a vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_treap::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, entry: Entry) -> T {
        if entry.index >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[entry.index], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(next_entry) => {
                self.blocks[entry.index] = Block::Vacant(next_entry);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(entry);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the entry does not
    /// refer to a live object.
    pub fn get(&self, entry: Entry) -> Option<&T> {
        match self.blocks.get(entry.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the entry does not
    /// refer to a live object.
    pub fn get_mut(&mut self, entry: Entry) -> Option<&mut T> {
        match self.blocks.get_mut(entry.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object and releases the free list.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks, live or vacant, the arena has handed out.
    pub fn blocks(&self) -> usize {
        self.blocks.len()
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Entry> for TypedArena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &Self::Output {
        self.get(entry).expect("Error: entry out of bounds.")
    }
}

impl<T> IndexMut<Entry> for TypedArena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut Self::Output {
        self.get_mut(entry).expect("Error: entry out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new();
        arena.free(Entry { index: 0 });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new();
        let entry = arena.allocate(0);
        arena.free(entry);
        arena.free(entry);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new();
        assert_eq!(arena.allocate(0), Entry { index: 0 });
        assert_eq!(arena.allocate(0), Entry { index: 1 });
        assert_eq!(arena.allocate(0), Entry { index: 2 });
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_blocks_last_in_first_out() {
        let mut arena = TypedArena::new();
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        arena.allocate(2);
        assert_eq!(arena.free(a), 0);
        assert_eq!(arena.free(b), 1);
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.allocate(3), b);
        assert_eq!(arena.allocate(4), a);
        assert_eq!(arena.allocate(5), Entry { index: 3 });
        assert_eq!(arena.blocks(), 4);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new();
        let entry = arena.allocate(0);
        arena.free(entry);
        assert_eq!(arena.get(entry), None);
        assert_eq!(arena.get(Entry { index: 7 }), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new();
        let entry = arena.allocate(0);
        *arena.get_mut(entry).unwrap() = 1;
        assert_eq!(arena.get(entry), Some(&1));
    }

    #[test]
    fn test_try_reserve_counts_vacant_blocks() {
        let mut arena = TypedArena::new();
        let entry = arena.allocate(0);
        arena.free(entry);
        assert!(arena.try_reserve(1).is_ok());
        assert!(arena.try_reserve(64).is_ok());
        assert_eq!(arena.blocks(), 1);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new();
        arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.blocks(), 0);
        assert_eq!(arena.allocate(2), Entry { index: 0 });
    }
}
