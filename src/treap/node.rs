use crate::treap::tree::Tree;

/// A struct representing an internal node of a treap.
pub struct Node<T> {
    pub key: T,
    pub priority: u64,
    pub left: Tree,
    pub right: Tree,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u64) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }
}
