//! Recursive treap primitives over arena-allocated nodes.
//!
//! Every function takes the subtree it works on by value and returns the subtree that replaces
//! it. Recursion depth is bounded by the height of the tree, which is `O(log N)` in expectation
//! because priorities are drawn uniformly at random.

use crate::arena::{Entry, TypedArena};
use crate::treap::node::Node;
use std::cmp::Ordering;

pub type Tree = Option<Entry>;

pub type Arena<T> = TypedArena<Node<T>>;

/// Partitions `tree` into the keys less than `key` and the keys greater than or equal to `key`.
pub fn split<T: Ord>(arena: &mut Arena<T>, tree: Tree, key: &T) -> (Tree, Tree) {
    match tree {
        Some(entry) => {
            if arena[entry].key < *key {
                let right = arena[entry].right.take();
                let (left, rest) = split(arena, right, key);
                arena[entry].right = left;
                (Some(entry), rest)
            } else {
                let left = arena[entry].left.take();
                let (rest, right) = split(arena, left, key);
                arena[entry].left = right;
                (rest, Some(entry))
            }
        },
        None => (None, None),
    }
}

/// Joins two treaps where every key of `l_tree` is less than every key of `r_tree`. On equal
/// priorities the root of `r_tree` is kept on top.
pub fn merge<T>(arena: &mut Arena<T>, l_tree: Tree, r_tree: Tree) -> Tree {
    match (l_tree, r_tree) {
        (Some(l_entry), Some(r_entry)) => {
            if arena[l_entry].priority > arena[r_entry].priority {
                let l_right = arena[l_entry].right.take();
                arena[l_entry].right = merge(arena, l_right, Some(r_entry));
                Some(l_entry)
            } else {
                let r_left = arena[r_entry].left.take();
                arena[r_entry].left = merge(arena, Some(l_entry), r_left);
                Some(r_entry)
            }
        },
        (tree, None) | (None, tree) => tree,
    }
}

/// Places `new_node` at the depth its priority dictates. The key of `new_node` must not already
/// be present in `tree`.
pub fn insert<T: Ord>(arena: &mut Arena<T>, tree: Tree, mut new_node: Node<T>) -> Tree {
    match tree {
        Some(entry) if new_node.priority <= arena[entry].priority => {
            if new_node.key < arena[entry].key {
                let left = arena[entry].left.take();
                arena[entry].left = insert(arena, left, new_node);
            } else {
                let right = arena[entry].right.take();
                arena[entry].right = insert(arena, right, new_node);
            }
            Some(entry)
        },
        tree => {
            let (left, right) = split(arena, tree, &new_node.key);
            new_node.left = left;
            new_node.right = right;
            Some(arena.allocate(new_node))
        },
    }
}

/// Detaches the node with `key`, frees its block, and returns the remaining tree together with
/// the removed key.
pub fn remove<T: Ord>(arena: &mut Arena<T>, tree: Tree, key: &T) -> (Tree, Option<T>) {
    match tree {
        Some(entry) => match key.cmp(&arena[entry].key) {
            Ordering::Less => {
                let left = arena[entry].left.take();
                let (new_left, ret) = remove(arena, left, key);
                arena[entry].left = new_left;
                (Some(entry), ret)
            },
            Ordering::Greater => {
                let right = arena[entry].right.take();
                let (new_right, ret) = remove(arena, right, key);
                arena[entry].right = new_right;
                (Some(entry), ret)
            },
            Ordering::Equal => {
                let Node { key, left, right, .. } = arena.free(entry);
                (merge(arena, left, right), Some(key))
            },
        },
        None => (None, None),
    }
}

pub fn contains<T: Ord>(arena: &Arena<T>, tree: Tree, key: &T) -> bool {
    match tree {
        Some(entry) => {
            let node = &arena[entry];
            match key.cmp(&node.key) {
                Ordering::Less => contains(arena, node.left, key),
                Ordering::Greater => contains(arena, node.right, key),
                Ordering::Equal => true,
            }
        },
        None => false,
    }
}

/// Appends the nodes of `tree` to `nodes` in ascending key order.
pub fn traverse<'a, T>(arena: &'a Arena<T>, tree: Tree, nodes: &mut Vec<&'a Node<T>>) {
    if let Some(entry) = tree {
        let node = &arena[entry];
        traverse(arena, node.left, nodes);
        nodes.push(node);
        traverse(arena, node.right, nodes);
    }
}
