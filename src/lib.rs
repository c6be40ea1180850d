//! An ordered set implemented by a randomized treap.
//!
//! Nodes live in a `TypedArena` and refer to their children by `Entry` index, so splitting and
//! merging only rewires indices. Each `TreapSet` owns the generator its priorities are drawn from,
//! which keeps trees reproducible under a fixed seed.

pub mod arena;
mod error;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::treap::TreapSet;
