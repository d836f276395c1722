//! A self-balancing binary search tree (AVL tree) supporting ordered
//! insertion, membership search and sorted in-order iteration.

mod tree;
pub use tree::{AvlTree, Iter};
