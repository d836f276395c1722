use std::cmp::{self, Ordering};
use std::iter::FusedIterator;

/// An ordered set of values implemented with an AVL tree.
///
/// Values are kept in a binary search tree whose height stays logarithmic
/// in the number of elements. Duplicate inserts leave the tree unchanged.
pub struct AvlTree<T: Ord> {
    root: Link<T>,
    num_nodes: usize,
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree.
    /// A tree with a single value has height 1, an empty tree height 0.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns true if an equal value exists in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the tree that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let mut current = &self.root;
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
            };
        }
        None
    }

    /// Inserts a value into the tree.
    /// Returns whether the value was newly added.
    /// Inserting a value that is already present leaves the tree unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        let mut added = false;
        self.root = Some(Self::insert_into(self.root.take(), value, &mut added));
        if added {
            self.num_nodes += 1;
        }
        added
    }

    /// Gets an iterator over the values of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.num_nodes,
        };
        iter.push_left_spine(&self.root);
        iter
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = match &self.root {
            None => 0,
            Some(root) => check_node(root, None, None),
        };
        assert_eq!(num_nodes, self.num_nodes);
    }

    // Inserts into the subtree owned by the given link and returns the
    // (possibly new) subtree root to be linked back into the parent.
    fn insert_into(link: Link<T>, value: T, added: &mut bool) -> Box<Node<T>> {
        let mut node = match link {
            None => {
                *added = true;
                return Box::new(Node::new(value));
            }
            Some(node) => node,
        };
        match value.cmp(&node.value) {
            Ordering::Less => {
                node.left = Some(Self::insert_into(node.left.take(), value, added));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_into(node.right.take(), value, added));
            }
            // Duplicate value, leave the tree untouched
            Ordering::Equal => return node,
        }
        if *added {
            node.adjust_height();
            node = Self::rebalance_node(node);
        }
        node
    }

    /// Restores the AVL condition (balance) at the given node if necessary.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single insert.
    /// Returns the new subtree root.
    fn rebalance_node(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        if left_height > right_height + 1 {
            // Rebalance right
            let mut left = node.left.take().unwrap();
            if height(&left.right) > height(&left.left) {
                // Left-right case, rotate the left child into left-left shape first
                left = Self::rotate_left(left);
            }
            node.left = Some(left);
            Self::rotate_right(node)
        } else if right_height > left_height + 1 {
            // Rebalance left
            let mut right = node.right.take().unwrap();
            if height(&right.left) > height(&right.right) {
                // Right-left case
                right = Self::rotate_right(right);
            }
            node.right = Some(right);
            Self::rotate_left(node)
        } else {
            node
        }
    }

    // The right child becomes the new subtree root and takes ownership of the
    // demoted node; the pivot's left subtree moves over to the demoted side.
    // Heights are recomputed bottom-up: demoted node first, then the new root.
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let mut pivot = node.right.take().unwrap();
        node.right = pivot.left.take();
        node.adjust_height();
        pivot.left = Some(node);
        pivot.adjust_height();
        pivot
    }

    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let mut pivot = node.left.take().unwrap();
        node.left = pivot.right.take();
        node.adjust_height();
        pivot.right = Some(node);
        pivot.adjust_height();
        pivot
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }
}

fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

#[cfg(any(test, feature = "consistency_check"))]
fn check_node<T: Ord>(node: &Node<T>, lower: Option<&T>, upper: Option<&T>) -> usize {
    // Check BST bounds inherited from the ancestors
    if let Some(lower) = lower {
        assert!(node.value > *lower);
    }
    if let Some(upper) = upper {
        assert!(node.value < *upper);
    }

    let mut num_nodes = 1;
    if let Some(left) = &node.left {
        num_nodes += check_node(left, lower, Some(&node.value));
    }
    if let Some(right) = &node.right {
        num_nodes += check_node(right, Some(&node.value), upper);
    }

    // Check height cache
    let left_height = height(&node.left);
    let right_height = height(&node.right);
    assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

    // Check AVL condition (near balance)
    assert!(left_height <= right_height + 1);
    assert!(right_height <= left_height + 1);

    num_nodes
}

/// An iterator over the values of the tree in ascending order.
///
/// Walks the tree with an explicit stack of the not-yet-visited ancestors,
/// so iteration never recurses.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_left_spine(&node.right);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
