// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # An arena-backed AVL Tree.
//!
//! AVL trees are the original *self-balancing binary search trees*: every node records the
//! height difference of its two subtrees (its *tilt*), which is kept in `-1..=1` by local
//! rotations after every insertion and removal. This bounds the height of a tree with `n`
//! elements by ~1.44 log2(n), so lookups, insertions and removals are all O(log n).
//!
//! Nodes are stored in a generational arena owned by the tree. Every insertion hands out a
//! [`NodeId`], a cheap `Copy` handle that stays valid while its node is part of the tree,
//! however much the tree is rebalanced around it. Handles allow
//!
//! - **neighbor navigation without searching** - [`AvlTree::next`] and [`AvlTree::prev`]
//!   walk the tree from the node itself, which is O(1) amortized over a full traversal.
//! - **removal without searching** - [`AvlTree::remove_node`] unlinks a node in O(log n)
//!   without ever invoking the comparator.
//! - **detection of stale handles** - removing a node invalidates its handle; using it again
//!   reports [`Error::AlreadyRemoved`] instead of touching a different node.
//!
//! Values are ordered by a comparator supplied at construction time. Values that compare
//! equal are allowed; a new value is placed *before* all values equal to it, which makes the
//! order of duplicates reproducible.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree = AvlTree::new(|a: &u32, b: &u32| a.cmp(b));
//! let one = tree.insert(1);
//! let two = tree.insert(2);
//! let three = tree.insert(3);
//!
//! assert_eq!(tree.first(), Some(one));
//! assert_eq!(tree.next(one), Some(two));
//!
//! assert_eq!(tree.remove(&2), Some((two, 2)));
//! assert_eq!(tree.next(one), Some(three));
//! assert!(!tree.is_valid(two));
//! ```
//!
//! ## features
//!
//! | Feature | Default | Explanation                                                                           |
//! |:--------|:--------|:--------------------------------------------------------------------------------------|
//! | `dot`   | `false` | Enables the `AvlTree::dot` method, which allows display of the tree in graphviz format |

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod balance;
mod cursor;
#[cfg(feature = "dot")]
mod dot;
mod error;
mod node;
mod tilt;
mod utils;

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use generational_arena::{Arena, Index};

pub use cursor::{Cursor, CursorMut, Iter};
#[cfg(feature = "dot")]
pub use dot::Dot;
pub use error::Error;
pub use node::NodeId;

use crate::node::{Link, Node, TreeId};

/// An AVL Tree with stable node handles.
///
/// Values are kept sorted according to the comparator `C` given to [`AvlTree::new`]. All
/// lookups, insertions and removals complete in O(log n) time; see the
/// [crate-level documentation](crate) for an overview.
///
/// The tree is not internally synchronized. Every mutating operation takes `&mut self`, so
/// sharing a tree between threads requires an external lock.
pub struct AvlTree<T, C = fn(&T, &T) -> Ordering> {
    pub(crate) nodes: Arena<Node<T>>,
    pub(crate) root: Link,
    compare: C,
    id: TreeId,
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new(<T as Ord>::cmp)
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C> Extend<T> for AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates a new, empty tree that orders its values using `compare`.
    ///
    /// `compare` must implement a total order. Breaking that contract does not cause memory
    /// unsafety, but leaves the order of the tree unspecified.
    #[must_use]
    pub fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
            id: TreeId::next(),
        }
    }

    /// Creates a new, empty tree with room for `capacity` values before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            compare,
            id: TreeId::next(),
        }
    }

    /// Insert a new value into the tree, returning a handle to the node holding it.
    ///
    /// Values comparing equal to existing ones are permitted. Equal values route left, so the
    /// new value ends up in front of all values equal to it.
    pub fn insert(&mut self, value: T) -> NodeId {
        let Some(mut curr) = self.root else {
            let index = self.nodes.insert(Node::new(value, None));
            self.root = Some(index);
            return self.handle(index);
        };

        let side = loop {
            let node = &self.nodes[curr];
            let side = if (self.compare)(&value, &node.value).is_le() {
                utils::Side::Left
            } else {
                utils::Side::Right
            };

            match node.child(side) {
                Some(child) => curr = child,
                None => break side,
            }
        };

        let index = self.nodes.insert(Node::new(value, Some(curr)));
        self.nodes[curr].replace_child(side, Some(index));
        self.balance_after_insert(index);

        self.handle(index)
    }

    /// Returns a handle to a node holding a value equal to `value`.
    ///
    /// If the tree holds several equal values, the one closest to the root is returned.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        self.find_internal(value).map(|index| self.handle(index))
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find_internal(value).is_some()
    }

    /// Removes a value equal to `value` from the tree.
    ///
    /// Returns the now invalid handle of the removed node together with the value it held,
    /// or `None` if no such value was part of the tree.
    pub fn remove(&mut self, value: &T) -> Option<(NodeId, T)> {
        let index = self.find_internal(value)?;
        let handle = self.handle(index);
        Some((handle, self.remove_internal(index)))
    }

    /// Asserts as many of the tree's invariants as possible.
    ///
    /// This checks that every node's tilt matches the actual heights of its subtrees and is
    /// within `-1..=1`, that parent and child links agree, that values are sorted, that every
    /// node is reachable and that the height is within the AVL bound.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[track_caller]
    pub fn assert_valid(&self)
    where
        T: fmt::Debug,
    {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "tree without root has nodes");
            return;
        };

        assert!(self.nodes[root].up.is_none(), "root node has a parent");

        let (height, count) = self.assert_valid_inner(root);
        assert_eq!(
            count,
            self.len(),
            "tree length does not match the number of reachable nodes"
        );
        assert_eq!(height, self.height(), "tilts do not describe the tree height");
        assert!(
            height <= max_height(self.len()),
            "tree height {height} exceeds the AVL bound for {} nodes",
            self.len()
        );

        let mut values = self.iter();
        if let Some(mut prev) = values.next() {
            for value in values {
                assert!(
                    (self.compare)(prev, value).is_le(),
                    "Ordering violation: in-order traversal is not sorted"
                );
                prev = value;
            }
        }
    }

    /// Returns the height and the number of nodes of the subtree rooted at `index`.
    #[track_caller]
    fn assert_valid_inner(&self, index: Index) -> (usize, usize)
    where
        T: fmt::Debug,
    {
        let node = &self.nodes[index];

        // assert that all links are set up correctly (no loops, self references, etc.)
        assert_ne!(
            node.up,
            Some(index),
            "node's parent cannot be itself; node = {node:#?}"
        );
        assert_ne!(
            node.left,
            Some(index),
            "node's left child cannot be itself; node = {node:#?}"
        );
        assert_ne!(
            node.right,
            Some(index),
            "node's right child cannot be itself; node = {node:#?}"
        );
        if node.left.is_some() {
            assert_ne!(
                node.left, node.right,
                "node's left and right children cannot be the same; node = {node:#?}"
            );
        }

        let measure = |child: Link| -> (usize, usize) {
            let Some(child) = child else {
                return (0, 0);
            };
            assert_eq!(
                self.nodes[child].up,
                Some(index),
                "child {child:?} does not point back at its parent {index:?}"
            );
            self.assert_valid_inner(child)
        };

        let (left_height, left_count) = measure(node.left);
        let (right_height, right_count) = measure(node.right);

        let balanced = match node.tilt {
            1 => left_height == right_height + 1,
            0 => left_height == right_height,
            -1 => right_height == left_height + 1,
            tilt => panic!("AVL rule violation: tilt of {index:?} is {tilt}; node = {node:#?}"),
        };
        assert!(
            balanced,
            "AVL rule violation: subtree heights of {index:?} are {left_height} and {right_height}; node = {node:#?}"
        );

        (
            left_height.max(right_height) + 1,
            left_count + right_count + 1,
        )
    }

    fn find_internal(&self, value: &T) -> Link {
        let mut tree = self.root;
        while let Some(curr) = tree {
            let node = &self.nodes[curr];

            match (self.compare)(value, &node.value) {
                Ordering::Equal => return Some(curr),
                Ordering::Less => tree = node.left,
                Ordering::Greater => tree = node.right,
            }
        }

        None
    }
}

impl<T, C> AvlTree<T, C> {
    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_none(), self.nodes.is_empty());
        self.nodes.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut curr = self.root;

        // the tilt points at the taller subtree
        while let Some(index) = curr {
            height += 1;
            let node = &self.nodes[index];
            curr = if node.tilt < 0 { node.right } else { node.left };
        }

        height
    }

    /// Returns a handle to the node holding the smallest value.
    pub fn first(&self) -> Option<NodeId> {
        let root = self.root?;
        Some(self.handle(utils::find_minimum(&self.nodes, root)))
    }

    /// Returns a handle to the node holding the largest value.
    pub fn last(&self) -> Option<NodeId> {
        let root = self.root?;
        Some(self.handle(utils::find_maximum(&self.nodes, root)))
    }

    /// Returns `true` if `node` is still part of this tree.
    pub fn is_valid(&self, node: NodeId) -> bool {
        self.resolve(node).is_some()
    }

    /// Returns the value held by `node`, or `None` if the node is not part of this tree.
    pub fn get(&self, node: NodeId) -> Option<&T> {
        let index = self.resolve(node)?;
        Some(&self.nodes[index].value)
    }

    /// Returns the in-order successor of `node`.
    ///
    /// Returns `None` if `node` holds the largest value or is not part of this tree.
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        let index = self.resolve(node)?;
        cursor::next(&self.nodes, index).map(|next| self.handle(next))
    }

    /// Returns the in-order predecessor of `node`.
    ///
    /// Returns `None` if `node` holds the smallest value or is not part of this tree.
    pub fn prev(&self, node: NodeId) -> Option<NodeId> {
        let index = self.resolve(node)?;
        cursor::prev(&self.nodes, index).map(|prev| self.handle(prev))
    }

    /// Returns the node holding the smallest value in the subtree rooted at `node`.
    pub fn subtree_min(&self, node: NodeId) -> Option<NodeId> {
        let index = self.resolve(node)?;
        Some(self.handle(utils::find_minimum(&self.nodes, index)))
    }

    /// Returns the node holding the largest value in the subtree rooted at `node`.
    pub fn subtree_max(&self, node: NodeId) -> Option<NodeId> {
        let index = self.resolve(node)?;
        Some(self.handle(utils::find_maximum(&self.nodes, index)))
    }

    /// Returns a `Cursor` pointing at `node`.
    ///
    /// If `node` is not part of this tree the cursor points at nothing.
    pub fn cursor(&self, node: NodeId) -> Cursor<'_, T, C> {
        Cursor {
            current: self.resolve(node),
            tree: self,
        }
    }

    /// Returns a `CursorMut` pointing at `node`.
    ///
    /// If `node` is not part of this tree the cursor points at nothing.
    pub fn cursor_mut(&mut self, node: NodeId) -> CursorMut<'_, T, C> {
        CursorMut {
            current: self.resolve(node),
            tree: self,
        }
    }

    /// Gets an iterator over the values in the tree, in ascending order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            head: self.root.map(|root| utils::find_minimum(&self.nodes, root)),
            tail: self.root.map(|root| utils::find_maximum(&self.nodes, root)),
            len: self.len(),
            tree: self,
        }
    }

    /// Calls `f` with every value in ascending order, together with its position and the
    /// handle of the node holding it.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize, NodeId),
    {
        let mut curr = self.root.map(|root| utils::find_minimum(&self.nodes, root));
        let mut position = 0;

        while let Some(index) = curr {
            f(&self.nodes[index].value, position, self.handle(index));
            position += 1;
            curr = cursor::next(&self.nodes, index);
        }
    }

    /// Copies all values into a `Vec`, in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        out
    }

    /// Removes `node` from the tree, returning the value it held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRemoved`] if the node was removed before, and
    /// [`Error::ForeignNode`] if the handle was issued by a different tree. The tree is left
    /// untouched in both cases.
    pub fn remove_node(&mut self, node: NodeId) -> Result<T, Error> {
        if node.tree != self.id {
            return Err(Error::ForeignNode);
        }
        if !self.nodes.contains(node.index) {
            return Err(Error::AlreadyRemoved);
        }

        Ok(self.remove_internal(node.index))
    }

    /// Removes all values from the tree, invalidating every handle.
    pub fn clear(&mut self) {
        // Removing entries one by one bumps the arena generation, so old handles can never
        // match nodes inserted later.
        self.nodes.retain(|_, _| false);
        self.root = None;
    }

    /// Returns a value that renders the tree in graphviz `dot` format.
    #[cfg(feature = "dot")]
    pub fn dot(&self) -> Dot<'_, T, C> {
        Dot { tree: self }
    }

    #[inline]
    pub(crate) fn handle(&self, index: Index) -> NodeId {
        NodeId {
            tree: self.id,
            index,
        }
    }

    #[inline]
    fn resolve(&self, node: NodeId) -> Link {
        (node.tree == self.id && self.nodes.contains(node.index)).then_some(node.index)
    }

    pub(crate) fn remove_internal(&mut self, index: Index) -> T {
        let node = &self.nodes[index];

        if let (Some(left), Some(right)) = (node.left, node.right) {
            // Splice out the adjacent node from the taller side instead, which has at most one
            // child, and move it into our place. Taking it from the taller side means the
            // retrace below never has to rotate at `index` itself.
            let replacement = if node.tilt > 0 {
                utils::find_maximum(&self.nodes, left)
            } else {
                utils::find_minimum(&self.nodes, right)
            };

            tracing::trace!(?index, ?replacement, "removing binary node");
            self.splice_out(replacement);
            self.swap_in_node_at(index, replacement);
        } else {
            tracing::trace!(?index, "removing unary node or leaf");
            self.splice_out(index);
        }

        let Some(node) = self.nodes.remove(index) else {
            unreachable!("node {index:?} vanished during removal");
        };
        node.value
    }

    /// Unlinks a node with at most one child, moving that child up into its place.
    fn splice_out(&mut self, index: Index) {
        let node = &self.nodes[index];
        debug_assert!(node.left.is_none() || node.right.is_none());

        let parent = node.up;
        let child = node.left.or(node.right);

        if let Some(child) = child {
            self.nodes[child].up = parent;
        }

        let Some(parent) = parent else {
            // We're removing the root, so the child becomes the new root
            self.root = child;
            return;
        };

        let side = self.side_of(index, parent);
        self.nodes[parent].replace_child(side, child);
        self.balance_after_remove(parent, side);
    }

    /// Moves `new` (which must be unlinked) into the position of `old`, taking over its
    /// parent, children and tilt.
    fn swap_in_node_at(&mut self, old: Index, new: Index) {
        let old_node = &self.nodes[old];
        let (up, left, right, tilt) = (old_node.up, old_node.left, old_node.right, old_node.tilt);

        let new_node = &mut self.nodes[new];
        new_node.up = up;
        new_node.left = left;
        new_node.right = right;
        new_node.tilt = tilt;

        self.set_parent(left, new);
        self.set_parent(right, new);
        self.replace_in_parent(old, up, Some(new));
    }
}

/// The largest height an AVL tree with `len` nodes can have.
///
/// An AVL tree of height `h` holds at least `N(h) = N(h - 1) + N(h - 2) + 1` nodes.
fn max_height(len: usize) -> usize {
    let mut height = 0;
    // N(height + 1) and N(height)
    let (mut taller, mut shorter) = (1usize, 0usize);

    while taller <= len && taller != usize::MAX {
        let next = taller.saturating_add(shorter).saturating_add(1);
        shorter = taller;
        taller = next;
        height += 1;
    }

    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::SliceRandom;
    use rand::rng;

    #[test]
    fn height_bound() {
        assert_eq!(max_height(0), 0);
        assert_eq!(max_height(1), 1);
        assert_eq!(max_height(2), 2);
        assert_eq!(max_height(3), 2);
        assert_eq!(max_height(4), 3);
        assert_eq!(max_height(6), 3);
        assert_eq!(max_height(7), 4);
        assert_eq!(max_height(12), 5);
        assert_eq!(max_height(1000), 14);
    }

    #[test]
    fn random_inserts_and_removals() {
        let mut tree: AvlTree<usize> = AvlTree::default();

        let mut rng = rng();

        let mut nums = (0..50).collect::<Vec<_>>();
        nums.shuffle(&mut rng);

        for i in nums.clone() {
            tree.insert(i);
            tree.assert_valid();
        }

        nums.shuffle(&mut rng);

        for i in nums {
            assert_eq!(tree.remove(&i).map(|(_, value)| value), Some(i));
            tree.assert_valid();
        }

        assert!(tree.is_empty());
        assert_eq!(tree.root, None);
    }

    #[test]
    fn random_inserts_and_searches() {
        let mut tree: AvlTree<usize> = AvlTree::default();

        let mut rng = rng();

        let mut nums = (0..50).collect::<Vec<_>>();
        nums.shuffle(&mut rng);

        for i in nums.clone() {
            tree.insert(i);
        }

        nums.shuffle(&mut rng);

        for i in nums {
            let node = tree.find(&i).unwrap();
            assert_eq!(tree.get(node), Some(&i));
        }
    }

    #[test]
    fn rotations_keep_links_consistent() {
        let mut tree: AvlTree<usize> = AvlTree::default();
        let handles: Vec<_> = (0..7).map(|i| tree.insert(i)).collect();

        // perfectly balanced: 3 at the root
        assert_eq!(tree.root, Some(handles[3].index));
        assert_eq!(tree.height(), 3);

        let root = handles[3].index;
        let new_root = tree.rotate(root, utils::Side::Left);
        assert_eq!(new_root, handles[5].index);
        assert_eq!(tree.root, Some(new_root));
        assert_eq!(tree.nodes[root].up, Some(new_root));
        assert_eq!(tree.nodes[root].right, Some(handles[4].index));
        assert_eq!(tree.nodes[handles[4].index].up, Some(root));
        assert_eq!(tree.nodes[root].tilt, 1);
        assert_eq!(tree.nodes[new_root].tilt, 2);

        let back = tree.rotate(new_root, utils::Side::Right);
        assert_eq!(back, root);
        tree.assert_valid();
        assert_eq!(tree.to_vec(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "node = Node {")]
    fn reports_offending_node() {
        let mut tree: AvlTree<usize> = (0..3).collect();
        let Some(root) = tree.root else {
            unreachable!()
        };

        // 1 is the root of a perfectly balanced tree, claim it leans left
        tree.nodes[root].tilt = 1;
        tree.assert_valid();
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut tree: AvlTree<usize> = (0..10).collect();
        let node = tree.find(&4).unwrap();

        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.is_valid(node));

        // slots get reused, the handle must not alias the new node
        tree.insert(4);
        assert!(!tree.is_valid(node));
        assert_eq!(tree.remove_node(node), Err(Error::AlreadyRemoved));
        tree.assert_valid();
    }
}
