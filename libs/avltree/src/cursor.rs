// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::iter::FusedIterator;

use generational_arena::{Arena, Index};

use crate::node::{Link, Node};
use crate::{AvlTree, NodeId, utils};

/// A cursor which provides read-only access to an [`AvlTree`].
///
/// A cursor either points at a node of the tree or, once it moved past either end (or was
/// created from an invalid handle), at nothing.
pub struct Cursor<'a, T, C> {
    pub(crate) current: Link,
    pub(crate) tree: &'a AvlTree<T, C>,
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            tree: self.tree,
        }
    }
}

impl<'a, T, C> Cursor<'a, T, C> {
    /// Returns the handle of the node the cursor points at.
    pub fn node(&self) -> Option<NodeId> {
        self.current.map(|index| self.tree.handle(index))
    }
    pub fn get(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.current.map(|index| &tree.nodes[index].value)
    }
    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|current| next(&self.tree.nodes, current));
    }
    pub fn move_prev(&mut self) {
        self.current = self.current.and_then(|current| prev(&self.tree.nodes, current));
    }
    pub fn peek_next(&self) -> Option<&'a T> {
        let tree = self.tree;
        let next = next(&tree.nodes, self.current?)?;
        Some(&tree.nodes[next].value)
    }
    pub fn peek_prev(&self) -> Option<&'a T> {
        let tree = self.tree;
        let prev = prev(&tree.nodes, self.current?)?;
        Some(&tree.nodes[prev].value)
    }
}

/// A cursor which provides mutable access to an [`AvlTree`].
pub struct CursorMut<'a, T, C> {
    pub(crate) current: Link,
    pub(crate) tree: &'a mut AvlTree<T, C>,
}

impl<T, C> CursorMut<'_, T, C> {
    /// Returns the handle of the node the cursor points at.
    pub fn node(&self) -> Option<NodeId> {
        self.current.map(|index| self.tree.handle(index))
    }
    pub fn get(&self) -> Option<&T> {
        self.current.map(|index| &self.tree.nodes[index].value)
    }
    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|current| next(&self.tree.nodes, current));
    }
    pub fn move_prev(&mut self) {
        self.current = self.current.and_then(|current| prev(&self.tree.nodes, current));
    }
    pub fn peek_next(&self) -> Option<&T> {
        let next = next(&self.tree.nodes, self.current?)?;
        Some(&self.tree.nodes[next].value)
    }
    pub fn peek_prev(&self) -> Option<&T> {
        let prev = prev(&self.tree.nodes, self.current?)?;
        Some(&self.tree.nodes[prev].value)
    }
    /// Removes the current node from the tree and returns its value.
    ///
    /// The cursor moves on to the successor of the removed node.
    pub fn remove_current(&mut self) -> Option<T> {
        let current = self.current?;
        // Removal relinks nodes but never moves them between arena slots, so the successor
        // stays valid.
        self.current = next(&self.tree.nodes, current);
        Some(self.tree.remove_internal(current))
    }
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor {
            current: self.current,
            tree: self.tree,
        }
    }
}

/// An iterator over references to the values of an [`AvlTree`], in ascending order.
pub struct Iter<'a, T, C> {
    pub(crate) head: Link,
    pub(crate) tail: Link,
    pub(crate) len: usize,
    pub(crate) tree: &'a AvlTree<T, C>,
}

impl<T, C> Clone for Iter<'_, T, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            len: self.len,
            tree: self.tree,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.head?;

        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            self.head = next(&self.tree.nodes, head);
        }
        self.len -= 1;

        Some(&self.tree.nodes[head].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, C> DoubleEndedIterator for Iter<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tail = self.tail?;

        if self.tail == self.head {
            self.head = None;
            self.tail = None;
        } else {
            self.tail = prev(&self.tree.nodes, tail);
        }
        self.len -= 1;

        Some(&self.tree.nodes[tail].value)
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}
impl<T, C> FusedIterator for Iter<'_, T, C> {}

pub(crate) fn next<T>(nodes: &Arena<Node<T>>, node: Index) -> Link {
    // If we have a right child, its least descendant is our next node
    if let Some(right) = nodes[node].right {
        return Some(utils::find_minimum(nodes, right));
    }

    let mut curr = node;
    while let Some(parent) = nodes[curr].up {
        // the first ancestor we reach from its left side is our next node
        if nodes[parent].left == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }

    // we reached the tree root without finding a next node
    None
}

pub(crate) fn prev<T>(nodes: &Arena<Node<T>>, node: Index) -> Link {
    // If we have a left child, its greatest descendant is our previous node
    if let Some(left) = nodes[node].left {
        return Some(utils::find_maximum(nodes, left));
    }

    let mut curr = node;
    while let Some(parent) = nodes[curr].up {
        if nodes[parent].right == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }

    None
}
