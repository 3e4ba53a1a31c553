// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::sync::atomic::{AtomicUsize, Ordering};
use core::{fmt, mem};

use generational_arena::Index;

use crate::utils::Side;

pub(crate) type Link = Option<Index>;

/// A vertex of an [`AvlTree`](crate::AvlTree), stored in the tree's arena.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) up: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Height of the left subtree minus height of the right subtree.
    pub(crate) tilt: i8,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, up: Link) -> Self {
        Self {
            value,
            up,
            left: None,
            right: None,
            tilt: 0,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn replace_child(&mut self, side: Side, child: Link) -> Link {
        match side {
            Side::Left => mem::replace(&mut self.left, child),
            Side::Right => mem::replace(&mut self.right, child),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("tilt", &self.tilt)
            .field("parent", &self.up)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

/// Tags every [`NodeId`] with the tree that issued it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(usize);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to a value stored in an [`AvlTree`](crate::AvlTree).
///
/// Handles are returned by [`AvlTree::insert`](crate::AvlTree::insert) and
/// [`AvlTree::find`](crate::AvlTree::find) and stay valid for as long as the node they
/// refer to is part of the tree, no matter how often rebalancing moves that node around.
/// Once the node is removed the handle is permanently invalid: navigation returns `None`
/// and removing it again fails with [`Error::AlreadyRemoved`](crate::Error::AlreadyRemoved).
///
/// Handles are only meaningful for the tree that issued them. Passing a handle to a
/// different tree is detected and treated like an invalid handle.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) tree: TreeId,
    pub(crate) index: Index,
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, generation) = self.index.into_raw_parts();
        f.debug_struct("NodeId")
            .field("tree", &self.tree.0)
            .field("index", &index)
            .field("generation", &generation)
            .finish()
    }
}
