// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use generational_arena::Index;

use crate::node::Link;
use crate::utils::Side;
use crate::{AvlTree, tilt};

impl<T, C> AvlTree<T, C> {
    /// Retraces from a freshly attached leaf towards the root, updating tilts until a subtree
    /// is found whose height did not change, or one that needs a rotation.
    pub(crate) fn balance_after_insert(&mut self, mut node: Index) {
        loop {
            let tilt = self.nodes[node].tilt;
            if tilt > 1 {
                self.rebalance(node, Side::Left);
                return;
            } else if tilt < -1 {
                self.rebalance(node, Side::Right);
                return;
            }

            let Some(parent) = self.nodes[node].up else {
                return;
            };

            let side = self.side_of(node, parent);
            self.nodes[parent].tilt += side.tilt_delta();
            node = parent;

            // A balanced parent means the subtree height above is unchanged
            if self.nodes[node].tilt == 0 {
                return;
            }
        }
    }

    /// Retraces from `parent`, whose `side` subtree just lost one level of height, towards
    /// the root.
    pub(crate) fn balance_after_remove(&mut self, mut parent: Index, mut side: Side) {
        loop {
            let tilt = self.nodes[parent].tilt - side.tilt_delta();
            self.nodes[parent].tilt = tilt;

            let subtree = match tilt {
                // the taller side shrank, so this subtree shrank as well
                0 => parent,
                // the subtree kept its height
                -1 | 1 => return,
                _ => {
                    let (root, sibling_tilt) = self.rebalance(parent, side.opposite());

                    // A balanced sibling leaves the rotated subtree as tall as before
                    if sibling_tilt == 0 {
                        return;
                    }
                    root
                }
            };

            let Some(up) = self.nodes[subtree].up else {
                return;
            };
            side = self.side_of(subtree, up);
            parent = up;
        }
    }

    /// Restores balance at `node` whose `heavy` subtree is two levels taller than the other
    /// one.
    ///
    /// Returns the new root of the subtree and the tilt the heavy child had before the
    /// rotation.
    fn rebalance(&mut self, node: Index, heavy: Side) -> (Index, i8) {
        let Some(child) = self.nodes[node].child(heavy) else {
            unreachable!("node {node:?} leans {heavy} but has no {heavy} child");
        };
        let child_tilt = self.nodes[child].tilt;

        // If the heavy child leans the other way, a single rotation would only mirror the
        // imbalance, so its inner grandchild has to be lifted to the top instead.
        let leans_inward = match heavy {
            Side::Left => child_tilt < 0,
            Side::Right => child_tilt > 0,
        };

        let root = if leans_inward {
            self.double_rotate(node, child, heavy.opposite())
        } else {
            self.rotate(node, heavy.opposite())
        };

        (root, child_tilt)
    }

    /// Rotates `node` down towards `side`, lifting its child on the opposite side into its
    /// place. Returns that child, the new root of the subtree.
    pub(crate) fn rotate(&mut self, node: Index, side: Side) -> Index {
        let Some(pivot) = self.nodes[node].child(side.opposite()) else {
            unreachable!("cannot rotate {node:?} {side} without a {} child", side.opposite());
        };
        let up = self.nodes[node].up;

        tracing::trace!(?node, ?pivot, "rotate {side}");

        // Rotate the pivot into place
        self.nodes[pivot].up = up;
        self.replace_in_parent(node, up, Some(pivot));

        // the pivot's inner subtree moves across to `node`
        let inner = self.nodes[pivot].replace_child(side, Some(node));
        self.nodes[node].replace_child(side.opposite(), inner);
        self.set_parent(inner, node);
        self.nodes[node].up = Some(pivot);

        let (node_tilt, pivot_tilt) = match side {
            Side::Left => tilt::rotate_left(self.nodes[node].tilt, self.nodes[pivot].tilt),
            Side::Right => tilt::rotate_right(self.nodes[node].tilt, self.nodes[pivot].tilt),
        };
        self.nodes[node].tilt = node_tilt;
        self.nodes[pivot].tilt = pivot_tilt;

        pivot
    }

    /// Rotates `child` (the child of `node` opposite to `side`) away from `side` and then
    /// `node` down towards `side`, in a single relinking pass.
    ///
    /// The inner grandchild of `node` becomes the new root of the subtree and is returned.
    pub(crate) fn double_rotate(&mut self, node: Index, child: Index, side: Side) -> Index {
        let heavy = side.opposite();
        debug_assert_eq!(self.nodes[node].child(heavy), Some(child));

        let Some(pivot) = self.nodes[child].child(side) else {
            unreachable!("cannot double rotate {node:?} {side} without an inner grandchild");
        };
        let up = self.nodes[node].up;

        tracing::trace!(?node, ?child, ?pivot, "double rotate {side}");

        // Rotate the pivot into place
        self.nodes[pivot].up = up;
        self.replace_in_parent(node, up, Some(pivot));

        // The pivot's subtrees are split between `child` and `node`
        let outer = self.nodes[pivot].replace_child(heavy, Some(child));
        let inner = self.nodes[pivot].replace_child(side, Some(node));

        self.nodes[child].replace_child(side, outer);
        self.set_parent(outer, child);
        self.nodes[child].up = Some(pivot);

        self.nodes[node].replace_child(heavy, inner);
        self.set_parent(inner, node);
        self.nodes[node].up = Some(pivot);

        let tilts = (
            self.nodes[node].tilt,
            self.nodes[child].tilt,
            self.nodes[pivot].tilt,
        );
        let (node_tilt, child_tilt, pivot_tilt) = match side {
            Side::Left => tilt::rotate_right_left(tilts.0, tilts.1, tilts.2),
            Side::Right => tilt::rotate_left_right(tilts.0, tilts.1, tilts.2),
        };
        self.nodes[node].tilt = node_tilt;
        self.nodes[child].tilt = child_tilt;
        self.nodes[pivot].tilt = pivot_tilt;

        pivot
    }

    /// Makes `replacement` take the place of `child` under `parent`, or at the root if
    /// `child` has no parent. Does not touch the parent link of `replacement`.
    pub(crate) fn replace_in_parent(&mut self, child: Index, parent: Link, replacement: Link) {
        if let Some(parent) = parent {
            let side = self.side_of(child, parent);
            self.nodes[parent].replace_child(side, replacement);
        } else {
            self.root = replacement;
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, child: Link, parent: Index) {
        if let Some(child) = child {
            self.nodes[child].up = Some(parent);
        }
    }

    /// Returns on which side of `parent` the node `child` hangs.
    pub(crate) fn side_of(&self, child: Index, parent: Index) -> Side {
        let parent_node = &self.nodes[parent];
        if parent_node.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(
                parent_node.right,
                Some(child),
                "{parent:?} is not the parent of {child:?}"
            );
            Side::Right
        }
    }
}
