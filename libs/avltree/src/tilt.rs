// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Tilt bookkeeping for the four rotation primitives.
//!
//! A node's tilt is the height of its left subtree minus the height of its right subtree.
//! Rotations only shuffle whole subtrees around, so the tilts after a rotation follow from
//! the tilts before it and no subtree heights need to be recomputed.
//!
//! The inputs may be out of the `-1..=1` range by one (a node that is being rebalanced has
//! a tilt of ±2), the outputs of a rotation applied at the right point are always in range.

/// Tilts of `(node, pivot)` after rotating `node` left, where `pivot` is `node`'s right
/// child that takes its place.
#[inline]
pub(crate) fn rotate_left(node: i8, pivot: i8) -> (i8, i8) {
    let node = node + 1 - pivot.min(0);
    let pivot = pivot + 1 + node.max(0);
    (node, pivot)
}

/// Tilts of `(node, pivot)` after rotating `node` right, where `pivot` is `node`'s left
/// child that takes its place.
#[inline]
pub(crate) fn rotate_right(node: i8, pivot: i8) -> (i8, i8) {
    let node = node - 1 - pivot.max(0);
    let pivot = pivot - 1 + node.min(0);
    (node, pivot)
}

/// Tilts of `(node, old_left, pivot)` after rotating `old_left` left and then `node` right.
/// `pivot` is the right child of `old_left` and ends up as the new local root.
#[inline]
pub(crate) fn rotate_left_right(node: i8, old_left: i8, pivot: i8) -> (i8, i8, i8) {
    let (old_left, pivot) = rotate_left(old_left, pivot);
    let (node, pivot) = rotate_right(node, pivot);
    (node, old_left, pivot)
}

/// Tilts of `(node, old_right, pivot)` after rotating `old_right` right and then `node` left.
/// `pivot` is the left child of `old_right` and ends up as the new local root.
#[inline]
pub(crate) fn rotate_right_left(node: i8, old_right: i8, pivot: i8) -> (i8, i8, i8) {
    let (old_right, pivot) = rotate_right(old_right, pivot);
    let (node, pivot) = rotate_left(node, pivot);
    (node, old_right, pivot)
}
