// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;

use generational_arena::{Arena, Index};

use crate::node::Node;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The change in tilt of a parent whose `self`-side subtree grew by one level.
    pub(crate) fn tilt_delta(self) -> i8 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }
}

pub(crate) fn find_minimum<T>(nodes: &Arena<Node<T>>, mut curr: Index) -> Index {
    while let Some(left) = nodes[curr].left {
        curr = left;
    }

    curr
}

pub(crate) fn find_maximum<T>(nodes: &Arena<Node<T>>, mut curr: Index) -> Index {
    while let Some(right) = nodes[curr].right {
        curr = right;
    }

    curr
}
