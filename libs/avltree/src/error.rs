// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;

/// Error type returned by [`AvlTree::remove_node`](crate::AvlTree::remove_node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The node was already removed from the tree.
    AlreadyRemoved,
    /// The handle was issued by a different tree.
    ForeignNode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyRemoved => f.write_str("node has already been removed"),
            Error::ForeignNode => f.write_str("node belongs to a different tree"),
        }
    }
}

impl core::error::Error for Error {}
