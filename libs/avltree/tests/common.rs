#![allow(unused, reason = "not used by all tests")]

use avltree::{AvlTree, NodeId};
use rand::Rng;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The largest height an AVL tree with `len` nodes can reach (~1.44 log2(len)).
pub fn height_bound(len: usize) -> usize {
    // sparsest possible AVL trees: N(h) = N(h - 1) + N(h - 2) + 1
    let mut sparsest = vec![0usize, 1];
    while *sparsest.last().unwrap() <= len {
        let h = sparsest.len();
        sparsest.push(sparsest[h - 1] + sparsest[h - 2] + 1);
    }
    sparsest.len() - 2
}

/// Walks the tree from `start`, following `step` until it runs out of nodes.
pub fn walk<T: Clone, C>(
    tree: &AvlTree<T, C>,
    start: Option<NodeId>,
    step: impl Fn(&AvlTree<T, C>, NodeId) -> Option<NodeId>,
) -> Vec<T> {
    let mut out = Vec::new();
    let mut curr = start;
    while let Some(node) = curr {
        out.push(tree.get(node).unwrap().clone());
        curr = step(tree, node);
    }
    out
}

/// Inserts `input`, checks lookups and traversals, then removes every value in random order,
/// checking the tree after every step.
pub fn check_tree(mut input: Vec<u32>) {
    init_tracing();

    let mut tree: AvlTree<u32> = AvlTree::default();

    for (i, value) in input.iter().enumerate() {
        assert_eq!(tree.len(), i, "correct tree length");
        tree.insert(*value);
    }
    assert_eq!(tree.len(), input.len(), "correct tree length");

    input.sort_unstable();

    tree.assert_valid();
    assert!(
        tree.height() <= height_bound(input.len()),
        "tree height is correctly bounded"
    );

    assert_eq!(tree.to_vec(), input);
    assert_eq!(tree.get(tree.first().unwrap()), input.first());
    assert_eq!(tree.get(tree.last().unwrap()), input.last());

    let mut rng = rand::rng();
    for _ in 0..10 {
        let value = input[rng.random_range(0..input.len())];
        assert_eq!(tree.get(tree.find(&value).unwrap()), Some(&value));
    }

    let forward = walk(&tree, tree.first(), AvlTree::next);
    assert_eq!(forward, input, "walking forward matches input");

    let mut backward = walk(&tree, tree.last(), AvlTree::prev);
    backward.reverse();
    assert_eq!(backward, input, "walking backward matches input");

    while !input.is_empty() {
        let value = input.remove(rng.random_range(0..input.len()));
        tracing::debug!("removing {value}");

        let node = tree.find(&value).unwrap();
        assert_eq!(tree.remove_node(node), Ok(value));
        assert!(!tree.is_valid(node));

        tree.assert_valid();
        assert_eq!(tree.to_vec(), input, "tree missing removed node");
        assert_eq!(tree.len(), input.len(), "tree length decremented");
    }

    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    assert_eq!(tree.height(), 0);
}
