mod common;

use avltree::AvlTree;

use crate::common::walk;

#[test]
fn walks_match_to_vec() {
    let tree: AvlTree<u32> = [8, 3, 10, 1, 6, 14, 4, 7, 13].into_iter().collect();
    tree.assert_valid();

    let forward = walk(&tree, tree.first(), AvlTree::next);
    assert_eq!(forward, tree.to_vec());

    let mut backward = walk(&tree, tree.last(), AvlTree::prev);
    backward.reverse();
    assert_eq!(backward, tree.to_vec());
}

#[test]
fn subtree_bounds() {
    let tree: AvlTree<u32> = (0..31).collect();

    let root_min = tree.subtree_min(tree.find(&15).unwrap()).unwrap();
    let root_max = tree.subtree_max(tree.find(&15).unwrap()).unwrap();
    assert_eq!(Some(root_min), tree.first());
    assert_eq!(Some(root_max), tree.last());

    // a leaf is its own minimum and maximum
    let leaf = tree.find(&0).unwrap();
    assert_eq!(tree.subtree_min(leaf), Some(leaf));
    assert_eq!(tree.subtree_max(leaf), Some(leaf));

    // every subtree bound lies within the bounds of the whole tree
    tree.for_each(|value, _, node| {
        let min = tree.get(tree.subtree_min(node).unwrap()).unwrap();
        let max = tree.get(tree.subtree_max(node).unwrap()).unwrap();
        assert!(min <= value && value <= max);
    });
}

#[test]
fn for_each_positions_and_handles() {
    let tree: AvlTree<u32> = [5, 2, 9, 2, 7].into_iter().collect();

    let mut seen = Vec::new();
    tree.for_each(|value, position, node| {
        assert_eq!(position, seen.len());
        assert_eq!(tree.get(node), Some(value));
        seen.push(*value);
    });
    assert_eq!(seen, [2, 2, 5, 7, 9]);

    let empty: AvlTree<u32> = AvlTree::default();
    empty.for_each(|_, _, _| panic!("empty tree has no values"));
}

#[test]
fn iter_both_ends() {
    let tree: AvlTree<u32> = (0..10).collect();

    let mut iter = tree.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 8);

    let middle: Vec<_> = iter.by_ref().copied().collect();
    assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    let reversed: Vec<_> = tree.iter().rev().copied().collect();
    assert_eq!(reversed, (0..10u32).rev().collect::<Vec<_>>());

    let mut total = 0u32;
    for value in &tree {
        total += *value;
    }
    assert_eq!(total, 45);
}

#[test]
fn iter_meets_in_the_middle() {
    let tree: AvlTree<u32> = (0..5).collect();
    let mut iter = tree.iter();

    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.len(), 0);
}

#[test]
fn cursor_moves_and_peeks() {
    let tree: AvlTree<u32> = (0..4).collect();
    let mut cursor = tree.cursor(tree.first().unwrap());

    assert_eq!(cursor.get(), Some(&0));
    assert_eq!(cursor.peek_prev(), None);
    assert_eq!(cursor.peek_next(), Some(&1));

    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.get(), Some(&2));
    assert_eq!(cursor.peek_prev(), Some(&1));
    assert_eq!(cursor.peek_next(), Some(&3));
    assert_eq!(cursor.node(), tree.find(&2));

    let saved = cursor.clone();

    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.get(), None);
    assert_eq!(cursor.node(), None);

    // a cursor that ran off the end stays there
    cursor.move_prev();
    assert_eq!(cursor.get(), None);

    assert_eq!(saved.get(), Some(&2));
}

#[test]
fn cursor_from_stale_handle() {
    let mut tree: AvlTree<u32> = (0..4).collect();
    let node = tree.find(&1).unwrap();
    tree.remove_node(node).unwrap();

    let cursor = tree.cursor(node);
    assert_eq!(cursor.get(), None);
    assert_eq!(cursor.peek_next(), None);

    let mut cursor = tree.cursor_mut(node);
    assert_eq!(cursor.remove_current(), None);
    assert_eq!(tree.len(), 3);
}

#[test]
fn cursor_mut_walks_backwards() {
    let mut tree: AvlTree<u32> = (0..6).collect();
    let last = tree.last().unwrap();

    let mut cursor = tree.cursor_mut(last);
    let mut seen = Vec::new();
    while let Some(value) = cursor.get() {
        seen.push(*value);
        cursor.move_prev();
    }
    assert_eq!(seen, [5, 4, 3, 2, 1, 0]);

    let mut cursor = tree.cursor_mut(last);
    cursor.move_prev();
    assert_eq!(cursor.as_cursor().peek_next(), Some(&5));
    assert_eq!(cursor.peek_prev(), Some(&3));
}

#[test]
fn debug_lists_values_in_order() {
    let tree: AvlTree<u32> = [3, 1, 2].into_iter().collect();
    assert_eq!(format!("{tree:?}"), "[1, 2, 3]");

    let empty: AvlTree<u32> = AvlTree::default();
    assert_eq!(format!("{empty:?}"), "[]");
}

#[test]
fn handle_debug_names_its_tree() {
    let mut a: AvlTree<u32> = AvlTree::default();
    let mut b: AvlTree<u32> = AvlTree::default();

    let node_a = a.insert(1);
    let node_b = b.insert(1);

    // same arena slot, different trees
    assert_ne!(node_a, node_b);
    assert_ne!(format!("{node_a:?}"), format!("{node_b:?}"));
}
