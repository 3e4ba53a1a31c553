#![no_main]

use std::fmt::Debug;

use avltree::{AvlTree, Error, NodeId};
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action<Value> {
    Clear,
    Insert(Value),
    Find(Value),
    Remove(Value),
    /// Removes a node through a handle handed out earlier, which may be stale by now.
    RemoveNode(usize),
    Navigate(usize, Vec<CursorAction>),
    CursorRemove(usize, Vec<CursorAction>),
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum CursorAction {
    Next,
    Prev,
}

#[derive(Arbitrary, Debug)]
enum ValueType {
    U8(Vec<Action<u8>>),
    U16(Vec<Action<u16>>),
    U64(Vec<Action<u64>>),
}

fn run<'a, Value: Ord + Arbitrary<'a> + Debug + Copy>(actions: Vec<Action<Value>>) {
    let mut tree: AvlTree<Value> = AvlTree::default();
    let mut vec: Vec<Value> = vec![];
    // every handle the tree ever returned
    let mut handles: Vec<NodeId> = vec![];

    for action in actions {
        match action {
            Action::Clear => {
                tree.clear();
                vec.clear();
                for node in &handles {
                    assert!(!tree.is_valid(*node));
                }
            }
            Action::Insert(value) => {
                let node = tree.insert(value);
                assert_eq!(tree.get(node), Some(&value));

                let index = vec.partition_point(|v| *v < value);
                vec.insert(index, value);
                handles.push(node);
            }
            Action::Find(value) => {
                let found = tree.find(&value).and_then(|node| tree.get(node));
                if vec.binary_search(&value).is_ok() {
                    assert_eq!(found, Some(&value));
                } else {
                    assert_eq!(found, None);
                }
                assert_eq!(tree.contains(&value), found.is_some());
            }
            Action::Remove(value) => {
                let removed = tree.remove(&value);
                if let Ok(index) = vec.binary_search(&value) {
                    let (node, v) = removed.unwrap();
                    assert_eq!(v, vec.remove(index));
                    assert!(!tree.is_valid(node));
                } else {
                    assert!(removed.is_none());
                }
            }
            Action::RemoveNode(i) => {
                let Some(node) = handles.get(i % handles.len().max(1)).copied() else {
                    continue;
                };

                match tree.get(node).copied() {
                    Some(value) => {
                        let index = vec.binary_search(&value).unwrap();
                        vec.remove(index);
                        assert_eq!(tree.remove_node(node), Ok(value));
                    }
                    None => assert_eq!(tree.remove_node(node), Err(Error::AlreadyRemoved)),
                }
            }
            Action::Navigate(i, actions) => {
                let Some(node) = handles.get(i % handles.len().max(1)).copied() else {
                    continue;
                };
                if !tree.is_valid(node) {
                    assert_eq!(tree.next(node), None);
                    assert_eq!(tree.prev(node), None);
                    assert!(tree.cursor(node).get().is_none());
                    continue;
                }

                // the in-order position of `node`
                let mut position = 0;
                let mut curr = node;
                while let Some(prev) = tree.prev(curr) {
                    position += 1;
                    curr = prev;
                }
                let mut index = Some(position);

                let mut cursor = tree.cursor(node);
                for action in actions {
                    match action {
                        CursorAction::Next => cursor.move_next(),
                        CursorAction::Prev => cursor.move_prev(),
                    }
                    // a cursor that moved past either end stays there
                    index = index.and_then(|i| match action {
                        CursorAction::Next => Some(i + 1).filter(|i| *i < vec.len()),
                        CursorAction::Prev => i.checked_sub(1),
                    });

                    assert_eq!(cursor.get(), index.map(|i| &vec[i]));
                }
            }
            Action::CursorRemove(i, actions) => {
                let Some(node) = handles.get(i % handles.len().max(1)).copied() else {
                    continue;
                };
                let mut cursor = tree.cursor_mut(node);
                for action in actions {
                    match action {
                        CursorAction::Next => cursor.move_next(),
                        CursorAction::Prev => cursor.move_prev(),
                    }
                }

                let next = cursor.peek_next().copied();
                if let Some(value) = cursor.remove_current() {
                    assert_eq!(cursor.get().copied(), next);
                    let index = vec.binary_search(&value).unwrap();
                    vec.remove(index);
                }
            }
        }

        tree.assert_valid();
        assert_eq!(vec.is_empty(), tree.is_empty());
        let entries: Vec<_> = tree.iter().copied().collect();
        assert_eq!(vec, entries);
    }
}

fuzz_target!(|actions: ValueType| {
    match actions {
        ValueType::U8(actions) => run(actions),
        ValueType::U16(actions) => run(actions),
        ValueType::U64(actions) => run(actions),
    }
});
