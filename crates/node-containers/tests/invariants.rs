mod common;

use std::collections::{BTreeSet, VecDeque};

use common::collect;
use node_containers::{BsTree, Container, DList, Iterable};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum ListOp {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Clear,
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        4 => any::<i32>().prop_map(ListOp::PushBack),
        4 => any::<i32>().prop_map(ListOp::PushFront),
        2 => Just(ListOp::PopBack),
        2 => Just(ListOp::PopFront),
        1 => Just(ListOp::Clear),
    ]
}

proptest! {
    #[test]
    fn list_tracks_push_history(ops in prop::collection::vec(list_op(), 0..200)) {
        let mut list = DList::new();
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                ListOp::PushBack(x) => {
                    list.push_back(x);
                    model.push_back(x);
                }
                ListOp::PushFront(x) => {
                    list.push_front(x);
                    model.push_front(x);
                }
                ListOp::PopBack => {
                    if let Some(x) = model.pop_back() {
                        prop_assert_eq!(list.pop_back(), x);
                    }
                }
                ListOp::PopFront => {
                    if let Some(x) = model.pop_front() {
                        prop_assert_eq!(list.pop_front(), x);
                    }
                }
                ListOp::Clear => {
                    list.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(list.size(), model.len());
        }
        prop_assert_eq!(list.iter().count(), list.size());
        prop_assert_eq!(collect(&list), model.into_iter().collect::<Vec<_>>());
        prop_assert_eq!(list.assert_valid(), Ok(()));
    }

    #[test]
    fn tree_traversal_is_sorted_and_deduplicated(values in prop::collection::vec(-100i32..100, 0..150)) {
        let mut tree = BsTree::new();
        let mut model = BTreeSet::new();
        for x in &values {
            prop_assert_eq!(tree.insert(*x), model.insert(*x));
        }
        prop_assert_eq!(tree.size(), model.len());
        prop_assert_eq!(tree.iter().count(), tree.size());
        prop_assert_eq!(collect(&tree), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.assert_valid(), Ok(()));

        // Re-inserting everything changes nothing.
        for x in &values {
            prop_assert!(!tree.insert(*x));
        }
        prop_assert_eq!(tree.size(), model.len());
    }

    #[test]
    fn copies_do_not_share_nodes(values in prop::collection::vec(any::<i32>(), 1..60), extra in any::<i32>()) {
        let list: DList<i32> = values.iter().copied().collect();
        let mut list_copy = list.clone();
        list_copy.push_back(extra);
        list_copy.pop_front();
        list_copy.for_each_mut(|x| *x = x.wrapping_add(1));
        prop_assert_eq!(collect(&list), values.clone());

        let tree: BsTree<i32> = values.iter().copied().collect();
        let before = collect(&tree);
        let mut tree_copy = tree.clone();
        prop_assert_eq!(tree_copy.height(), tree.height());
        tree_copy.insert(extra);
        tree_copy.clear();
        prop_assert_eq!(collect(&tree), before);
    }

    #[test]
    fn doubling_preserves_relative_order(values in prop::collection::vec(-1000i32..1000, 0..80)) {
        let mut list: DList<i32> = values.iter().copied().collect();
        let mut tree: BsTree<i32> = values.iter().copied().collect();
        let list_before = collect(&list);
        let tree_before = collect(&tree);

        list.for_each_mut(|x| *x *= 2);
        tree.for_each_mut(|x| *x *= 2);

        prop_assert_eq!(collect(&list), list_before.iter().map(|x| x * 2).collect::<Vec<_>>());
        prop_assert_eq!(collect(&tree), tree_before.iter().map(|x| x * 2).collect::<Vec<_>>());
    }
}
