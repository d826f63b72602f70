use family_tree::{Error, EventSink, FamilyTree, VecSink};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io;

struct FailSink;

impl EventSink for FailSink {
    fn emit(&mut self, _line: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

// AVL height bound: h <= 1.44 * lg(n + 2)
fn assert_height_bounded(tree: &FamilyTree) {
    let bound = 1.44 * ((tree.len() + 2) as f64).log2();
    assert!((tree.height() as f64) <= bound);
}

fn assert_sorted(tree: &FamilyTree) {
    let keys = tree.iter().map(|m| m.key).collect::<Vec<_>>();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(keys.len(), tree.len());
}

#[test]
fn test_random_inserts_and_removes() {
    let mut rng = rand::thread_rng();
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("root", 0.5);
    let mut keys = vec![0.5];

    for index in 0..1000 {
        let key = f64::from(rng.gen_range(0..10_000));
        if tree.insert(&format!("m{}", index), key, &mut sink).unwrap() {
            keys.push(key);
        }
        assert_eq!(tree.len(), keys.len());
    }
    assert_sorted(&tree);
    assert_height_bounded(&tree);

    keys.shuffle(&mut rng);
    while let Some(key) = keys.pop() {
        assert!(tree.remove(key, &mut sink).unwrap().is_some());
        assert_eq!(tree.len(), keys.len());
        if keys.len() % 100 == 0 {
            assert_sorted(&tree);
            assert_height_bounded(&tree);
        }
    }
    assert!(tree.is_empty());
}

#[test]
fn test_double_insert_keeps_one_node() {
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("root", 1.0);
    assert!(tree.insert("a", 2.0, &mut sink).unwrap());
    assert!(!tree.insert("b", 2.0, &mut sink).unwrap());

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get(2.0).unwrap().label, "a");
}

#[test]
fn test_lca_key_lies_between_targets() {
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("root", 500.0);
    for index in 0..200 {
        tree.insert(&format!("m{}", index), f64::from(index * 7 % 1000), &mut sink)
            .unwrap();
    }

    let keys = tree.iter().map(|m| m.key.value()).collect::<Vec<_>>();
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let key1 = keys[rng.gen_range(0..keys.len())];
        let key2 = keys[rng.gen_range(0..keys.len())];
        let ancestor = tree.lowest_common_ancestor(key1, key2).unwrap();
        // in a search tree the lowest common ancestor is the split node
        let value = ancestor.key.value();
        assert!(key1.min(key2) <= value && value <= key1.max(key2));
    }

    // a key is its own lowest common ancestor
    let ancestor = tree.lowest_common_ancestor(keys[0], keys[0]).unwrap();
    assert_eq!(ancestor.key.value(), keys[0]);
}

#[test]
fn test_rank_levels_partition_the_tree() {
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("root", 500.0);
    for index in 0..100 {
        tree.insert(&format!("m{}", index), f64::from(index * 13 % 500), &mut sink)
            .unwrap();
    }

    let mut seen = 0;
    for member in &tree {
        let level = tree.members_at_same_rank(member.key.value());
        assert!(!level.is_empty());
        assert!(level.windows(2).all(|pair| pair[0].key < pair[1].key));
        if level[0].key == member.key {
            seen += level.len();
        }
    }
    assert_eq!(seen, tree.len());
}

#[test]
fn test_sink_failure_propagates_and_leaves_tree_intact() {
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("Don", 50.0);
    tree.insert("Son", 30.0, &mut sink).unwrap();
    tree.insert("Nephew", 70.0, &mut sink).unwrap();

    let err = tree.insert("Grandson", 20.0, &mut FailSink).unwrap_err();
    assert!(matches!(err, Error::Sink(_)));
    assert!(!tree.contains(20.0));
    assert_eq!(tree.len(), 3);

    let err = tree.remove(30.0, &mut FailSink).unwrap_err();
    assert!(matches!(err, Error::Sink(_)));
    // narration failed before the unlink, so the member survives
    assert!(tree.contains(30.0));
    assert_eq!(tree.len(), 3);
    assert_sorted(&tree);
    assert_height_bounded(&tree);

    // a healthy sink succeeds afterwards
    assert!(tree.remove(30.0, &mut sink).unwrap().is_some());
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_departure_narrated_once() {
    let mut sink = VecSink::new();
    let mut tree = FamilyTree::new("d", 4.0);
    for (label, key) in [
        ("b", 2.0),
        ("f", 6.0),
        ("a", 1.0),
        ("c", 3.0),
        ("e", 5.0),
        ("g", 7.0),
    ] {
        tree.insert(label, key, &mut sink).unwrap();
    }

    sink.lines.clear();
    // two children: the successor copy must not narrate its own removal
    tree.remove(4.0, &mut sink).unwrap();
    assert_eq!(sink.lines, vec!["d left the family, replaced by e"]);

    sink.lines.clear();
    tree.remove(99.0, &mut sink).unwrap();
    assert!(sink.lines.is_empty());
}

proptest! {
    #[test]
    fn prop_round_trip_leaves_empty_tree(
        keys in proptest::collection::hash_set(1i32..10_000, 1..80),
    ) {
        let mut sink = VecSink::new();
        let mut keys = keys.into_iter().map(f64::from).collect::<Vec<_>>();
        let mut tree = FamilyTree::new("root", 0.5);

        for (index, key) in keys.iter().enumerate() {
            let inserted = tree.insert(&format!("m{}", index), *key, &mut sink).unwrap();
            prop_assert!(inserted);
        }
        prop_assert_eq!(tree.len(), keys.len() + 1);
        assert_sorted(&tree);
        assert_height_bounded(&tree);

        keys.reverse();
        keys.push(0.5);
        for key in keys {
            prop_assert!(tree.remove(key, &mut sink).unwrap().is_some());
        }
        prop_assert!(tree.is_empty());
    }
}
