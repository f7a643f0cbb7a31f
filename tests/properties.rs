//! Property tests for the tree invariants.
//!
//! Each case builds a real index file in a temp directory from an
//! arbitrary set of distinct keys, then checks the structural
//! invariants over every node and search completeness over every key.
//! Key-set sizes go well past the two-level capacity of 399 so that
//! cascading internal splits (trees of three or more levels) are
//! exercised, including the child-splice bookkeeping they depend on.

use std::collections::HashSet;

use proptest::prelude::*;
use tempfile::tempdir;

use blocktree::{BTree, BlockId, Node};

fn build_tree(keys: &[u64]) -> (tempfile::TempDir, BTree) {
    let dir = tempdir().unwrap();
    let mut tree = BTree::create(dir.path().join("prop.idx")).unwrap();
    for &key in keys {
        tree.insert(key, key.wrapping_mul(3)).unwrap();
    }
    (dir, tree)
}

fn collect_nodes(tree: &mut BTree) -> Vec<Node> {
    let mut nodes = Vec::new();
    tree.for_each_node(|node, _| nodes.push(node.clone())).unwrap();
    nodes
}

fn check_invariants(nodes: &[Node], root_expected: bool) {
    for node in nodes {
        // Keys strictly ascending, unused slots zeroed.
        assert!(node.keys().windows(2).all(|w| w[0] < w[1]));
        assert!(node.keys[node.num_keys..].iter().all(|&k| k == 0));

        if node.is_leaf() {
            continue;
        }
        // An internal node with k keys has exactly k + 1 children,
        // packed at the front of the child array.
        let populated = node
            .children
            .iter()
            .take_while(|c| c.is_some())
            .count();
        assert_eq!(populated, node.num_keys + 1);
        assert!(node.children[populated..].iter().all(|c| c.is_none()));

        // Every child points back at this node.
        for &child_id in &node.children[..populated] {
            let child = nodes.iter().find(|n| n.block_id == child_id).unwrap();
            assert_eq!(child.parent_id, node.block_id);
        }
    }

    if root_expected {
        let roots: Vec<_> = nodes
            .iter()
            .filter(|n| n.parent_id == BlockId::NONE)
            .collect();
        assert_eq!(roots.len(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn invariants_hold_for_arbitrary_key_sets(
        keys in prop::collection::hash_set(any::<u64>(), 1..300)
    ) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let (_dir, mut tree) = build_tree(&keys);

        let nodes = collect_nodes(&mut tree);
        check_invariants(&nodes, true);

        for &key in &keys {
            prop_assert_eq!(tree.search(key).unwrap(), Some(key.wrapping_mul(3)));
        }
    }

    #[test]
    fn absent_keys_stay_absent(
        keys in prop::collection::hash_set(0u64..10_000, 1..200),
        probes in prop::collection::vec(0u64..10_000, 50)
    ) {
        let present: HashSet<u64> = keys.iter().copied().collect();
        let keys: Vec<u64> = keys.into_iter().collect();
        let (_dir, mut tree) = build_tree(&keys);

        for probe in probes {
            let expected = present.contains(&probe).then(|| probe.wrapping_mul(3));
            prop_assert_eq!(tree.search(probe).unwrap(), expected);
        }
    }
}

proptest! {
    // Deep trees are expensive to build; fewer, larger cases.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn invariants_hold_transitively_for_deep_trees(
        keys in prop::collection::hash_set(any::<u64>(), 450..900)
    ) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let (_dir, mut tree) = build_tree(&keys);

        let mut nodes = Vec::new();
        let mut max_depth = 0;
        tree.for_each_node(|node, depth| {
            nodes.push(node.clone());
            max_depth = max_depth.max(depth);
        })
        .unwrap();
        prop_assert!(max_depth >= 2, "450+ keys must overflow two levels");

        check_invariants(&nodes, true);

        // Every inserted pair is reachable and no key is duplicated
        // across nodes.
        let mut seen = HashSet::new();
        for node in &nodes {
            for &key in node.keys() {
                prop_assert!(seen.insert(key), "key {} appears twice", key);
            }
        }
        prop_assert_eq!(seen.len(), keys.len());

        for &key in &keys {
            prop_assert_eq!(tree.search(key).unwrap(), Some(key.wrapping_mul(3)));
        }
    }
}
