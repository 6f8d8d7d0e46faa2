use langsync::{
    NullSink, Node, Parser, PseudoTranslator, Reconciler, SyncOptions, Tree, flatten, scan,
    unflatten,
};
use proptest::prelude::*;
use std::fs;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _,!\\?äöüéß日本語\\-]{0,24}").expect("valid value regex")
}

fn build_tree(entries: Vec<(String, Node)>) -> Tree {
    entries
        .into_iter()
        .fold(Tree::new(), |tree, (key, node)| tree.with(key, node))
}

/// Trees with delimiter-free keys and no empty nested objects.
fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = value_strategy().prop_map(Node::Leaf);
    let node = leaf.prop_recursive(4, 48, 4, |inner| {
        prop::collection::vec((key_strategy(), inner), 1..4)
            .prop_map(|entries| Node::Branch(build_tree(entries)))
    });
    prop::collection::vec((key_strategy(), node), 0..6).prop_map(build_tree)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unflatten_inverts_flatten(tree in tree_strategy()) {
        let flat = flatten(&tree, '.');
        prop_assert_eq!(unflatten(&flat, '.'), tree);
    }

    #[test]
    fn flat_map_has_one_entry_per_leaf(tree in tree_strategy()) {
        prop_assert_eq!(flatten(&tree, '.').len(), tree.leaf_count());
    }

    #[test]
    fn file_roundtrip_preserves_tree(tree in tree_strategy()) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = tmp.path().join("strings_fr.json");
        tree.write_to(&path).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let loaded = Tree::read_from(&path).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(loaded, tree);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sync_keeps_existing_values_and_is_idempotent(master in tree_strategy()) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let master_flat = flatten(&master, '.');

        // Every other master key is already translated in the target.
        let existing: langsync::FlatKeyMap = master_flat
            .iter()
            .step_by(2)
            .map(|(key, _)| (key.to_string(), format!("kept {}", key)))
            .collect();
        unflatten(&existing, '.')
            .write_to(tmp.path().join("strings_de.json"))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        master
            .write_to(tmp.path().join("strings_en.json"))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let options = SyncOptions::new();
        let file_set = scan(tmp.path(), &options).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let reconciler = Reconciler::new(PseudoTranslator, options);

        reconciler.run(&file_set, &mut NullSink).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let target_path = tmp.path().join("strings_de.json");
        let first = fs::read_to_string(&target_path).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let synced = flatten(&Tree::from_str(&first).map_err(|e| TestCaseError::fail(e.to_string()))?, '.');
        prop_assert_eq!(synced.len(), master_flat.len());
        for (key, value) in existing.iter() {
            prop_assert_eq!(synced.get(key), Some(value));
        }
        for (key, _) in master_flat.iter() {
            prop_assert!(synced.contains_key(key));
        }

        let report = reconciler.run(&file_set, &mut NullSink).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = fs::read_to_string(&target_path).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(first, second);
        prop_assert_eq!(report.translated(), 0);
    }
}
