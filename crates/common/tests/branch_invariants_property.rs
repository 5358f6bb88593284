use std::collections::BTreeSet;

use collabwrite_common::branch::{BranchSet, DEFAULT_BRANCH};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Switch(String),
    Edit(String),
}

fn branch_name() -> impl Strategy<Value = String> {
    // Small alphabet so duplicates and empty names come up often.
    prop_oneof![Just(String::new()), Just(DEFAULT_BRANCH.to_string()), "[a-c]{1,2}"]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        branch_name().prop_map(Op::Create),
        branch_name().prop_map(Op::Switch),
        "[a-z ]{0,12}".prop_map(Op::Edit),
    ]
}

fn assert_invariants(set: &BranchSet) {
    let unique: BTreeSet<&String> = set.branches().iter().collect();
    assert_eq!(unique.len(), set.branches().len(), "branch list has duplicates");
    assert!(set.contains(DEFAULT_BRANCH));
    assert!(set.contains(set.active()));
    for name in set.branches() {
        assert!(set.content(name).is_some(), "branch `{name}` has no content");
    }
}

proptest! {
    #[test]
    fn random_operation_sequences_keep_invariants(ops in prop::collection::vec(op(), 0..64)) {
        let mut set = BranchSet::new("seed");

        for op in ops {
            match op {
                Op::Create(name) => {
                    let before = set.clone();
                    let created = set.create_branch(&name);
                    if created {
                        prop_assert_eq!(set.active(), name.as_str());
                        prop_assert_eq!(set.content(&name), Some(before.active_content()));
                    } else {
                        prop_assert_eq!(&set, &before);
                    }
                }
                Op::Switch(name) => {
                    let before = set.clone();
                    if set.switch_branch(&name).is_ok() {
                        prop_assert_eq!(set.active(), name.as_str());
                    } else {
                        prop_assert_eq!(&set, &before);
                    }
                }
                Op::Edit(text) => {
                    let before = set.clone();
                    set.update_active_content(text.clone());
                    prop_assert_eq!(set.active_content(), text.as_str());
                    for name in before.branches() {
                        if name != before.active() {
                            prop_assert_eq!(set.content(name), before.content(name));
                        }
                    }
                }
            }
            assert_invariants(&set);
        }
    }

    #[test]
    fn serialized_state_survives_roundtrip(names in prop::collection::vec("[a-z]{1,4}", 0..8)) {
        let mut set = BranchSet::new("seed");
        for name in &names {
            set.create_branch(name);
            set.update_active_content(format!("content of {name}"));
        }

        let json = serde_json::to_string(&set).expect("branch set should serialize");
        let restored: BranchSet =
            serde_json::from_str(&json).expect("branch set should deserialize");
        prop_assert_eq!(restored, set);
    }
}
