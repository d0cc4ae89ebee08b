//! Properties of the batch executor over arbitrary hook lists.

use proptest::prelude::*;
use sceptre_hooks::testing::{CallJournal, RecordingHook};
use sceptre_hooks::{
    ExecutionMode, HookError, HookGroup, HookSlot, execute_hooks, execute_hooks_with_mode,
};
use serde_json::{Value, json};

/// A planned hook list entry.
#[derive(Debug, Clone)]
enum Entry {
    Hook { fails: bool },
    Inert(Value),
}

fn arb_inert() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,12}".prop_map(Value::String),
        Just(json!({"not": "a hook"})),
    ]
}

fn arb_entries() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::bool::weighted(0.15).prop_map(|fails| Entry::Hook { fails }),
            1 => arb_inert().prop_map(Entry::Inert),
        ],
        0..12,
    )
}

fn build(entries: &[Entry], journal: &CallJournal) -> HookGroup {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Entry::Hook { fails } => {
                let hook = RecordingHook::new(index.to_string(), journal.clone());
                HookSlot::hook(if *fails { hook.failing() } else { hook })
            }
            Entry::Inert(value) => HookSlot::Inert(value.clone()),
        })
        .collect()
}

/// Labels of the hooks expected to run: every hook up to and including the
/// first failing one.
fn expected_runs(entries: &[Entry]) -> (Vec<String>, bool) {
    let mut runs = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if let Entry::Hook { fails } = entry {
            runs.push(format!("run:{index}"));
            if *fails {
                return (runs, true);
            }
        }
    }
    (runs, false)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Hooks run in list order, inert entries are skipped, and the first
    /// failure stops the batch.
    #[test]
    fn prop_runs_hooks_in_order_until_failure(entries in arb_entries()) {
        let journal = CallJournal::new();
        let group = build(&entries, &journal);

        let result = execute_hooks(Some(&group));

        let (runs, fails) = expected_runs(&entries);
        prop_assert_eq!(journal.entries(), runs);
        prop_assert_eq!(result.is_err(), fails);
        if let Err(err) = result {
            prop_assert!(matches!(err, HookError::Execution(_)), "unexpected error: {err:?}");
        }
    }

    /// A value that is not a hook list never runs anything.
    #[test]
    fn prop_malformed_groups_are_no_ops(value in arb_inert()) {
        let group = HookGroup::Malformed(value);
        prop_assert!(execute_hooks(Some(&group)).is_ok());
    }

    /// Strict mode runs nothing when any entry is not a hook, and behaves
    /// like permissive mode otherwise.
    #[test]
    fn prop_strict_mode_checks_before_running(entries in arb_entries()) {
        let journal = CallJournal::new();
        let group = build(&entries, &journal);

        let result = execute_hooks_with_mode(Some(&group), ExecutionMode::Strict);

        let first_inert = entries.iter().position(|entry| matches!(entry, Entry::Inert(_)));
        match first_inert {
            Some(index) => {
                prop_assert!(journal.entries().is_empty());
                prop_assert!(
                    matches!(result, Err(HookError::NotAHook { index: found, .. }) if found == index),
                    "expected NotAHook error at the first inert entry"
                );
            }
            None => {
                let (runs, fails) = expected_runs(&entries);
                prop_assert_eq!(journal.entries(), runs);
                prop_assert_eq!(result.is_err(), fails);
            }
        }
    }
}

#[test]
fn absent_group_is_a_no_op() {
    assert!(execute_hooks(None).is_ok());
    assert!(execute_hooks_with_mode(None, ExecutionMode::Strict).is_ok());
}

#[test]
fn strict_mode_rejects_malformed_group() {
    let group = HookGroup::Malformed(json!("echo hi"));
    let err = execute_hooks_with_mode(Some(&group), ExecutionMode::Strict).unwrap_err();
    assert!(matches!(err, HookError::MalformedGroup { ref found } if found == "\"echo hi\""));
}
