//! Batch execution of hook groups.

use crate::error::HookError;
use crate::mapping::{HookGroup, HookSlot};
use serde::Deserialize;

/// How [`execute_hooks_with_mode`] treats entries that are not hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Skip non-hook entries and non-list groups silently (default).
    #[default]
    Permissive,
    /// Reject non-hook entries and non-list groups before running anything.
    Strict,
}

/// Runs the hooks of `group` in order.
///
/// `None`, or a group that is not a list, does nothing. Entries that are not
/// hooks are skipped without a diagnostic. The first failing hook stops the
/// batch and its error is returned.
///
/// # Errors
///
/// Returns the error of the first hook that fails.
pub fn execute_hooks(group: Option<&HookGroup>) -> Result<(), HookError> {
    execute_hooks_with_mode(group, ExecutionMode::Permissive)
}

/// Runs the hooks of `group` in order, honoring `mode`.
///
/// In [`ExecutionMode::Strict`] a malformed group or a non-hook entry is
/// reported before any hook of the batch runs.
///
/// # Errors
///
/// Returns [`HookError::MalformedGroup`] or [`HookError::NotAHook`] in strict
/// mode, otherwise the error of the first hook that fails.
pub fn execute_hooks_with_mode(
    group: Option<&HookGroup>,
    mode: ExecutionMode,
) -> Result<(), HookError> {
    let slots = match group {
        Some(HookGroup::Sequence(slots)) => slots,
        Some(HookGroup::Malformed(found)) if mode == ExecutionMode::Strict => {
            return Err(HookError::MalformedGroup {
                found: found.to_string(),
            });
        }
        Some(HookGroup::Malformed(_)) | None => return Ok(()),
    };

    if mode == ExecutionMode::Strict {
        let inert = slots.iter().enumerate().find_map(|(index, slot)| match slot {
            HookSlot::Inert(value) => Some((index, value)),
            HookSlot::Hook(_) => None,
        });
        if let Some((index, value)) = inert {
            return Err(HookError::NotAHook {
                index,
                value: value.to_string(),
            });
        }
    }

    for hook in slots.iter().filter_map(HookSlot::as_hook) {
        hook.run()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallJournal, RecordingHook};
    use serde_json::json;

    fn group(slots: Vec<HookSlot>) -> HookGroup {
        HookGroup::Sequence(slots)
    }

    #[test]
    fn none_is_a_noop() {
        execute_hooks(None).unwrap();
    }

    #[test]
    fn empty_list_is_a_noop() {
        execute_hooks(Some(&group(Vec::new()))).unwrap();
    }

    #[test]
    fn malformed_group_is_a_noop() {
        execute_hooks(Some(&HookGroup::Malformed(json!("echo")))).unwrap();
    }

    #[test]
    fn non_hook_entries_are_skipped() {
        let slots = [json!(null), json!("string"), json!(1), json!(true)]
            .into_iter()
            .map(HookSlot::Inert)
            .collect();
        execute_hooks(Some(&group(slots))).unwrap();
    }

    #[test]
    fn single_hook_runs_once() {
        let journal = CallJournal::new();
        let hooks = group(vec![HookSlot::hook(RecordingHook::new("a", journal.clone()))]);

        execute_hooks(Some(&hooks)).unwrap();

        assert_eq!(journal.entries(), vec!["run:a"]);
    }

    #[test]
    fn hooks_run_in_order() {
        let journal = CallJournal::new();
        let hooks = group(vec![
            HookSlot::hook(RecordingHook::new("build", journal.clone())),
            HookSlot::Inert(json!("ignored")),
            HookSlot::hook(RecordingHook::new("upload", journal.clone())),
        ]);

        execute_hooks(Some(&hooks)).unwrap();

        assert_eq!(journal.entries(), vec!["run:build", "run:upload"]);
    }

    #[test]
    fn first_failure_stops_the_batch() {
        let journal = CallJournal::new();
        let hooks = group(vec![
            HookSlot::hook(RecordingHook::new("a", journal.clone())),
            HookSlot::hook(RecordingHook::new("b", journal.clone()).failing()),
            HookSlot::hook(RecordingHook::new("c", journal.clone())),
        ]);

        let err = execute_hooks(Some(&hooks)).unwrap_err();

        assert!(matches!(err, HookError::Execution(ref msg) if msg.contains('b')));
        assert_eq!(journal.entries(), vec!["run:a", "run:b"]);
    }

    #[test]
    fn strict_mode_rejects_inert_entries_before_running() {
        let journal = CallJournal::new();
        let hooks = group(vec![
            HookSlot::hook(RecordingHook::new("a", journal.clone())),
            HookSlot::Inert(json!("typo")),
        ]);

        let err = execute_hooks_with_mode(Some(&hooks), ExecutionMode::Strict).unwrap_err();

        assert!(matches!(err, HookError::NotAHook { index: 1, ref value } if value == "\"typo\""));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn strict_mode_rejects_malformed_groups() {
        let err = execute_hooks_with_mode(
            Some(&HookGroup::Malformed(json!({"cmd": "ls"}))),
            ExecutionMode::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, HookError::MalformedGroup { .. }));
    }

    #[test]
    fn strict_mode_accepts_missing_groups() {
        execute_hooks_with_mode(None, ExecutionMode::Strict).unwrap();
    }
}
