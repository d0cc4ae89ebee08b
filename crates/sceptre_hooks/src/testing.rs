//! Test doubles for hook code.
//!
//! Enabled in this crate's own tests and, for downstream crates, through the
//! `test-utils` feature.

use crate::error::HookError;
use crate::hook::{Hook, HookBase};
use parking_lot::Mutex;
use sceptre_resolvers::Argument;
use sceptre_stack::StackRef;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::subscriber::Subscriber;
use tracing::{Event, Level};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ─────────────────────────────────────────────────────────────────────────────
// CallJournal
// ─────────────────────────────────────────────────────────────────────────────

/// Shared, ordered log of what test hooks did.
///
/// Cloning yields a handle onto the same journal.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Returns a snapshot of all entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Counts entries starting with `prefix`.
    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingHook
// ─────────────────────────────────────────────────────────────────────────────

/// Hook that journals its lifecycle instead of doing anything.
///
/// Journal entries:
///
/// | call                | entry                  |
/// |---------------------|------------------------|
/// | `run`               | `run:<label>`          |
/// | `clone_for_stack`   | `clone:<label>@<stack>`|
/// | `setup`             | `setup:<label>@<stack>`|
#[derive(Debug, Clone)]
pub struct RecordingHook {
    base: HookBase,
    label: String,
    journal: CallJournal,
    generation: usize,
    fail_run: bool,
    fail_setup: bool,
}

impl RecordingHook {
    /// Kind reported by [`Hook::kind`].
    pub const KIND: &'static str = "recording";

    /// Creates an unbound template with a null argument.
    #[must_use]
    pub fn new(label: impl Into<String>, journal: CallJournal) -> Self {
        Self {
            base: HookBase::unbound(Argument::default()),
            label: label.into(),
            journal,
            generation: 0,
            fail_run: false,
            fail_setup: false,
        }
    }

    /// Replaces the argument, leaving the hook unbound.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.base = HookBase::unbound(argument);
        self
    }

    /// Binds in place without journaling, as direct construction would.
    #[must_use]
    pub fn bound(mut self, stack: &StackRef) -> Self {
        self.base = self.base.clone_for_stack(stack);
        self
    }

    /// Makes `run` fail after journaling.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_run = true;
        self
    }

    /// Makes `setup` fail after journaling.
    #[must_use]
    pub fn failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of `clone_for_stack` calls between the first template and this
    /// instance.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn stack_name(&self) -> &str {
        self.base.stack().map_or("-", |stack| stack.name())
    }
}

impl Hook for RecordingHook {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn base(&self) -> &HookBase {
        &self.base
    }

    fn run(&self) -> Result<(), HookError> {
        self.journal.record(format!("run:{}", self.label));
        if self.fail_run {
            return Err(HookError::execution(format!("hook {} failed", self.label)));
        }
        Ok(())
    }

    fn clone_for_stack(&self, stack: &StackRef) -> Box<dyn Hook> {
        self.journal
            .record(format!("clone:{}@{}", self.label, stack.name()));
        Box::new(Self {
            base: self.base.clone_for_stack(stack),
            label: self.label.clone(),
            journal: self.journal.clone(),
            generation: self.generation + 1,
            fail_run: self.fail_run,
            fail_setup: self.fail_setup,
        })
    }

    fn setup(&mut self) -> Result<(), HookError> {
        self.journal
            .record(format!("setup:{}@{}", self.label, self.stack_name()));
        if self.fail_setup {
            return Err(HookError::execution(format!(
                "setup of hook {} failed",
                self.label
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LogCapture
// ─────────────────────────────────────────────────────────────────────────────

/// One event seen by a [`LogCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Event target.
    pub target: String,
    /// Formatted message.
    pub message: String,
    /// Value of the `hook` field, if any.
    pub hook: Option<String>,
}

/// `tracing` layer that stores events for assertions.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this capture installed as the thread's subscriber.
    pub fn record<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Returns the captured events in order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        let metadata = event.metadata();
        self.events.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            message: fields.message,
            hook: fields.hook,
        });
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    hook: Option<String>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_owned(),
            "hook" => self.hook = Some(value.to_owned()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn core::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "hook" => self.hook = Some(format!("{value:?}")),
            _ => {}
        }
    }
}
