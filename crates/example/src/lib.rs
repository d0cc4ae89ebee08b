//! Example stack deployment CLI built with Sceptre.
//!
//! A project file lists stacks and the hooks to run around their operations.
//! Stacks without their own `hooks` share the project-level hooks; each stack
//! still gets its own bound copy.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  project.json                                                │
//! │    hooks ──▶ HookLoader ──▶ templates (loaded once)          │
//! │    stacks ─┬─▶ Stack "dev/app"  ◀── clone of templates       │
//! │            └─▶ Stack "prod/app" ◀── clone of templates       │
//! │                                                              │
//! │  action ──▶ before_<action> ──▶ operation ──▶ after_<action> │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod actions;
mod project;

pub use actions::{Action, ActionError, StackStatus, run_action, select_stacks};
pub use project::ProjectConfig;
