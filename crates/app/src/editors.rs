//! Staged-edit buffers for the three parts of an automation.
//!
//! An editor copies its slice of the automation when opened, lets the
//! caller mutate that copy freely and only hands a value back on save.
//! Dropping an editor is the cancel path: the store is never touched
//! mid-edit.

pub mod action_editor;
pub mod condition_editor;
pub mod trigger_editor;

pub use action_editor::{ActionDraft, ActionEditor};
pub use condition_editor::ConditionEditor;
pub use trigger_editor::{TriggerEditor, TriggerField};
