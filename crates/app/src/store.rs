//! Automation store — the single source of truth for the automation
//! collection and the navigation cursor.
//!
//! All mutation goes through [`AutomationState::apply`], a synchronous
//! transition that never rejects a well-formed message. Messages naming an
//! unknown id are silent no-ops.

use std::fmt;

use serde::{Deserialize, Serialize};

use autoflow_domain::automation::{Automation, AutomationPatch};
use autoflow_domain::id::AutomationId;

use crate::ports::StoreObserver;

/// Snapshot of the store: automations in display order plus the active id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationState {
    automations: Vec<Automation>,
    active_id: Option<AutomationId>,
}

impl AutomationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Automations in insertion order.
    #[must_use]
    pub fn automations(&self) -> &[Automation] {
        &self.automations
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&AutomationId> {
        self.active_id.as_ref()
    }

    #[must_use]
    pub fn get(&self, id: &AutomationId) -> Option<&Automation> {
        self.automations.iter().find(|a| &a.id == id)
    }

    /// The automation open in the configuration view, if the cursor points at one.
    #[must_use]
    pub fn active(&self) -> Option<&Automation> {
        self.active_id.as_ref().and_then(|id| self.get(id))
    }

    /// Which top-level view to show. A cursor that points at nothing shows the list.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        match self.active() {
            Some(automation) => View::Configure(automation),
            None => View::List,
        }
    }

    fn get_mut(&mut self, id: &AutomationId) -> Option<&mut Automation> {
        self.automations.iter_mut().find(|a| &a.id == id)
    }

    /// Apply one message in place.
    ///
    /// Returns `false` when the message named an automation that does not
    /// exist, in which case the state is left untouched.
    pub fn apply(&mut self, message: StoreMessage) -> bool {
        match message {
            StoreMessage::AddAutomation { automation } => {
                debug_assert!(
                    self.get(&automation.id).is_none(),
                    "automation id {} already present",
                    automation.id
                );
                self.active_id = Some(automation.id.clone());
                self.automations.push(automation);
                true
            }
            StoreMessage::UpdateAutomation { id, automation } => match self.get_mut(&id) {
                Some(existing) => {
                    automation.apply_to(existing);
                    true
                }
                None => false,
            },
            StoreMessage::DeleteAutomation { id } => {
                let before = self.automations.len();
                self.automations.retain(|a| a.id != id);
                if self.active_id.as_ref() == Some(&id) {
                    self.active_id = None;
                }
                self.automations.len() != before
            }
            StoreMessage::SetActive { id } => {
                self.active_id = id;
                true
            }
            StoreMessage::ToggleAutomation { id, enabled } => match self.get_mut(&id) {
                Some(existing) => {
                    existing.enabled = enabled;
                    true
                }
                None => false,
            },
        }
    }
}

/// Pure transition: compute the next state without touching `state`.
#[must_use]
pub fn reduce(state: &AutomationState, message: StoreMessage) -> AutomationState {
    let mut next = state.clone();
    next.apply(message);
    next
}

/// Top-level view derived from the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    List,
    Configure(&'a Automation),
}

/// A request to change the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreMessage {
    /// Append an automation and make it active. The id must not be present yet.
    AddAutomation { automation: Automation },
    /// Merge the present fields of `automation` into the automation `id`.
    UpdateAutomation {
        id: AutomationId,
        automation: AutomationPatch,
    },
    /// Remove an automation; clears the cursor if it pointed there.
    DeleteAutomation { id: AutomationId },
    /// Move the cursor. The id is not checked.
    SetActive { id: Option<AutomationId> },
    ToggleAutomation { id: AutomationId, enabled: bool },
}

impl StoreMessage {
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::AddAutomation { .. } => MessageKind::AddAutomation,
            Self::UpdateAutomation { .. } => MessageKind::UpdateAutomation,
            Self::DeleteAutomation { .. } => MessageKind::DeleteAutomation,
            Self::SetActive { .. } => MessageKind::SetActive,
            Self::ToggleAutomation { .. } => MessageKind::ToggleAutomation,
        }
    }
}

/// The type of a [`StoreMessage`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    AddAutomation,
    UpdateAutomation,
    DeleteAutomation,
    SetActive,
    ToggleAutomation,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AddAutomation => "ADD_AUTOMATION",
            Self::UpdateAutomation => "UPDATE_AUTOMATION",
            Self::DeleteAutomation => "DELETE_AUTOMATION",
            Self::SetActive => "SET_ACTIVE",
            Self::ToggleAutomation => "TOGGLE_AUTOMATION",
        })
    }
}

/// Published after every dispatch, including no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreChange {
    /// Number of dispatches so far, starting at 1.
    pub revision: u64,
    pub message: MessageKind,
    /// `false` when the message named an unknown id.
    pub applied: bool,
}

/// Owns the [`AutomationState`] and notifies an observer on every dispatch.
pub struct AutomationStore<O> {
    state: AutomationState,
    revision: u64,
    observer: O,
}

impl<O: StoreObserver> AutomationStore<O> {
    /// Create an empty store.
    pub fn new(observer: O) -> Self {
        Self {
            state: AutomationState::new(),
            revision: 0,
            observer,
        }
    }

    /// Read-only snapshot.
    pub fn state(&self) -> &AutomationState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `message` and notify the observer. Returns whether it applied.
    pub fn dispatch(&mut self, message: StoreMessage) -> bool {
        let kind = message.kind();
        let applied = self.state.apply(message);
        self.revision += 1;
        if applied {
            tracing::debug!(revision = self.revision, message = %kind, "store message applied");
        } else {
            tracing::debug!(revision = self.revision, message = %kind, "store message ignored, unknown id");
        }
        self.observer.notify(StoreChange {
            revision: self.revision,
            message: kind,
            applied,
        });
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessChangeBus;
    use autoflow_domain::automation::Trigger;

    fn blank(id: &str) -> Automation {
        Automation::builder().id(id).name(id).enabled(false).build()
    }

    fn state_with(ids: &[&str]) -> AutomationState {
        ids.iter().fold(AutomationState::new(), |state, id| {
            reduce(
                &state,
                StoreMessage::AddAutomation {
                    automation: blank(id),
                },
            )
        })
    }

    #[test]
    fn should_append_and_activate_when_adding() {
        let state = state_with(&["a1", "a2"]);
        let ids: Vec<&str> = state.automations().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(state.active_id().map(AutomationId::as_str), Some("a2"));
    }

    #[test]
    fn should_leave_state_unchanged_when_updating_unknown_id() {
        let state = state_with(&["a1"]);
        let next = reduce(
            &state,
            StoreMessage::UpdateAutomation {
                id: AutomationId::from("missing"),
                automation: AutomationPatch::default().name("renamed"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn should_merge_partial_update_into_matching_automation() {
        let state = state_with(&["a1", "a2"]);
        let next = reduce(
            &state,
            StoreMessage::UpdateAutomation {
                id: AutomationId::from("a1"),
                automation: AutomationPatch::default().trigger(Trigger::RecordCreated {}),
            },
        );
        let a1 = next.get(&AutomationId::from("a1")).unwrap();
        assert_eq!(a1.trigger, Some(Trigger::RecordCreated {}));
        assert_eq!(a1.name, "a1");
        assert_eq!(next.automations()[1], state.automations()[1]);
    }

    #[test]
    fn should_clear_cursor_when_deleting_active_automation() {
        let state = state_with(&["a1"]);
        let next = reduce(
            &state,
            StoreMessage::DeleteAutomation {
                id: AutomationId::from("a1"),
            },
        );
        assert!(next.automations().is_empty());
        assert!(next.active_id().is_none());
    }

    #[test]
    fn should_keep_cursor_when_deleting_other_automation() {
        let state = state_with(&["a1", "a2"]);
        let next = reduce(
            &state,
            StoreMessage::DeleteAutomation {
                id: AutomationId::from("a1"),
            },
        );
        assert_eq!(next.automations().len(), 1);
        assert_eq!(next.active_id().map(AutomationId::as_str), Some("a2"));
    }

    #[test]
    fn should_toggle_enabled_flag() {
        let state = state_with(&["a1"]);
        let next = reduce(
            &state,
            StoreMessage::ToggleAutomation {
                id: AutomationId::from("a1"),
                enabled: true,
            },
        );
        assert!(next.automations()[0].enabled);
    }

    #[test]
    fn should_ignore_toggle_for_unknown_id() {
        let mut state = state_with(&["a1"]);
        let applied = state.apply(StoreMessage::ToggleAutomation {
            id: AutomationId::from("zz"),
            enabled: true,
        });
        assert!(!applied);
        assert!(!state.automations()[0].enabled);
    }

    #[test]
    fn should_show_list_view_when_cursor_is_cleared() {
        let mut state = state_with(&["a1"]);
        assert!(matches!(state.view(), View::Configure(a) if a.id.as_str() == "a1"));
        state.apply(StoreMessage::SetActive { id: None });
        assert_eq!(state.view(), View::List);
    }

    #[test]
    fn should_accept_dangling_cursor_but_resolve_it_to_list_view() {
        let mut state = state_with(&["a1"]);
        state.apply(StoreMessage::SetActive {
            id: Some(AutomationId::from("ghost")),
        });
        assert_eq!(state.active_id().map(AutomationId::as_str), Some("ghost"));
        assert!(state.active().is_none());
        assert_eq!(state.view(), View::List);
    }

    #[test]
    fn should_deserialize_messages_in_wire_shape() {
        let json = serde_json::json!({
            "type": "UPDATE_AUTOMATION",
            "id": "a1",
            "automation": {"trigger": {"type": "record-created", "config": {}}}
        });
        let message: StoreMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message.kind(), MessageKind::UpdateAutomation);

        let json = serde_json::json!({"type": "SET_ACTIVE", "id": null});
        let message: StoreMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message, StoreMessage::SetActive { id: None });
    }

    #[test]
    fn should_serialize_snapshot_with_camel_case_active_id() {
        let state = state_with(&["a1"]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["activeId"], "a1");
        assert_eq!(json["automations"][0]["id"], "a1");
    }

    #[test]
    fn should_bump_revision_on_every_dispatch_including_no_ops() {
        let mut store = AutomationStore::new(InProcessChangeBus::new(8));
        let mut rx = store_subscribe(&store);

        assert!(store.dispatch(StoreMessage::AddAutomation {
            automation: blank("a1")
        }));
        assert!(!store.dispatch(StoreMessage::DeleteAutomation {
            id: AutomationId::from("nope")
        }));

        assert_eq!(store.revision(), 2);
        let first = rx.try_recv().unwrap();
        assert_eq!(first.revision, 1);
        assert!(first.applied);
        let second = rx.try_recv().unwrap();
        assert_eq!(second.message, MessageKind::DeleteAutomation);
        assert!(!second.applied);
    }

    fn store_subscribe(
        store: &AutomationStore<InProcessChangeBus>,
    ) -> tokio::sync::broadcast::Receiver<StoreChange> {
        store.observer.subscribe()
    }
}
