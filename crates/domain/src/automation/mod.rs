//! Automation — trigger → condition → action rules.
//!
//! An automation has at most one [`Trigger`], an ordered list of
//! [`Condition`]s and an ordered list of [`Action`]s. Nothing is ever
//! executed; the model only describes the rule while it is being built.

mod action;
mod condition;
mod trigger;

pub use action::{Action, ActionEffect, ActionField, ActionKind};
pub use condition::{Condition, ConditionLogic, Operator};
pub use trigger::{Trigger, TriggerKind};

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::AutomationId;

/// Name given to automations created without one.
pub const DEFAULT_NAME: &str = "未命名自动化";

/// A user-defined rule under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub name: String,
    pub enabled: bool,
    pub trigger: Option<Trigger>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// An automation is complete once it has a trigger and at least one action.
    /// Conditions never matter.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.trigger.is_some() && !self.actions.is_empty()
    }

    /// Whether any part of the rule has been configured yet.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.trigger.is_some() || !self.conditions.is_empty() || !self.actions.is_empty()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        if self.is_complete() {
            Stage::Complete
        } else if self.has_started() {
            Stage::InProgress
        } else {
            Stage::Empty
        }
    }
}

/// Where an automation is in its configuration lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// No trigger, no conditions, no actions.
    Empty,
    /// Something is set but the trigger or the actions are still missing.
    InProgress,
    /// Trigger set and at least one action.
    Complete,
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    enabled: Option<bool>,
    trigger: Option<Trigger>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<AutomationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder. Missing fields fall back to a fresh id,
    /// [`DEFAULT_NAME`], `enabled = true` and no trigger.
    #[must_use]
    pub fn build(self) -> Automation {
        Automation {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            enabled: self.enabled.unwrap_or(true),
            trigger: self.trigger,
            conditions: self.conditions,
            actions: self.actions,
        }
    }
}

/// Partial update carried by `UPDATE_AUTOMATION`.
///
/// `None` leaves a field untouched. For the trigger, `Some(None)` clears it
/// (JSON `null`) while an absent key leaves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub trigger: Option<Option<Trigger>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

/// Marks a key that is present in the input, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl AutomationPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(Some(trigger));
        self
    }

    #[must_use]
    pub fn clear_trigger(mut self) -> Self {
        self.trigger = Some(None);
        self
    }

    #[must_use]
    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Whether the patch would leave every field untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.enabled.is_none()
            && self.trigger.is_none()
            && self.conditions.is_none()
            && self.actions.is_none()
    }

    /// Merge the present fields into `automation`. The id is never touched.
    pub fn apply_to(self, automation: &mut Automation) {
        if let Some(name) = self.name {
            automation.name = name;
        }
        if let Some(enabled) = self.enabled {
            automation.enabled = enabled;
        }
        if let Some(trigger) = self.trigger {
            automation.trigger = trigger;
        }
        if let Some(conditions) = self.conditions {
            automation.conditions = conditions;
        }
        if let Some(actions) = self.actions {
            automation.actions = actions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{ActionId, ConditionId};

    fn notify_action() -> Action {
        Action::new(
            ActionId::from("n1"),
            ActionEffect::SendNotification {
                to: "assignee".to_string(),
                message: "hi".to_string(),
            },
        )
    }

    fn status_condition() -> Condition {
        Condition {
            id: ConditionId::from("c1"),
            field: "status".to_string(),
            operator: Operator::Eq,
            value: serde_json::json!("done"),
        }
    }

    #[test]
    fn should_build_empty_automation_with_defaults() {
        let auto = Automation::builder().build();
        assert_eq!(auto.name, DEFAULT_NAME);
        assert!(auto.enabled);
        assert!(auto.trigger.is_none());
        assert!(auto.conditions.is_empty());
        assert!(auto.actions.is_empty());
        assert_eq!(auto.stage(), Stage::Empty);
    }

    #[test]
    fn should_set_custom_id_and_disabled_flag_via_builder() {
        let auto = Automation::builder().id("a1").name("x").enabled(false).build();
        assert_eq!(auto.id.as_str(), "a1");
        assert_eq!(auto.name, "x");
        assert!(!auto.enabled);
    }

    #[test]
    fn should_be_complete_only_with_trigger_and_action() {
        let trigger_only = Automation::builder()
            .trigger(Trigger::RecordCreated {})
            .build();
        assert!(!trigger_only.is_complete());

        let action_only = Automation::builder().action(notify_action()).build();
        assert!(!action_only.is_complete());

        let both = Automation::builder()
            .trigger(Trigger::RecordCreated {})
            .action(notify_action())
            .build();
        assert!(both.is_complete());
    }

    #[test]
    fn should_ignore_conditions_for_completeness() {
        let auto = Automation::builder()
            .trigger(Trigger::RecordCreated {})
            .condition(status_condition())
            .build();
        assert!(!auto.is_complete());
        assert_eq!(auto.stage(), Stage::InProgress);
    }

    #[test]
    fn should_count_conditions_as_started() {
        let auto = Automation::builder().condition(status_condition()).build();
        assert!(auto.has_started());
        assert_eq!(auto.stage(), Stage::InProgress);
    }

    #[test]
    fn should_merge_only_present_patch_fields() {
        let mut auto = Automation::builder()
            .id("a1")
            .name("before")
            .trigger(Trigger::RecordCreated {})
            .action(notify_action())
            .build();

        AutomationPatch::default().name("after").apply_to(&mut auto);

        assert_eq!(auto.name, "after");
        assert_eq!(auto.trigger, Some(Trigger::RecordCreated {}));
        assert_eq!(auto.actions.len(), 1);
        assert_eq!(auto.id.as_str(), "a1");
    }

    #[test]
    fn should_clear_trigger_when_patch_says_so() {
        let mut auto = Automation::builder()
            .trigger(Trigger::RecordCreated {})
            .build();
        AutomationPatch::default().clear_trigger().apply_to(&mut auto);
        assert!(auto.trigger.is_none());
    }

    #[test]
    fn should_report_empty_patch() {
        assert!(AutomationPatch::default().is_empty());
        assert!(!AutomationPatch::default().enabled(false).is_empty());
    }

    #[test]
    fn should_distinguish_null_trigger_from_absent_trigger() {
        let cleared: AutomationPatch =
            serde_json::from_value(serde_json::json!({"trigger": null})).unwrap();
        assert_eq!(cleared.trigger, Some(None));

        let untouched: AutomationPatch =
            serde_json::from_value(serde_json::json!({"name": "n"})).unwrap();
        assert_eq!(untouched.trigger, None);
    }

    #[test]
    fn should_deserialize_patch_with_trigger() {
        let patch: AutomationPatch = serde_json::from_value(serde_json::json!({
            "trigger": {"type": "record-created", "config": {}}
        }))
        .unwrap();
        assert_eq!(patch.trigger, Some(Some(Trigger::RecordCreated {})));
    }

    #[test]
    fn should_roundtrip_automation_through_serde_json() {
        let auto = Automation::builder()
            .name("Round trip")
            .trigger(Trigger::FieldModified {
                field: "status".to_string(),
            })
            .condition(status_condition())
            .action(notify_action())
            .build();
        let json = serde_json::to_string(&auto).unwrap();
        let parsed: Automation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, auto);
    }
}
