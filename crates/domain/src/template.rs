//! Canned automation templates.
//!
//! Importing a template overwrites trigger, conditions and actions in one
//! update; it never merges with what was there.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::automation::{
    Action, ActionEffect, AutomationPatch, Condition, Operator, Trigger,
};
use crate::error::ValidationError;
use crate::id::{ActionId, ConditionId};

/// The fixed set of templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    /// Notify the assignee when a task's status changes.
    Remind,
    /// Create a follow-up record when a record is created.
    CreateSubtask,
}

impl TemplateId {
    pub const ALL: [Self; 2] = [Self::Remind, Self::CreateSubtask];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remind => "remind",
            Self::CreateSubtask => "create-subtask",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Remind => "状态改动时提醒负责人",
            Self::CreateSubtask => "任务完成时自动创建子任务",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Remind => "当任务状态变更时自动通知负责人",
            Self::CreateSubtask => "任务完成后自动生成相关子任务",
        }
    }

    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Self::Remind => "通知提醒",
            Self::CreateSubtask => "任务管理",
        }
    }

    /// Highlighted as popular in the template picker.
    #[must_use]
    pub fn is_popular(self) -> bool {
        matches!(self, Self::Remind)
    }

    /// The full-overwrite update this template applies.
    #[must_use]
    pub fn patch(self) -> AutomationPatch {
        match self {
            Self::Remind => AutomationPatch::default()
                .trigger(Trigger::FieldModified {
                    field: "status".to_string(),
                })
                .conditions(vec![Condition {
                    id: ConditionId::from("1"),
                    field: "status".to_string(),
                    operator: Operator::Eq,
                    value: serde_json::Value::String("completed".to_string()),
                }])
                .actions(vec![Action::new(
                    ActionId::from("1"),
                    ActionEffect::SendNotification {
                        to: "assignee".to_string(),
                        message: "任务已完成".to_string(),
                    },
                )]),
            Self::CreateSubtask => AutomationPatch::default()
                .trigger(Trigger::RecordCreated {})
                .conditions(Vec::new())
                .actions(vec![Action::new(
                    ActionId::from("1"),
                    ActionEffect::CreateRecord {
                        content: "子任务".to_string(),
                    },
                )]),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "template",
                value: s.to_string(),
            })
    }
}
