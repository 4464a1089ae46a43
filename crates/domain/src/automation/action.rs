//! Action — the effect an automation would perform when it fires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ActionId;

/// One entry of an automation's ordered action list.
///
/// Serialised flat: `{"id": "...", "type": "<kind>", "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    #[serde(flatten)]
    pub effect: ActionEffect,
}

impl Action {
    #[must_use]
    pub fn new(id: ActionId, effect: ActionEffect) -> Self {
        Self { id, effect }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.effect.kind()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.effect, f)
    }
}

/// Typed configuration of an [`Action`], keyed by its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "kebab-case")]
pub enum ActionEffect {
    /// Set a field of the record to a new value.
    UpdateField {
        #[serde(default)]
        field: String,
        #[serde(default)]
        value: String,
    },
    /// Notify someone.
    SendNotification {
        #[serde(default)]
        to: String,
        #[serde(default)]
        message: String,
    },
    /// Create a new record with the given content.
    CreateRecord {
        #[serde(default)]
        content: String,
    },
    /// Run an AI prompt.
    CallAi {
        #[serde(default)]
        prompt: String,
    },
}

impl ActionEffect {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::UpdateField { .. } => ActionKind::UpdateField,
            Self::SendNotification { .. } => ActionKind::SendNotification,
            Self::CreateRecord { .. } => ActionKind::CreateRecord,
            Self::CallAi { .. } => ActionKind::CallAi,
        }
    }

    /// Read one configuration field, `None` if this variant has no such field.
    #[must_use]
    pub fn get(&self, field: ActionField) -> Option<&str> {
        match (self, field) {
            (Self::UpdateField { field: f, .. }, ActionField::Field) => Some(f.as_str()),
            (Self::UpdateField { value, .. }, ActionField::Value) => Some(value.as_str()),
            (Self::SendNotification { to, .. }, ActionField::To) => Some(to.as_str()),
            (Self::SendNotification { message, .. }, ActionField::Message) => Some(message.as_str()),
            (Self::CreateRecord { content }, ActionField::Content) => Some(content.as_str()),
            (Self::CallAi { prompt }, ActionField::Prompt) => Some(prompt.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ActionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateField { field, value } => write!(f, "update-field({field} := {value})"),
            Self::SendNotification { to, .. } => write!(f, "send-notification({to})"),
            Self::CreateRecord { content } => write!(f, "create-record({content})"),
            Self::CallAi { .. } => f.write_str("call-ai"),
        }
    }
}

/// The type of an [`Action`] without its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    UpdateField,
    SendNotification,
    CreateRecord,
    CallAi,
}

impl ActionKind {
    pub const ALL: [Self; 4] = [
        Self::UpdateField,
        Self::SendNotification,
        Self::CreateRecord,
        Self::CallAi,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateField => "update-field",
            Self::SendNotification => "send-notification",
            Self::CreateRecord => "create-record",
            Self::CallAi => "call-ai",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UpdateField => "修改字段值",
            Self::SendNotification => "发送通知",
            Self::CreateRecord => "创建新记录",
            Self::CallAi => "调用 AI 能力",
        }
    }

    /// Configuration fields the editor reveals for this kind, in display order.
    #[must_use]
    pub fn fields(self) -> &'static [ActionField] {
        match self {
            Self::UpdateField => &[ActionField::Field, ActionField::Value],
            Self::SendNotification => &[ActionField::To, ActionField::Message],
            Self::CreateRecord => &[ActionField::Content],
            Self::CallAi => &[ActionField::Prompt],
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "action type",
                value: s.to_string(),
            })
    }
}

/// A text input of the action sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionField {
    Field,
    Value,
    To,
    Message,
    Content,
    Prompt,
}

impl ActionField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Field => "字段名",
            Self::Value => "新值",
            Self::To => "通知对象",
            Self::Message => "消息内容",
            Self::Content => "记录内容",
            Self::Prompt => "AI 指令",
        }
    }
}
