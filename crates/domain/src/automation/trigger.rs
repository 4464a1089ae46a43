//! Trigger — the event that would start an automation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Describes what event should start an automation.
///
/// Serialised as `{"type": "<kind>", "config": {...}}`. Only
/// `field-modified` and `time-reached` carry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "kebab-case")]
pub enum Trigger {
    /// A field of a record was modified.
    FieldModified {
        /// Name of the watched field.
        #[serde(default)]
        field: String,
    },
    /// A record was created.
    RecordCreated {},
    /// A point in time was reached.
    TimeReached {
        /// Local date-time, as entered in the editor.
        #[serde(default)]
        time: String,
    },
    /// A meeting is about to start.
    MeetingUpcoming {},
    /// A meeting summary finished generating.
    MeetingSummary {},
    RecordAdded {},
    RecordModified {},
    RecordMatchesConditions {},
    DateReached {},
    ScheduledTime {},
    ButtonClicked {},
    WebhookReceived {},
}

impl Trigger {
    /// The fieldless kind of this trigger.
    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::FieldModified { .. } => TriggerKind::FieldModified,
            Self::RecordCreated {} => TriggerKind::RecordCreated,
            Self::TimeReached { .. } => TriggerKind::TimeReached,
            Self::MeetingUpcoming {} => TriggerKind::MeetingUpcoming,
            Self::MeetingSummary {} => TriggerKind::MeetingSummary,
            Self::RecordAdded {} => TriggerKind::RecordAdded,
            Self::RecordModified {} => TriggerKind::RecordModified,
            Self::RecordMatchesConditions {} => TriggerKind::RecordMatchesConditions,
            Self::DateReached {} => TriggerKind::DateReached,
            Self::ScheduledTime {} => TriggerKind::ScheduledTime,
            Self::ButtonClicked {} => TriggerKind::ButtonClicked,
            Self::WebhookReceived {} => TriggerKind::WebhookReceived,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldModified { field } => write!(f, "field-modified({field})"),
            Self::TimeReached { time } => write!(f, "time-reached({time})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

/// The type of a [`Trigger`] without its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    FieldModified,
    RecordCreated,
    TimeReached,
    MeetingUpcoming,
    MeetingSummary,
    RecordAdded,
    RecordModified,
    RecordMatchesConditions,
    DateReached,
    ScheduledTime,
    ButtonClicked,
    WebhookReceived,
}

impl TriggerKind {
    /// Every known trigger kind, editor choices first.
    pub const ALL: [Self; 12] = [
        Self::FieldModified,
        Self::RecordCreated,
        Self::TimeReached,
        Self::MeetingUpcoming,
        Self::MeetingSummary,
        Self::RecordAdded,
        Self::RecordModified,
        Self::RecordMatchesConditions,
        Self::DateReached,
        Self::ScheduledTime,
        Self::ButtonClicked,
        Self::WebhookReceived,
    ];

    /// The kinds offered by the trigger editor's selector.
    pub const EDITOR_CHOICES: [Self; 5] = [
        Self::FieldModified,
        Self::RecordCreated,
        Self::TimeReached,
        Self::MeetingUpcoming,
        Self::MeetingSummary,
    ];

    /// Wire name, e.g. `"field-modified"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FieldModified => "field-modified",
            Self::RecordCreated => "record-created",
            Self::TimeReached => "time-reached",
            Self::MeetingUpcoming => "meeting-upcoming",
            Self::MeetingSummary => "meeting-summary",
            Self::RecordAdded => "record-added",
            Self::RecordModified => "record-modified",
            Self::RecordMatchesConditions => "record-matches-conditions",
            Self::DateReached => "date-reached",
            Self::ScheduledTime => "scheduled-time",
            Self::ButtonClicked => "button-clicked",
            Self::WebhookReceived => "webhook-received",
        }
    }

    /// Human-readable label shown next to the choice.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FieldModified => "当某个字段被修改",
            Self::RecordCreated => "当某条记录被创建",
            Self::TimeReached => "当某个时间点到达",
            Self::MeetingUpcoming => "当会议即将开始",
            Self::MeetingSummary => "当 meeting summary 创建完成",
            Self::RecordAdded => "When a record is added",
            Self::RecordModified => "When a record is modified",
            Self::RecordMatchesConditions => "When a new/modified record meets conditions",
            Self::DateReached => "When a time in the record is reached",
            Self::ScheduledTime => "Scheduled trigger",
            Self::ButtonClicked => "When a button is clicked",
            Self::WebhookReceived => "When a webhook is received",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "trigger type",
                value: s.to_string(),
            })
    }
}
