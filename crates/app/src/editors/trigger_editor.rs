//! Trigger editor — single choice of trigger type plus its extra fields.

use autoflow_domain::automation::{Trigger, TriggerKind};
use autoflow_domain::error::ValidationError;

/// Extra input revealed for some trigger types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerField {
    /// Watched field name, for `field-modified`.
    Field,
    /// Date-time, for `time-reached`.
    Time,
}

impl TriggerField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Field => "字段名",
            Self::Time => "时间点",
        }
    }
}

/// Staged copy of an automation's trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerEditor {
    kind: Option<TriggerKind>,
    field: String,
    time: String,
}

impl TriggerEditor {
    /// Seed the buffer from the current trigger, if any.
    #[must_use]
    pub fn open(initial: Option<&Trigger>) -> Self {
        let mut editor = Self::default();
        if let Some(trigger) = initial {
            editor.kind = Some(trigger.kind());
            match trigger {
                Trigger::FieldModified { field } => editor.field.clone_from(field),
                Trigger::TimeReached { time } => editor.time.clone_from(time),
                _ => {}
            }
        }
        editor
    }

    #[must_use]
    pub fn kind(&self) -> Option<TriggerKind> {
        self.kind
    }

    /// Pick a trigger type, or `None` for the empty "please choose" entry.
    pub fn select(&mut self, kind: Option<TriggerKind>) {
        self.kind = kind;
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn set_field(&mut self, field: impl Into<String>) {
        self.field = field.into();
    }

    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    /// Inputs to show for the selected type.
    #[must_use]
    pub fn visible_fields(&self) -> &'static [TriggerField] {
        match self.kind {
            Some(TriggerKind::FieldModified) => &[TriggerField::Field],
            Some(TriggerKind::TimeReached) => &[TriggerField::Time],
            Some(
                TriggerKind::RecordCreated
                | TriggerKind::MeetingUpcoming
                | TriggerKind::MeetingSummary
                | TriggerKind::RecordAdded
                | TriggerKind::RecordModified
                | TriggerKind::RecordMatchesConditions
                | TriggerKind::DateReached
                | TriggerKind::ScheduledTime
                | TriggerKind::ButtonClicked
                | TriggerKind::WebhookReceived,
            )
            | None => &[],
        }
    }

    /// Save is only offered once a type is selected.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.kind.is_some()
    }

    /// Build the trigger to commit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTriggerType`] when no type is selected.
    pub fn save(&self) -> Result<Trigger, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingTriggerType)?;
        Ok(match kind {
            TriggerKind::FieldModified => Trigger::FieldModified {
                field: self.field.clone(),
            },
            TriggerKind::RecordCreated => Trigger::RecordCreated {},
            TriggerKind::TimeReached => Trigger::TimeReached {
                time: self.time.clone(),
            },
            TriggerKind::MeetingUpcoming => Trigger::MeetingUpcoming {},
            TriggerKind::MeetingSummary => Trigger::MeetingSummary {},
            TriggerKind::RecordAdded => Trigger::RecordAdded {},
            TriggerKind::RecordModified => Trigger::RecordModified {},
            TriggerKind::RecordMatchesConditions => Trigger::RecordMatchesConditions {},
            TriggerKind::DateReached => Trigger::DateReached {},
            TriggerKind::ScheduledTime => Trigger::ScheduledTime {},
            TriggerKind::ButtonClicked => Trigger::ButtonClicked {},
            TriggerKind::WebhookReceived => Trigger::WebhookReceived {},
        })
    }
}
