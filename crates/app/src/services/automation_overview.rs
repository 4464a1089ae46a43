//! Automation overview — configuration view for one automation.
//!
//! Shows the three steps with their progress, hosts at most one editor panel
//! at a time, and applies templates.

use autoflow_domain::automation::{Automation, AutomationPatch};
use autoflow_domain::error::{AutoflowError, NotFoundError};
use autoflow_domain::id::AutomationId;
use autoflow_domain::progress::{Progress, Step};
use autoflow_domain::template::TemplateId;

use crate::editors::{ActionEditor, ConditionEditor, TriggerEditor};
use crate::ports::StoreObserver;
use crate::store::{AutomationState, AutomationStore, StoreMessage};

/// The editor currently open on the overview.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorPanel {
    Trigger(TriggerEditor),
    Condition(ConditionEditor),
    Action(ActionEditor),
}

impl EditorPanel {
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Trigger(_) => Step::Trigger,
            Self::Condition(_) => Step::Condition,
            Self::Action(_) => Step::Action,
        }
    }

    fn into_patch(self) -> Result<AutomationPatch, AutoflowError> {
        Ok(match self {
            Self::Trigger(editor) => AutomationPatch::default().trigger(editor.save()?),
            Self::Condition(editor) => AutomationPatch::default().conditions(editor.save()),
            Self::Action(editor) => AutomationPatch::default().actions(editor.save()),
        })
    }
}

/// Overview orchestrator bound to one automation id.
#[derive(Debug, Clone)]
pub struct AutomationOverview {
    id: AutomationId,
    name_draft: String,
    panel: Option<EditorPanel>,
}

impl AutomationOverview {
    /// Bind to `id`, seeding the name input from the store.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when `id` is not in the store.
    pub fn open(state: &AutomationState, id: &AutomationId) -> Result<Self, NotFoundError> {
        let automation = lookup(state, id)?;
        Ok(Self {
            id: id.clone(),
            name_draft: automation.name.clone(),
            panel: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &AutomationId {
        &self.id
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the automation was deleted meanwhile.
    pub fn automation<'s>(
        &self,
        state: &'s AutomationState,
    ) -> Result<&'s Automation, NotFoundError> {
        lookup(state, &self.id)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the automation was deleted meanwhile.
    pub fn progress(&self, state: &AutomationState) -> Result<Progress, NotFoundError> {
        self.automation(state).map(Progress::of)
    }

    #[must_use]
    pub fn name_draft(&self) -> &str {
        &self.name_draft
    }

    pub fn set_name_draft(&mut self, name: impl Into<String>) {
        self.name_draft = name.into();
    }

    /// Store the name input as typed. Returns whether the automation still exists.
    pub fn commit_name<O: StoreObserver>(&self, store: &mut AutomationStore<O>) -> bool {
        store.dispatch(StoreMessage::UpdateAutomation {
            id: self.id.clone(),
            automation: AutomationPatch::default().name(self.name_draft.clone()),
        })
    }

    /// Open the trigger editor seeded from the store, closing any other panel.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the automation was deleted meanwhile.
    pub fn open_trigger_editor(&mut self, state: &AutomationState) -> Result<(), NotFoundError> {
        let editor = TriggerEditor::open(self.automation(state)?.trigger.as_ref());
        self.panel = Some(EditorPanel::Trigger(editor));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the automation was deleted meanwhile.
    pub fn open_condition_editor(&mut self, state: &AutomationState) -> Result<(), NotFoundError> {
        let editor = ConditionEditor::open(&self.automation(state)?.conditions);
        self.panel = Some(EditorPanel::Condition(editor));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the automation was deleted meanwhile.
    pub fn open_action_editor(&mut self, state: &AutomationState) -> Result<(), NotFoundError> {
        let editor = ActionEditor::open(&self.automation(state)?.actions);
        self.panel = Some(EditorPanel::Action(editor));
        Ok(())
    }

    #[must_use]
    pub fn panel(&self) -> Option<&EditorPanel> {
        self.panel.as_ref()
    }

    pub fn trigger_editor_mut(&mut self) -> Option<&mut TriggerEditor> {
        match &mut self.panel {
            Some(EditorPanel::Trigger(editor)) => Some(editor),
            _ => None,
        }
    }

    pub fn condition_editor_mut(&mut self) -> Option<&mut ConditionEditor> {
        match &mut self.panel {
            Some(EditorPanel::Condition(editor)) => Some(editor),
            _ => None,
        }
    }

    pub fn action_editor_mut(&mut self) -> Option<&mut ActionEditor> {
        match &mut self.panel {
            Some(EditorPanel::Action(editor)) => Some(editor),
            _ => None,
        }
    }

    /// Discard the open panel's staged edits.
    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    /// Commit the open panel as one update and close it.
    ///
    /// Returns `Ok(false)` when no panel was open. A trigger panel without a
    /// type stays open and nothing is dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`AutoflowError::Validation`] when the panel refuses to save.
    #[tracing::instrument(skip(self, store), fields(automation_id = %self.id))]
    pub fn save_panel<O: StoreObserver>(
        &mut self,
        store: &mut AutomationStore<O>,
    ) -> Result<bool, AutoflowError> {
        let Some(panel) = self.panel.take() else {
            return Ok(false);
        };
        let step = panel.step();
        let patch = match panel.clone().into_patch() {
            Ok(patch) => patch,
            Err(err) => {
                self.panel = Some(panel);
                return Err(err);
            }
        };
        let applied = store.dispatch(StoreMessage::UpdateAutomation {
            id: self.id.clone(),
            automation: patch,
        });
        tracing::info!(step = step.title(), applied, "editor saved");
        Ok(applied)
    }

    /// Overwrite trigger, conditions and actions with a template.
    #[tracing::instrument(skip(self, store), fields(automation_id = %self.id))]
    pub fn import_template<O: StoreObserver>(
        &self,
        store: &mut AutomationStore<O>,
        template: TemplateId,
    ) -> bool {
        let applied = store.dispatch(StoreMessage::UpdateAutomation {
            id: self.id.clone(),
            automation: template.patch(),
        });
        tracing::info!(%template, applied, "template imported");
        applied
    }

    /// Return to the list view. Unsaved panel edits are dropped.
    pub fn back<O: StoreObserver>(self, store: &mut AutomationStore<O>) {
        store.dispatch(StoreMessage::SetActive { id: None });
    }
}

fn lookup<'s>(
    state: &'s AutomationState,
    id: &AutomationId,
) -> Result<&'s Automation, NotFoundError> {
    state.get(id).ok_or_else(|| NotFoundError {
        entity: "Automation",
        id: id.to_string(),
    })
}
