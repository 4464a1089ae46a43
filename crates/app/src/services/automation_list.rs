//! Automation list — create, rename, toggle, open and delete automations.

use serde::Serialize;

use autoflow_domain::automation::{Automation, AutomationPatch, DEFAULT_NAME, Stage};
use autoflow_domain::error::NotFoundError;
use autoflow_domain::id::AutomationId;
use autoflow_domain::progress::Progress;

use crate::ports::StoreObserver;
use crate::store::{AutomationState, AutomationStore, StoreMessage};

/// Prompt shown before a delete is confirmed.
pub const DELETE_PROMPT: &str = "确定要删除该自动化吗？";

/// Field values for a freshly added automation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAutomationDefaults {
    pub name: String,
    pub enabled: bool,
}

impl Default for NewAutomationDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            enabled: true,
        }
    }
}

/// One line of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRow {
    pub id: AutomationId,
    pub name: String,
    pub enabled: bool,
    pub stage: Stage,
    pub progress: u8,
}

impl From<&Automation> for AutomationRow {
    fn from(automation: &Automation) -> Self {
        Self {
            id: automation.id.clone(),
            name: automation.name.clone(),
            enabled: automation.enabled,
            stage: automation.stage(),
            progress: Progress::of(automation).percent(),
        }
    }
}

/// A pending delete waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: AutomationId,
    pub name: String,
}

impl DeleteRequest {
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenameDraft {
    id: AutomationId,
    text: String,
}

/// List-view orchestrator. At most one row is in rename mode.
#[derive(Debug, Clone, Default)]
pub struct AutomationList {
    defaults: NewAutomationDefaults,
    rename: Option<RenameDraft>,
}

impl AutomationList {
    #[must_use]
    pub fn new(defaults: NewAutomationDefaults) -> Self {
        Self {
            defaults,
            rename: None,
        }
    }

    /// Add a fresh automation, make it active, and put its row in rename mode.
    #[tracing::instrument(skip(self, store))]
    pub fn add<O: StoreObserver>(&mut self, store: &mut AutomationStore<O>) -> AutomationId {
        let automation = Automation::builder()
            .name(self.defaults.name.clone())
            .enabled(self.defaults.enabled)
            .build();
        let id = automation.id.clone();
        self.rename = Some(RenameDraft {
            id: id.clone(),
            text: automation.name.clone(),
        });
        store.dispatch(StoreMessage::AddAutomation { automation });
        tracing::info!(automation_id = %id, "automation added");
        id
    }

    /// Put a row in rename mode, seeded with its current name.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when `id` is not in the store.
    pub fn begin_rename(
        &mut self,
        state: &AutomationState,
        id: &AutomationId,
    ) -> Result<(), NotFoundError> {
        let automation = state.get(id).ok_or_else(|| not_found(id))?;
        self.rename = Some(RenameDraft {
            id: id.clone(),
            text: automation.name.clone(),
        });
        Ok(())
    }

    /// The row in rename mode and its current text.
    #[must_use]
    pub fn rename_draft(&self) -> Option<(&AutomationId, &str)> {
        self.rename.as_ref().map(|d| (&d.id, d.text.as_str()))
    }

    pub fn set_rename_text(&mut self, text: impl Into<String>) {
        if let Some(draft) = &mut self.rename {
            draft.text = text.into();
        }
    }

    /// Write the draft name to the store and leave rename mode.
    ///
    /// The name is stored as typed, empty included. Returns `false` when
    /// nothing was in rename mode or the automation is gone.
    #[tracing::instrument(skip(self, store))]
    pub fn commit_rename<O: StoreObserver>(&mut self, store: &mut AutomationStore<O>) -> bool {
        let Some(RenameDraft { id, text }) = self.rename.take() else {
            return false;
        };
        store.dispatch(StoreMessage::UpdateAutomation {
            id,
            automation: AutomationPatch::default().name(text),
        })
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    #[tracing::instrument(skip(self, store))]
    pub fn toggle<O: StoreObserver>(
        &self,
        store: &mut AutomationStore<O>,
        id: &AutomationId,
        enabled: bool,
    ) -> bool {
        store.dispatch(StoreMessage::ToggleAutomation {
            id: id.clone(),
            enabled,
        })
    }

    /// Switch to the configuration view for `id`.
    pub fn open<O: StoreObserver>(&self, store: &mut AutomationStore<O>, id: &AutomationId) {
        store.dispatch(StoreMessage::SetActive {
            id: Some(id.clone()),
        });
    }

    /// Ask for confirmation before deleting. Nothing is dispatched yet.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when `id` is not in the store.
    pub fn request_delete(
        &self,
        state: &AutomationState,
        id: &AutomationId,
    ) -> Result<DeleteRequest, NotFoundError> {
        let automation = state.get(id).ok_or_else(|| not_found(id))?;
        Ok(DeleteRequest {
            id: id.clone(),
            name: automation.name.clone(),
        })
    }

    /// Delete after the user confirmed. Dropping the request instead is the
    /// cancel path.
    #[tracing::instrument(skip(self, store), fields(automation_id = %request.id))]
    pub fn confirm_delete<O: StoreObserver>(
        &mut self,
        request: DeleteRequest,
        store: &mut AutomationStore<O>,
    ) -> bool {
        if self.rename.as_ref().is_some_and(|d| d.id == request.id) {
            self.rename = None;
        }
        let applied = store.dispatch(StoreMessage::DeleteAutomation { id: request.id });
        if applied {
            tracing::info!("automation deleted");
        }
        applied
    }

    /// Rows in store order.
    #[must_use]
    pub fn rows(&self, state: &AutomationState) -> Vec<AutomationRow> {
        state.automations().iter().map(AutomationRow::from).collect()
    }
}

fn not_found(id: &AutomationId) -> NotFoundError {
    NotFoundError {
        entity: "Automation",
        id: id.to_string(),
    }
}
