//! Action editor — an editable action list with an inline add/edit sub-form.

use std::collections::HashMap;

use autoflow_domain::automation::{Action, ActionEffect, ActionField, ActionKind};
use autoflow_domain::error::ValidationError;
use autoflow_domain::id::ActionId;

/// The inline sub-form used to add a new action or edit an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDraft {
    editing: Option<usize>,
    kind: Option<ActionKind>,
    values: HashMap<ActionField, String>,
}

impl ActionDraft {
    /// Row being edited, `None` when adding.
    #[must_use]
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    #[must_use]
    pub fn kind(&self) -> Option<ActionKind> {
        self.kind
    }

    /// Pick the action type. Values typed so far are kept.
    pub fn select_kind(&mut self, kind: Option<ActionKind>) {
        self.kind = kind;
    }

    #[must_use]
    pub fn value(&self, field: ActionField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, field: ActionField, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    /// Inputs to show for the selected type.
    #[must_use]
    pub fn visible_fields(&self) -> &'static [ActionField] {
        self.kind.map_or(&[], ActionKind::fields)
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.kind.is_some()
    }

    fn text(&self, field: ActionField) -> String {
        self.value(field).to_string()
    }

    fn build(&self, id: ActionId) -> Result<Action, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingActionType)?;
        let effect = match kind {
            ActionKind::UpdateField => ActionEffect::UpdateField {
                field: self.text(ActionField::Field),
                value: self.text(ActionField::Value),
            },
            ActionKind::SendNotification => ActionEffect::SendNotification {
                to: self.text(ActionField::To),
                message: self.text(ActionField::Message),
            },
            ActionKind::CreateRecord => ActionEffect::CreateRecord {
                content: self.text(ActionField::Content),
            },
            ActionKind::CallAi => ActionEffect::CallAi {
                prompt: self.text(ActionField::Prompt),
            },
        };
        Ok(Action::new(id, effect))
    }
}

/// Staged copy of an automation's actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionEditor {
    actions: Vec<Action>,
    draft: Option<ActionDraft>,
}

impl ActionEditor {
    #[must_use]
    pub fn open(initial: &[Action]) -> Self {
        Self {
            actions: initial.to_vec(),
            draft: None,
        }
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn draft(&self) -> Option<&ActionDraft> {
        self.draft.as_ref()
    }

    /// Open an empty sub-form for a new action, replacing any open one.
    pub fn begin_add(&mut self) -> &mut ActionDraft {
        self.draft.insert(ActionDraft::default())
    }

    /// Open the sub-form seeded from row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn begin_edit(&mut self, index: usize) -> Result<&mut ActionDraft, ValidationError> {
        let action = self
            .actions
            .get(index)
            .ok_or(ValidationError::IndexOutOfRange {
                index,
                len: self.actions.len(),
            })?;
        let kind = action.kind();
        let values = kind
            .fields()
            .iter()
            .filter_map(|&field| {
                action
                    .effect
                    .get(field)
                    .map(|text| (field, text.to_string()))
            })
            .collect();
        Ok(self.draft.insert(ActionDraft {
            editing: Some(index),
            kind: Some(kind),
            values,
        }))
    }

    /// Write the sub-form back into the staged list and close it.
    ///
    /// Editing keeps the row's id; adding appends with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingActionType`] when no sub-form is open
    /// or no type is selected; the sub-form stays open.
    pub fn commit_draft(&mut self) -> Result<(), ValidationError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or(ValidationError::MissingActionType)?;
        match draft.editing {
            Some(index) => {
                let action = draft.build(self.actions[index].id.clone())?;
                self.actions[index] = action;
            }
            None => {
                let action = draft.build(self.fresh_id())?;
                self.actions.push(action);
            }
        }
        self.draft = None;
        Ok(())
    }

    /// Close the sub-form without touching the staged list.
    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    /// Delete row `index`. An open edit of a later row follows its row; an
    /// open edit of the removed row is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn remove(&mut self, index: usize) -> Result<Action, ValidationError> {
        if index >= self.actions.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.actions.len(),
            });
        }
        let removed = self.actions.remove(index);
        match self.draft.as_ref().and_then(ActionDraft::editing) {
            Some(editing) if editing == index => self.draft = None,
            Some(editing) if editing > index => {
                if let Some(draft) = &mut self.draft {
                    draft.editing = Some(editing - 1);
                }
            }
            _ => {}
        }
        Ok(removed)
    }

    /// Hand back the staged list. An uncommitted sub-form is discarded.
    #[must_use]
    pub fn save(self) -> Vec<Action> {
        self.actions
    }

    fn fresh_id(&self) -> ActionId {
        loop {
            let id = ActionId::new();
            if self.actions.iter().all(|a| a.id != id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notify(id: &str) -> Action {
        Action::new(
            ActionId::from(id),
            ActionEffect::SendNotification {
                to: "assignee".to_string(),
                message: "done".to_string(),
            },
        )
    }

    #[test]
    fn should_append_new_action_with_fresh_id() {
        let mut editor = ActionEditor::open(&[notify("1")]);
        let draft = editor.begin_add();
        draft.select_kind(Some(ActionKind::CreateRecord));
        draft.set_value(ActionField::Content, "子任务");
        editor.commit_draft().unwrap();

        let actions = editor.actions();
        assert_eq!(actions.len(), 2);
        assert_ne!(actions[1].id, actions[0].id);
        assert_eq!(
            actions[1].effect,
            ActionEffect::CreateRecord {
                content: "子任务".to_string()
            }
        );
        assert!(editor.draft().is_none());
    }

    #[test]
    fn should_replace_edited_action_and_keep_its_id() {
        let mut editor = ActionEditor::open(&[notify("keep")]);
        let draft = editor.begin_edit(0).unwrap();
        assert_eq!(draft.value(ActionField::To), "assignee");
        draft.set_value(ActionField::Message, "changed");
        editor.commit_draft().unwrap();

        let action = &editor.actions()[0];
        assert_eq!(action.id.as_str(), "keep");
        assert_eq!(action.effect.get(ActionField::Message), Some("changed"));
    }

    #[test]
    fn should_refuse_commit_without_type_and_keep_draft_open() {
        let mut editor = ActionEditor::default();
        editor.begin_add();
        assert_eq!(
            editor.commit_draft(),
            Err(ValidationError::MissingActionType)
        );
        assert!(editor.draft().is_some());
        assert!(editor.actions().is_empty());
    }

    #[test]
    fn should_refuse_commit_when_no_draft_is_open() {
        let mut editor = ActionEditor::default();
        assert_eq!(
            editor.commit_draft(),
            Err(ValidationError::MissingActionType)
        );
    }

    #[test]
    fn should_discard_draft_on_cancel() {
        let mut editor = ActionEditor::open(&[notify("1")]);
        editor
            .begin_edit(0)
            .unwrap()
            .select_kind(Some(ActionKind::CallAi));
        editor.cancel_draft();
        assert_eq!(editor.actions()[0].kind(), ActionKind::SendNotification);
    }

    #[test]
    fn should_show_fields_for_selected_kind() {
        let mut editor = ActionEditor::default();
        let draft = editor.begin_add();
        assert!(draft.visible_fields().is_empty());
        draft.select_kind(Some(ActionKind::UpdateField));
        assert_eq!(
            draft.visible_fields(),
            &[ActionField::Field, ActionField::Value]
        );
    }

    #[test]
    fn should_shift_open_edit_when_earlier_row_removed() {
        let mut editor = ActionEditor::open(&[notify("a"), notify("b")]);
        editor.begin_edit(1).unwrap();
        editor.remove(0).unwrap();
        assert_eq!(editor.draft().and_then(ActionDraft::editing), Some(0));
        editor.commit_draft().unwrap();
        assert_eq!(editor.actions()[0].id.as_str(), "b");
    }

    #[test]
    fn should_drop_open_edit_when_its_row_removed() {
        let mut editor = ActionEditor::open(&[notify("a")]);
        editor.begin_edit(0).unwrap();
        editor.remove(0).unwrap();
        assert!(editor.draft().is_none());
    }

    #[test]
    fn should_reject_edit_of_unknown_row() {
        let mut editor = ActionEditor::default();
        assert!(matches!(
            editor.begin_edit(0),
            Err(ValidationError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn should_discard_uncommitted_draft_on_save() {
        let mut editor = ActionEditor::open(&[notify("1")]);
        editor
            .begin_add()
            .select_kind(Some(ActionKind::CallAi));
        let saved = editor.save();
        assert_eq!(saved.len(), 1);
    }
}
