//! Choice catalog — the labelled options the editors and the overview offer.

use serde::Serialize;

use autoflow_domain::automation::{ActionField, ActionKind, Operator, TriggerKind};
use autoflow_domain::progress::Step;
use autoflow_domain::template::TemplateId;

use crate::editors::{TriggerEditor, TriggerField};

/// Everything a renderer needs to draw the pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub steps: Vec<StepEntry>,
    pub triggers: Vec<Choice>,
    pub operators: Vec<Choice>,
    pub actions: Vec<Choice>,
    pub templates: Vec<TemplateEntry>,
}

/// One selectable option with the labels of the inputs it reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEntry {
    pub step: Step,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub popular: bool,
}

impl Catalog {
    /// Build the catalog. Only the trigger kinds the editor offers are listed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Step::ALL
                .into_iter()
                .map(|step| StepEntry {
                    step,
                    title: step.title(),
                    description: step.description(),
                    required: step.is_required(),
                })
                .collect(),
            triggers: TriggerKind::EDITOR_CHOICES
                .into_iter()
                .map(trigger_choice)
                .collect(),
            operators: Operator::ALL
                .into_iter()
                .map(|op| Choice {
                    value: op.symbol(),
                    label: op.label(),
                    fields: Vec::new(),
                })
                .collect(),
            actions: ActionKind::ALL
                .into_iter()
                .map(|kind| Choice {
                    value: kind.as_str(),
                    label: kind.label(),
                    fields: kind.fields().iter().copied().map(ActionField::label).collect(),
                })
                .collect(),
            templates: TemplateId::ALL
                .into_iter()
                .map(|id| TemplateEntry {
                    id,
                    name: id.name(),
                    description: id.description(),
                    category: id.category(),
                    popular: id.is_popular(),
                })
                .collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn trigger_choice(kind: TriggerKind) -> Choice {
    let mut editor = TriggerEditor::default();
    editor.select(Some(kind));
    Choice {
        value: kind.as_str(),
        label: kind.label(),
        fields: editor
            .visible_fields()
            .iter()
            .copied()
            .map(TriggerField::label)
            .collect(),
    }
}
