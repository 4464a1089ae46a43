//! Message scripts — JSON lines replayed against a store.
//!
//! A line is either a raw store message (`ADD_AUTOMATION`, `UPDATE_AUTOMATION`,
//! ...) or one of the orchestrator operations below, which go through the
//! same code paths as the list and overview views.

use serde::{Deserialize, Serialize};

use autoflow_app::catalog::Catalog;
use autoflow_app::ports::StoreObserver;
use autoflow_app::services::{AutomationList, AutomationOverview, AutomationRow};
use autoflow_app::store::{AutomationState, AutomationStore, StoreMessage, View};
use autoflow_domain::automation::Automation;
use autoflow_domain::error::NotFoundError;
use autoflow_domain::id::AutomationId;
use autoflow_domain::progress::{Progress, Step, StepStatus};
use autoflow_domain::template::TemplateId;

/// Orchestrator-level operations accepted next to raw messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptOp {
    /// Add through the list view, with the configured defaults.
    NewAutomation {
        #[serde(default)]
        name: Option<String>,
    },
    /// Apply a template through the overview.
    ImportTemplate {
        id: AutomationId,
        template: TemplateId,
    },
}

const OP_TYPES: [&str; 2] = ["NEW_AUTOMATION", "IMPORT_TEMPLATE"];

#[derive(Debug, Clone, PartialEq)]
enum ScriptLine {
    Op(ScriptOp),
    Message(StoreMessage),
}

impl ScriptLine {
    /// Route on `type` first so serde reports the missing or invalid field
    /// of the chosen shape.
    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let is_op = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|kind| OP_TYPES.contains(&kind));
        if is_op {
            serde_json::from_value(value).map(Self::Op)
        } else {
            serde_json::from_value(value).map(Self::Message)
        }
    }
}

/// A script line that could not be replayed. Lines are numbered from 1.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: malformed script line")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: operation rejected")]
    Rejected {
        line: usize,
        #[source]
        source: NotFoundError,
    },
    #[error("line {line}: automation `{id}` already exists")]
    Duplicate { line: usize, id: AutomationId },
}

/// Replays lines against one store and one list orchestrator.
pub struct ScriptRunner<O> {
    store: AutomationStore<O>,
    list: AutomationList,
}

impl<O: StoreObserver> ScriptRunner<O> {
    pub fn new(store: AutomationStore<O>, list: AutomationList) -> Self {
        Self { store, list }
    }

    /// Replay one line. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] for malformed JSON or an unknown
    /// message type, [`ScriptError::Rejected`] when an operation names an
    /// automation that does not exist, and [`ScriptError::Duplicate`] when an
    /// `ADD_AUTOMATION` reuses an id already in the store.
    pub fn run_line(&mut self, line: usize, text: &str) -> Result<(), ScriptError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let parsed =
            ScriptLine::parse(text).map_err(|source| ScriptError::Parse { line, source })?;
        match parsed {
            ScriptLine::Message(StoreMessage::AddAutomation { automation })
                if self.store.state().get(&automation.id).is_some() =>
            {
                return Err(ScriptError::Duplicate {
                    line,
                    id: automation.id,
                });
            }
            ScriptLine::Message(message) => {
                let kind = message.kind();
                let applied = self.store.dispatch(message);
                tracing::debug!(line, message = %kind, applied, "message replayed");
            }
            ScriptLine::Op(ScriptOp::NewAutomation { name }) => {
                let id = self.list.add(&mut self.store);
                match name {
                    Some(name) => {
                        self.list.set_rename_text(name);
                        self.list.commit_rename(&mut self.store);
                    }
                    None => self.list.cancel_rename(),
                }
                tracing::debug!(line, automation_id = %id, "automation created");
            }
            ScriptLine::Op(ScriptOp::ImportTemplate { id, template }) => {
                let overview = AutomationOverview::open(self.store.state(), &id)
                    .map_err(|source| ScriptError::Rejected { line, source })?;
                overview.import_template(&mut self.store, template);
            }
        }
        Ok(())
    }

    pub fn store(&self) -> &AutomationStore<O> {
        &self.store
    }

    /// Snapshot plus the derived view models of every automation.
    pub fn report(&self, changes: u64) -> Report<'_> {
        let state = self.store.state();
        Report {
            revision: self.store.revision(),
            changes,
            view: match state.view() {
                View::List => "list",
                View::Configure(_) => "configure",
            },
            rows: self.list.rows(state),
            automations: state
                .automations()
                .iter()
                .map(AutomationReport::from)
                .collect(),
            state,
            catalog: Catalog::new(),
        }
    }
}

/// Final output of a replay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub revision: u64,
    /// Store changes seen on the change bus.
    pub changes: u64,
    pub view: &'static str,
    pub state: &'a AutomationState,
    pub rows: Vec<AutomationRow>,
    pub automations: Vec<AutomationReport>,
    /// Labelled editor choices, step descriptions and templates.
    pub catalog: Catalog,
}

/// Human-readable summary and guided-flow status of one automation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationReport {
    pub id: AutomationId,
    pub trigger: Option<String>,
    pub conditions: Vec<String>,
    pub actions: Vec<String>,
    pub steps: [StepStatus; 3],
    pub progress: u8,
    pub next_step: Step,
}

impl From<&Automation> for AutomationReport {
    fn from(automation: &Automation) -> Self {
        let progress = Progress::of(automation);
        Self {
            id: automation.id.clone(),
            trigger: automation.trigger.as_ref().map(ToString::to_string),
            conditions: automation
                .conditions
                .iter()
                .map(ToString::to_string)
                .collect(),
            actions: automation.actions.iter().map(ToString::to_string).collect(),
            steps: *progress.steps(),
            progress: progress.percent(),
            next_step: progress.next_step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoflow_app::event_bus::InProcessChangeBus;
    use autoflow_app::services::NewAutomationDefaults;

    fn runner() -> ScriptRunner<InProcessChangeBus> {
        ScriptRunner::new(
            AutomationStore::new(InProcessChangeBus::new(16)),
            AutomationList::default(),
        )
    }

    fn run(runner: &mut ScriptRunner<InProcessChangeBus>, script: &str) -> Result<(), ScriptError> {
        for (index, text) in script.lines().enumerate() {
            runner.run_line(index + 1, text)?;
        }
        Ok(())
    }

    #[test]
    fn should_replay_raw_messages() {
        let mut runner = runner();
        run(
            &mut runner,
            r#"
{"type":"ADD_AUTOMATION","automation":{"id":"a1","name":"x","enabled":false,"trigger":null,"conditions":[],"actions":[]}}
{"type":"UPDATE_AUTOMATION","id":"a1","automation":{"trigger":{"type":"record-created","config":{}}}}
"#,
        )
        .unwrap();

        let report = runner.report(0);
        assert_eq!(report.revision, 2);
        assert_eq!(report.view, "configure");
        assert_eq!(report.automations[0].trigger.as_deref(), Some("record-created"));
        assert_eq!(report.automations[0].progress, 50);
        assert_eq!(report.automations[0].next_step, Step::Action);
    }

    #[test]
    fn should_name_new_automation_and_import_template() {
        let mut runner = ScriptRunner::new(
            AutomationStore::new(InProcessChangeBus::new(16)),
            AutomationList::new(NewAutomationDefaults {
                name: "unused".to_string(),
                enabled: false,
            }),
        );
        runner
            .run_line(1, r#"{"type":"NEW_AUTOMATION","name":"提醒"}"#)
            .unwrap();
        let id = runner.store().state().automations()[0].id.clone();
        let line = format!(r#"{{"type":"IMPORT_TEMPLATE","id":"{id}","template":"remind"}}"#);
        runner.run_line(2, &line).unwrap();

        let report = runner.report(0);
        let row = &report.rows[0];
        assert_eq!(row.name, "提醒");
        assert!(!row.enabled);
        assert_eq!(row.progress, 100);
        let automation = &report.automations[0];
        assert_eq!(automation.trigger.as_deref(), Some("field-modified(status)"));
        assert_eq!(automation.conditions, vec![r#"status = "completed""#.to_string()]);
        assert_eq!(automation.actions, vec!["send-notification(assignee)".to_string()]);
    }

    #[test]
    fn should_keep_default_name_when_none_given() {
        let mut runner = runner();
        runner.run_line(1, r#"{"type":"NEW_AUTOMATION"}"#).unwrap();
        let report = runner.report(0);
        assert_eq!(report.rows[0].name, autoflow_domain::automation::DEFAULT_NAME);
        assert_eq!(report.revision, 1);
    }

    #[test]
    fn should_skip_blank_lines() {
        let mut runner = runner();
        runner.run_line(1, "   ").unwrap();
        assert_eq!(runner.store().revision(), 0);
    }

    #[test]
    fn should_report_line_number_of_malformed_line() {
        let mut runner = runner();
        let err = run(
            &mut runner,
            "{\"type\":\"SET_ACTIVE\",\"id\":null}\n{\"type\":\"NOPE\"}",
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
        assert_eq!(err.to_string(), "line 2: malformed script line");
    }

    #[test]
    fn should_reject_unknown_template_name() {
        let mut runner = runner();
        let err = runner
            .run_line(1, r#"{"type":"IMPORT_TEMPLATE","id":"a1","template":"nope"}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
    }

    #[test]
    fn should_reject_template_import_for_unknown_automation() {
        let mut runner = runner();
        let err = runner
            .run_line(3, r#"{"type":"IMPORT_TEMPLATE","id":"ghost","template":"remind"}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Rejected { line: 3, .. }));
    }

    #[test]
    fn should_serialize_report_as_camel_case_json() {
        let mut runner = runner();
        runner.run_line(1, r#"{"type":"NEW_AUTOMATION"}"#).unwrap();
        let json = serde_json::to_value(runner.report(1)).unwrap();
        assert_eq!(json["changes"], 1);
        assert_eq!(json["view"], "configure");
        assert_eq!(json["automations"][0]["nextStep"], "trigger");
        assert!(json["state"]["activeId"].is_string());
    }

    #[test]
    fn should_reject_duplicate_automation_id() {
        let mut runner = runner();
        let add = r#"{"type":"ADD_AUTOMATION","automation":{"id":"a1","name":"x","enabled":true,"trigger":null,"conditions":[],"actions":[]}}"#;
        runner.run_line(1, add).unwrap();

        let err = runner.run_line(2, add).unwrap_err();

        assert!(matches!(err, ScriptError::Duplicate { line: 2, ref id } if id.as_str() == "a1"));
        assert_eq!(err.to_string(), "line 2: automation `a1` already exists");
        assert_eq!(runner.store().state().automations().len(), 1);
        assert_eq!(runner.store().revision(), 1);
    }

    #[test]
    fn should_name_missing_field_of_malformed_message() {
        let mut runner = runner();
        let err = runner
            .run_line(
                4,
                r#"{"type":"ADD_AUTOMATION","automation":{"id":"a1","name":"x","enabled":true,"trigger":null,"conditions":[]}}"#,
            )
            .unwrap_err();
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("missing field `actions`"), "{source}");
    }

    #[test]
    fn should_name_missing_field_of_malformed_operation() {
        let mut runner = runner();
        let err = runner
            .run_line(1, r#"{"type":"IMPORT_TEMPLATE","id":"a1"}"#)
            .unwrap_err();
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("missing field `template`"), "{source}");
    }

    #[test]
    fn should_include_choice_catalog_in_report() {
        let runner = runner();
        let json = serde_json::to_value(runner.report(0)).unwrap();
        assert_eq!(json["catalog"]["steps"][2]["title"], "执行动作");
        assert_eq!(json["catalog"]["templates"][0]["category"], "通知提醒");
        assert_eq!(json["catalog"]["triggers"].as_array().unwrap().len(), 5);
    }
}
