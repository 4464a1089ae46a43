//! Guided-configuration progress derived from an [`Automation`].
//!
//! Three steps: trigger (required), condition (optional), action
//! (required). Only required steps count towards the percentage.

use serde::Serialize;

use crate::automation::Automation;

/// One step of the guided configuration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Trigger,
    Condition,
    Action,
}

impl Step {
    /// Steps in display order.
    pub const ALL: [Self; 3] = [Self::Trigger, Self::Condition, Self::Action];

    /// Position of the step in [`Step::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Trigger => 0,
            Self::Condition => 1,
            Self::Action => 2,
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Condition)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Trigger => "设置触发器",
            Self::Condition => "添加条件",
            Self::Action => "执行动作",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Trigger => "选择启动自动化的事件",
            Self::Condition => "设置执行条件（可选）",
            Self::Action => "定义要执行的操作",
        }
    }
}

/// Completion state of one [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub step: Step,
    pub required: bool,
    pub completed: bool,
}

/// Derived progress view of an automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    steps: [StepStatus; 3],
    next_step: Step,
}

impl Progress {
    #[must_use]
    pub fn of(automation: &Automation) -> Self {
        let has_trigger = automation.trigger.is_some();
        let has_actions = !automation.actions.is_empty();
        let completed = |step: Step| match step {
            Step::Trigger => has_trigger,
            Step::Condition => !automation.conditions.is_empty(),
            Step::Action => has_actions,
        };
        let steps = Step::ALL.map(|step| StepStatus {
            step,
            required: step.is_required(),
            completed: completed(step),
        });

        // Fixed priority, not "first incomplete": condition is the fallback
        // suggestion even once it is already set.
        let next_step = if !has_trigger {
            Step::Trigger
        } else if !has_actions {
            Step::Action
        } else {
            Step::Condition
        };

        Self { steps, next_step }
    }

    #[must_use]
    pub fn steps(&self) -> &[StepStatus; 3] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, step: Step) -> StepStatus {
        self.steps[step.index()]
    }

    /// Number of required steps that are done.
    #[must_use]
    pub fn completed_required(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.required && s.completed)
            .count()
    }

    #[must_use]
    pub fn required_total(&self) -> usize {
        self.steps.iter().filter(|s| s.required).count()
    }

    /// Percentage of required steps done: 0, 50 or 100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let percent = self.completed_required() * 100 / self.required_total();
        u8::try_from(percent).unwrap_or(100)
    }

    #[must_use]
    pub fn next_step(&self) -> Step {
        self.next_step
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_required() == self.required_total()
    }
}
