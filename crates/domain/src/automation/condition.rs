//! Condition — a filter predicate narrowing when actions would apply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ConditionId;

/// A `field operator value` predicate.
///
/// Conditions are never evaluated here; they only describe the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub field: String,
    pub operator: Operator,
    /// Comparison operand; the editor stores text, templates may store any JSON.
    pub value: serde_json::Value,
}

impl Condition {
    /// A blank row as appended by the condition editor: empty field, `=`, empty value.
    #[must_use]
    pub fn blank(id: ConditionId) -> Self {
        Self {
            id,
            field: String::new(),
            operator: Operator::Eq,
            value: serde_json::Value::String(String::new()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Ge,
        Self::Le,
        Self::Contains,
    ];

    /// Symbol used on the wire and in summaries.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Contains => "contains",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Eq => "等于",
            Self::Ne => "不等于",
            Self::Gt => "大于",
            Self::Lt => "小于",
            Self::Ge => "大于等于",
            Self::Le => "小于等于",
            Self::Contains => "包含",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "operator",
                value: s.to_string(),
            })
    }
}

/// How the condition list combines. Applies to the whole list, not per pair.
///
/// Only the condition editor holds this value; it is not part of a saved
/// [`Automation`](super::Automation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    #[default]
    And,
    Or,
}
