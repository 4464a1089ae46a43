//! Common error types used across the workspace.
//!
//! The store itself never fails: unknown ids are silent no-ops. Errors
//! only surface from editors (presence checks), from lookups done by the
//! orchestrators, and from parsing wire names.

/// Top-level error for autoflow use-cases.
#[derive(Debug, thiserror::Error)]
pub enum AutoflowError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),
}

/// A value failed a presence or range check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A trigger cannot be saved without a type.
    #[error("trigger type is required")]
    MissingTriggerType,

    /// An action cannot be saved without a type.
    #[error("action type is required")]
    MissingActionType,

    /// An editor row index does not exist in the staged list.
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// A wire name did not match any known variant.
    #[error("unknown {kind} `{value}`")]
    UnknownVariant { kind: &'static str, value: String },
}

/// A lookup by id returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
