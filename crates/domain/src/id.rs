//! Typed identifier newtypes backed by strings.
//!
//! Freshly generated ids come from UUID v4. Explicit ids (`"a1"`) are
//! accepted as-is so callers can pick deterministic values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of the short ids handed to conditions and actions.
const SHORT_ID_LEN: usize = 8;

fn uuid_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(SHORT_ID_LEN);
    id
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $generate:path) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl Default for $name {
            fn default() -> Self {
                Self($generate())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Unique identifier for an [`Automation`](crate::automation::Automation).
    AutomationId,
    uuid_id
);

define_id!(
    /// Identifier of a [`Condition`](crate::automation::Condition), unique within its automation.
    ConditionId,
    short_id
);

define_id!(
    /// Identifier of an [`Action`](crate::automation::Action), unique within its automation.
    ActionId,
    short_id
);
