//! Application services — the list and overview orchestrators.
//!
//! Each service holds only its local UI state (drafts, open panels) and reads
//! and writes automations exclusively through an [`crate::store::AutomationStore`]
//! passed in per call, generic over its observer.

pub mod automation_list;
pub mod automation_overview;

pub use automation_list::{AutomationList, AutomationRow, DeleteRequest, NewAutomationDefaults};
pub use automation_overview::{AutomationOverview, EditorPanel};
