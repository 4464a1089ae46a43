//! # autoflow-app
//!
//! Application layer — the automation store, staged editors and the
//! list/overview orchestrators.
//!
//! ## Responsibilities
//! - Own the automation collection and the navigation cursor
//!   ([`store::AutomationStore`]) and publish a change after every dispatch
//!   through the [`ports::StoreObserver`] port
//! - Provide **in-process infrastructure** (the change bus) that doesn't need IO
//! - Stage edits to a trigger, a condition list or an action list in editors
//!   that only touch the store when saved
//! - Orchestrate the list and overview views on top of the store
//! - Describe the labelled choices the editors offer ([`catalog::Catalog`])
//!
//! ## Dependency rule
//! Depends on `autoflow-domain` only (plus `tokio::sync` for channels).
//! Never renders anything; the binary decides how changes are shown.

pub mod catalog;
pub mod editors;
pub mod event_bus;
pub mod ports;
pub mod services;
pub mod store;
