//! # autoflow-domain
//!
//! Pure domain model for the autoflow automation builder.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Automations** (trigger → condition → action rules)
//! - Define the typed **Trigger**, **Condition** and **Action** payloads
//! - Define **partial updates** applied by the store
//! - Derive the guided-configuration **progress** model
//! - Provide the canned **templates**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or from IO crates.

pub mod error;
pub mod id;

pub mod automation;
pub mod progress;
pub mod template;
