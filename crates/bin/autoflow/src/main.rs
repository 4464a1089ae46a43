//! # autoflow — automation builder driver
//!
//! Composition root that wires the store, the change bus and the list
//! orchestrator together, then replays a message script.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and initialise logging
//! - Construct the change bus and the store, injecting the bus as observer
//! - Read JSON lines from the file named on the command line, or stdin
//! - Replay every line, then print the snapshot and derived view models as
//!   JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod script;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use anyhow::Context;
use autoflow_app::event_bus::InProcessChangeBus;
use autoflow_app::services::AutomationList;
use autoflow_app::store::{AutomationStore, StoreChange};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::script::ScriptRunner;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading autoflow.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Change bus
    let bus = Arc::new(InProcessChangeBus::new(config.events.capacity));
    let mut changes = bus.subscribe();

    // Store and list view
    let store = AutomationStore::new(Arc::clone(&bus));
    let list = AutomationList::new(config.new_automation_defaults());
    let mut runner = ScriptRunner::new(store, list);

    let input: Box<dyn BufRead> = match std::env::args_os().nth(1) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("opening script {}", path.to_string_lossy()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    let mut seen = 0;
    for (index, text) in input.lines().enumerate() {
        let text = text.context("reading script")?;
        runner.run_line(index + 1, &text)?;
        seen += drain(&mut changes);
    }
    tracing::info!(
        revision = runner.store().revision(),
        changes = seen,
        "script replayed"
    );

    let report = serde_json::to_string_pretty(&runner.report(seen))?;
    println!("{report}");

    Ok(())
}

/// Count the changes published since the last call.
fn drain(changes: &mut broadcast::Receiver<StoreChange>) -> u64 {
    let mut seen = 0;
    loop {
        match changes.try_recv() {
            Ok(change) => {
                tracing::trace!(
                    revision = change.revision,
                    message = %change.message,
                    applied = change.applied,
                    "store change"
                );
                seen += 1;
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "change bus lagged");
                seen += skipped;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return seen,
        }
    }
}
