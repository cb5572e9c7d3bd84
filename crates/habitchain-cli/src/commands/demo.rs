//! Scripted walk through the sample data: complete a habit, connect the
//! wallet, claim, and print every event followed by the final snapshot.

use habitchain_core::{demo, Event, HabitStore};
use serde::Serialize;
use std::path::Path;

use super::{build_store, load_config};

#[derive(Serialize)]
struct DemoReport {
    events: Vec<Event>,
    snapshot: habitchain_core::StoreSnapshot,
}

/// Apply the sample scenario to a freshly seeded store.
pub fn scenario(store: &mut HabitStore) -> Vec<Event> {
    demo::seed(store);
    let mut events = Vec::new();
    let pending: Vec<String> = store
        .habits()
        .iter()
        .filter(|h| !h.completed_today)
        .map(|h| h.id.clone())
        .collect();
    if let Some(first) = pending.first() {
        events.extend(store.complete_habit(first));
    }
    events.extend(store.connect_wallet());
    events.extend(store.claim_reward());
    events
}

pub fn run(config_path: Option<&Path>, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let mut store = build_store(&config, seed)?;
    let events = scenario(&mut store);
    let report = DemoReport {
        events,
        snapshot: store.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
