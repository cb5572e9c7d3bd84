//! Interactive session over a single in-memory store.
//!
//! Each stdin line is split with shell quoting rules and parsed as one
//! [`SessionCommand`]. Results are printed as JSON, one document per line.
//! Nothing is written to disk; the store is dropped when stdin closes.

use clap::{Parser, Subcommand};
use habitchain_core::{
    demo, Event, HabitCategory, HabitDifficulty, HabitDraft, HabitPatch, HabitStore,
};
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::Path;

use super::{build_store, load_config};

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Create a habit
    Add {
        name: String,
        #[arg(long)]
        category: Option<HabitCategory>,
        #[arg(long)]
        difficulty: Option<HabitDifficulty>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of a habit (by id or 1-based position)
    Edit {
        habit: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<HabitCategory>,
        #[arg(long)]
        difficulty: Option<HabitDifficulty>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete a habit and its completion history
    Delete { habit: String },
    /// Mark a habit done for today
    Complete { habit: String },
    /// Claim today's rewards into the wallet
    Claim,
    /// Clear today's completion flags
    Reset,
    /// Connect the mock wallet
    Connect,
    /// Disconnect the mock wallet
    Disconnect,
    /// List habits
    List {
        #[arg(long)]
        category: Option<HabitCategory>,
    },
    /// Completion history, newest first
    History,
    /// Dashboard, history and milestone figures
    Stats,
    /// Wallet state
    Wallet,
    /// Mock price feed
    Feeds,
    /// Full store snapshot
    Snapshot,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Accept either a habit id or its 1-based position in the list.
fn resolve_habit(store: &HabitStore, token: &str) -> String {
    if let Ok(position) = token.parse::<usize>() {
        if let Some(habit) = position.checked_sub(1).and_then(|i| store.habits().get(i)) {
            return habit.id.clone();
        }
    }
    token.to_string()
}

fn emit_event<W: Write>(out: &mut W, command: &str, event: Option<Event>) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => writeln!(out, "{}", serde_json::to_string(&event)?)?,
        None => writeln!(out, "{}", json!({ "type": "NoChange", "command": command }))?,
    }
    Ok(())
}

fn execute<W: Write>(
    store: &mut HabitStore,
    command: SessionCommand,
    out: &mut W,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match command {
        SessionCommand::Add { name, category, difficulty, description } => {
            let draft = HabitDraft {
                name: Some(name),
                category,
                difficulty,
                description,
            };
            emit_event(out, "add", store.add_habit(draft))?;
        }
        SessionCommand::Edit {
            habit,
            name,
            category,
            difficulty,
            description,
            clear_description,
        } => {
            let id = resolve_habit(store, &habit);
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let patch = HabitPatch {
                name,
                category,
                difficulty,
                description,
            };
            emit_event(out, "edit", store.update_habit(&id, patch))?;
        }
        SessionCommand::Delete { habit } => {
            let id = resolve_habit(store, &habit);
            emit_event(out, "delete", store.delete_habit(&id))?;
        }
        SessionCommand::Complete { habit } => {
            let id = resolve_habit(store, &habit);
            emit_event(out, "complete", store.complete_habit(&id))?;
        }
        SessionCommand::Claim => emit_event(out, "claim", store.claim_reward())?,
        SessionCommand::Reset => emit_event(out, "reset", store.reset_daily_progress())?,
        SessionCommand::Connect => emit_event(out, "connect", store.connect_wallet())?,
        SessionCommand::Disconnect => emit_event(out, "disconnect", store.disconnect_wallet())?,
        SessionCommand::List { category } => {
            let rows: Vec<_> = store
                .habits_in(category)
                .into_iter()
                .map(|h| {
                    json!({
                        "id": h.id,
                        "name": h.name,
                        "category": h.category,
                        "difficulty": h.difficulty,
                        "base_reward": h.base_reward,
                        "streak": h.streak,
                        "streak_level": h.streak_level(),
                        "weekly_progress_pct": h.weekly_progress_pct(),
                        "completed_today": h.completed_today,
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string(&rows)?)?;
        }
        SessionCommand::History => {
            writeln!(out, "{}", serde_json::to_string(&store.history())?)?;
        }
        SessionCommand::Stats => {
            let stats = json!({
                "dashboard": store.dashboard_stats(),
                "history": store.history_stats_at(chrono::Utc::now()),
                "milestone": store.milestone(),
            });
            writeln!(out, "{stats}")?;
        }
        SessionCommand::Wallet => {
            let wallet = store.wallet();
            let mut doc = serde_json::to_value(wallet)?;
            doc["short_address"] = json!(wallet.short_address());
            writeln!(out, "{doc}")?;
        }
        SessionCommand::Feeds => writeln!(out, "{}", serde_json::to_string(&store.price_feed())?)?,
        SessionCommand::Snapshot => writeln!(out, "{}", serde_json::to_string(&store.snapshot())?)?,
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Drive `store` with commands read from `input` until EOF or `quit`.
///
/// Malformed lines are reported on `out` and skipped.
pub fn run_lines<R: BufRead, W: Write>(
    store: &mut HabitStore,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(tokens) = shlex::split(trimmed) else {
            writeln!(out, "{}", json!({ "type": "Error", "message": "unbalanced quotes" }))?;
            continue;
        };
        let parsed = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                let message = e.to_string();
                writeln!(out, "{}", json!({ "type": "Error", "message": message.trim_end() }))?;
                continue;
            }
        };
        if let Flow::Quit = execute(store, parsed.command, out)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

pub fn run(config_path: Option<&Path>, demo_data: bool, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let mut store = build_store(&config, seed)?;
    if demo_data || config.demo.seed_on_start {
        demo::seed(&mut store);
    }
    tracing::info!(habits = store.habits().len(), "session started");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_lines(&mut store, stdin.lock(), &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitchain_core::{FixedMultiplier, StoreSettings};

    fn run_script(store: &mut HabitStore, script: &str) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run_lines(store, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn store() -> HabitStore {
        HabitStore::new(StoreSettings::default(), FixedMultiplier(1.2))
    }

    #[test]
    fn add_complete_connect_claim() {
        let mut store = store();
        let lines = run_script(
            &mut store,
            "add \"Morning Run\" --category fitness --difficulty medium\n\
             complete 1\n\
             connect\n\
             claim\n",
        );
        assert_eq!(lines[0]["type"], "HabitAdded");
        assert_eq!(lines[1]["type"], "HabitCompleted");
        assert_eq!(lines[2]["type"], "WalletConnected");
        assert_eq!(lines[3]["type"], "RewardClaimed");
        assert_eq!(store.habits()[0].name, "Morning Run");
        assert!((store.wallet().xlpr_balance - (127.5 + 2.46)).abs() < 1e-9);
    }

    #[test]
    fn noops_are_reported() {
        let mut store = store();
        let lines = run_script(&mut store, "add Run\ncomplete 9\nclaim\n");
        assert!(lines.iter().all(|l| l["type"] == "NoChange"));
        assert_eq!(lines[0]["command"], "add");
        assert!(store.habits().is_empty());
    }

    #[test]
    fn bad_lines_do_not_end_the_session() {
        let mut store = store();
        let lines = run_script(
            &mut store,
            "frobnicate\nadd \"unterminated\nadd Walk --category wellness --difficulty easy\n",
        );
        assert_eq!(lines[0]["type"], "Error");
        assert_eq!(lines[1]["type"], "Error");
        assert_eq!(lines[2]["type"], "HabitAdded");
    }

    #[test]
    fn quit_stops_reading() {
        let mut store = store();
        let lines = run_script(&mut store, "# comment\n\nquit\nconnect\n");
        assert!(lines.is_empty());
        assert!(!store.wallet().connected);
    }

    #[test]
    fn edit_by_position_and_clear_description() {
        let mut store = store();
        run_script(
            &mut store,
            "add Read --category learning --difficulty easy --description \"45 min\"\n\
             edit 1 --difficulty expert --clear-description\n",
        );
        let habit = &store.habits()[0];
        assert_eq!(habit.base_reward, 8.0);
        assert!(habit.description.is_none());
    }

    #[test]
    fn wallet_shows_short_address() {
        let mut store = store();
        let lines = run_script(&mut store, "wallet
connect
wallet
");
        assert!(lines[0]["short_address"].is_null());
        assert_eq!(lines[2]["short_address"], "0x742d...F8F8");
        assert_eq!(lines[2]["xlpr_balance"], 127.5);
    }

    #[test]
    fn list_filters_by_category() {
        let mut store = store();
        demo::seed(&mut store);
        let lines = run_script(&mut store, "list --category wellness\n");
        let rows = lines[0].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Meditation");
        assert_eq!(rows[0]["streak_level"], "intermediate");
    }
}
