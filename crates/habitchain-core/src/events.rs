use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, HabitCompletion};
use crate::rewards::RewardClaim;

/// Every applied store operation produces an Event.
/// Silent no-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WalletConnected {
        address: String,
        xlpr_balance: f64,
        at: DateTime<Utc>,
    },
    WalletDisconnected {
        at: DateTime<Utc>,
    },
    HabitAdded {
        habit: Habit,
        at: DateTime<Utc>,
    },
    HabitUpdated {
        habit: Habit,
        at: DateTime<Utc>,
    },
    /// Habit removed along with its completion records.
    HabitDeleted {
        habit_id: String,
        completions_removed: usize,
        at: DateTime<Utc>,
    },
    HabitCompleted {
        habit_id: String,
        streak: u32,
        completion: HabitCompletion,
        at: DateTime<Utc>,
    },
    RewardClaimed {
        claim: RewardClaim,
        xlpr_balance: f64,
        at: DateTime<Utc>,
    },
    /// All `completed_today` flags cleared.
    DailyProgressReset {
        habits_cleared: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::WalletConnected { .. } => "wallet_connected",
            Event::WalletDisconnected { .. } => "wallet_disconnected",
            Event::HabitAdded { .. } => "habit_added",
            Event::HabitUpdated { .. } => "habit_updated",
            Event::HabitDeleted { .. } => "habit_deleted",
            Event::HabitCompleted { .. } => "habit_completed",
            Event::RewardClaimed { .. } => "reward_claimed",
            Event::DailyProgressReset { .. } => "daily_progress_reset",
        }
    }
}
