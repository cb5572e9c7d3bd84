//! Derived statistics over habits and completion history.
//!
//! Everything here is a pure function of the collections it is given; the
//! store recomputes these on demand rather than caching them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, HabitCategory, HabitCompletion};

/// Milestones are awarded every this many combined streak days.
pub const MILESTONE_STEP: u32 = 100;

/// Name shown for completions whose habit has been deleted.
pub const UNKNOWN_HABIT: &str = "Unknown Habit";

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_habits: usize,
    pub completed_today: usize,
    /// Summed base reward of habits completed this cycle
    pub available_reward: f64,
    /// `available_reward * claim_multiplier`
    pub projected_claim: f64,
    pub total_streaks: u32,
    pub active_streaks: usize,
}

impl DashboardStats {
    pub fn compute(habits: &[Habit], claim_multiplier: f64) -> Self {
        let available_reward = available_reward(habits);
        Self {
            total_habits: habits.len(),
            completed_today: habits.iter().filter(|h| h.completed_today).count(),
            available_reward,
            projected_claim: available_reward * claim_multiplier,
            total_streaks: total_streaks(habits),
            active_streaks: habits.iter().filter(|h| h.streak > 0).count(),
        }
    }
}

/// Aggregates over the completion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_rewards: f64,
    pub total_completions: usize,
    /// 0.0 when there are no completions
    pub average_multiplier: f64,
    pub last_7_days: usize,
}

impl HistoryStats {
    pub fn compute(completions: &[HabitCompletion], now: DateTime<Utc>) -> Self {
        let total_completions = completions.len();
        let average_multiplier = if total_completions > 0 {
            completions.iter().map(|c| c.multiplier).sum::<f64>() / total_completions as f64
        } else {
            0.0
        };
        let cutoff = now - Duration::days(7);
        Self {
            total_rewards: completions.iter().map(|c| c.reward_earned).sum(),
            total_completions,
            average_multiplier,
            last_7_days: completions.iter().filter(|c| c.completed_at >= cutoff).count(),
        }
    }
}

/// Progress towards the next streak milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub total_streaks: u32,
    pub next: u32,
    pub progress: u32,
}

impl Milestone {
    pub fn for_total(total_streaks: u32) -> Self {
        Self {
            total_streaks,
            next: total_streaks.div_ceil(MILESTONE_STEP) * MILESTONE_STEP,
            progress: total_streaks % MILESTONE_STEP,
        }
    }
}

/// A completion joined with the habit it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub completion: HabitCompletion,
    pub habit_name: String,
    pub category: Option<HabitCategory>,
}

/// Completions newest first, each resolved against the current habits.
pub fn history(habits: &[Habit], completions: &[HabitCompletion]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = completions
        .iter()
        .map(|completion| {
            let habit = habits.iter().find(|h| h.id == completion.habit_id);
            HistoryEntry {
                completion: completion.clone(),
                habit_name: habit
                    .map(|h| h.name.clone())
                    .unwrap_or_else(|| UNKNOWN_HABIT.to_string()),
                category: habit.map(|h| h.category),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.completion.completed_at.cmp(&a.completion.completed_at));
    entries
}

pub fn available_reward(habits: &[Habit]) -> f64 {
    habits
        .iter()
        .filter(|h| h.completed_today)
        .map(|h| h.base_reward)
        .sum()
}

pub fn total_streaks(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.streak).sum()
}

/// Habits in `category`, or all habits when `None`.
pub fn filter_by_category(habits: &[Habit], category: Option<HabitCategory>) -> Vec<&Habit> {
    habits
        .iter()
        .filter(|h| category.map_or(true, |c| h.category == c))
        .collect()
}
