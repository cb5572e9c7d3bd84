use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a single completion.
///
/// `habit_id` is a plain reference; records are only removed when their
/// habit is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: String,
    pub completed_at: DateTime<Utc>,
    /// Streak after this completion
    pub streak_count: u32,
    /// `base_reward * multiplier`
    pub reward_earned: f64,
    pub multiplier: f64,
}

impl HabitCompletion {
    pub fn at(
        habit_id: impl Into<String>,
        completed_at: DateTime<Utc>,
        streak_count: u32,
        base_reward: f64,
        multiplier: f64,
    ) -> Self {
        Self {
            id: format!("completion-{}", uuid::Uuid::new_v4()),
            habit_id: habit_id.into(),
            completed_at,
            streak_count,
            reward_earned: base_reward * multiplier,
            multiplier,
        }
    }
}
