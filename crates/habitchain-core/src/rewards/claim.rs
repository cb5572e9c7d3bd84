use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one reward claim.
///
/// `total_reward` is what the wallet receives: the summed base rewards of
/// the habits completed this cycle times the claim multiplier.
/// `recorded_completion_reward` is the sum of the `reward_earned` values
/// stored on those habits' latest completions. The two are computed
/// independently and usually differ; the payout follows `total_reward`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardClaim {
    pub id: String,
    pub base_reward: f64,
    pub multiplier: f64,
    pub total_reward: f64,
    pub recorded_completion_reward: f64,
    pub habit_ids: Vec<String>,
    pub claimed_at: DateTime<Utc>,
}

impl RewardClaim {
    pub fn new(
        base_reward: f64,
        multiplier: f64,
        recorded_completion_reward: f64,
        habit_ids: Vec<String>,
    ) -> Self {
        Self {
            id: format!("claim-{}", uuid::Uuid::new_v4()),
            base_reward,
            multiplier,
            total_reward: base_reward * multiplier,
            recorded_completion_reward,
            habit_ids,
            claimed_at: Utc::now(),
        }
    }

    /// Payout minus what the completion records say was earned.
    pub fn divergence(&self) -> f64 {
        self.total_reward - self.recorded_completion_reward
    }
}
