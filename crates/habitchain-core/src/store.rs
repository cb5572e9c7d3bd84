//! The habit state store.
//!
//! A single owned struct holds every habit, completion record, reward claim
//! and the mock wallet. Callers mutate it through `&mut self`; each command
//! runs to completion and returns the [`Event`] it produced, or `None` when
//! it was a no-op (unknown id, precondition not met).
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = HabitStore::new(StoreSettings::default(), ThreadRngMultiplier::default());
//! store.add_habit(HabitDraft::new("Run", HabitCategory::Fitness, HabitDifficulty::Medium));
//! store.connect_wallet();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::Event;
use crate::habit::{Habit, HabitCategory, HabitCompletion, HabitDraft, HabitPatch};
use crate::rewards::{
    MultiplierRange, MultiplierSource, PriceFeed, RewardClaim, DEFAULT_CLAIM_MULTIPLIER,
};
use crate::stats::{self, DashboardStats, HistoryEntry, HistoryStats, Milestone};
use crate::wallet::{MockWalletProfile, WalletState};

/// Fixed parameters of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Applied to the summed base rewards on claim
    pub claim_multiplier: f64,
    /// Bounds for completion multipliers; out-of-range draws are clamped
    pub multiplier_range: MultiplierRange,
    /// Address and balances assigned on connect
    pub wallet_profile: MockWalletProfile,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            claim_multiplier: DEFAULT_CLAIM_MULTIPLIER,
            multiplier_range: MultiplierRange::default(),
            wallet_profile: MockWalletProfile::default(),
        }
    }
}

/// Full read-only view of the store at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub habits: Vec<Habit>,
    pub completions: Vec<HabitCompletion>,
    pub claims: Vec<RewardClaim>,
    pub wallet: WalletState,
    pub dashboard: DashboardStats,
    pub milestone: Milestone,
    pub at: DateTime<Utc>,
}

pub struct HabitStore {
    habits: Vec<Habit>,
    /// Newest first
    completions: Vec<HabitCompletion>,
    /// Newest first
    claims: Vec<RewardClaim>,
    wallet: WalletState,
    settings: StoreSettings,
    multipliers: Box<dyn MultiplierSource + Send>,
}

impl HabitStore {
    /// Create an empty store with a disconnected wallet.
    pub fn new(settings: StoreSettings, multipliers: impl MultiplierSource + Send + 'static) -> Self {
        Self {
            habits: Vec::new(),
            completions: Vec::new(),
            claims: Vec::new(),
            wallet: WalletState::disconnected(),
            settings,
            multipliers: Box::new(multipliers),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Habits in insertion order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Completion history, newest first.
    pub fn completions(&self) -> &[HabitCompletion] {
        &self.completions
    }

    /// Claim history, newest first.
    pub fn claims(&self) -> &[RewardClaim] {
        &self.claims
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn habits_in(&self, category: Option<HabitCategory>) -> Vec<&Habit> {
        stats::filter_by_category(&self.habits, category)
    }

    /// Summed base reward of habits completed this cycle.
    pub fn available_reward(&self) -> f64 {
        stats::available_reward(&self.habits)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.habits, self.settings.claim_multiplier)
    }

    pub fn history_stats_at(&self, now: DateTime<Utc>) -> HistoryStats {
        HistoryStats::compute(&self.completions, now)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        stats::history(&self.habits, &self.completions)
    }

    pub fn milestone(&self) -> Milestone {
        Milestone::for_total(stats::total_streaks(&self.habits))
    }

    pub fn price_feed(&self) -> PriceFeed {
        PriceFeed::mock(self.settings.claim_multiplier)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            habits: self.habits.clone(),
            completions: self.completions.clone(),
            claims: self.claims.clone(),
            wallet: self.wallet.clone(),
            dashboard: self.dashboard_stats(),
            milestone: self.milestone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the wallet with the connected mock profile.
    pub fn connect_wallet(&mut self) -> Option<Event> {
        self.wallet = WalletState::connected(&self.settings.wallet_profile);
        tracing::info!(address = %self.settings.wallet_profile.address, "wallet connected");
        Some(Event::WalletConnected {
            address: self.settings.wallet_profile.address.clone(),
            xlpr_balance: self.wallet.xlpr_balance,
            at: Utc::now(),
        })
    }

    /// Reset the wallet to the disconnected, zeroed form.
    pub fn disconnect_wallet(&mut self) -> Option<Event> {
        self.wallet = WalletState::disconnected();
        tracing::info!("wallet disconnected");
        Some(Event::WalletDisconnected { at: Utc::now() })
    }

    /// Append a new habit built from `draft`.
    ///
    /// No-op when name, category or difficulty is missing.
    pub fn add_habit(&mut self, draft: HabitDraft) -> Option<Event> {
        let Some(habit) = draft.build() else {
            tracing::debug!("add_habit ignored: draft is missing a required field");
            return None;
        };
        tracing::info!(habit_id = %habit.id, name = %habit.name, "habit added");
        self.habits.push(habit.clone());
        Some(Event::HabitAdded {
            habit,
            at: Utc::now(),
        })
    }

    /// Apply `patch` to the habit with `id`. No-op if the id is unknown.
    pub fn update_habit(&mut self, id: &str, patch: HabitPatch) -> Option<Event> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            tracing::debug!(habit_id = id, "update_habit ignored: unknown habit");
            return None;
        };
        if habit.apply(patch) {
            tracing::info!(habit_id = id, "habit updated");
        } else {
            tracing::debug!(habit_id = id, "update_habit: empty patch, fields unchanged");
        }
        Some(Event::HabitUpdated {
            habit: habit.clone(),
            at: Utc::now(),
        })
    }

    /// Remove a habit and every completion that references it.
    pub fn delete_habit(&mut self, id: &str) -> Option<Event> {
        let Some(index) = self.habits.iter().position(|h| h.id == id) else {
            tracing::debug!(habit_id = id, "delete_habit ignored: unknown habit");
            return None;
        };
        self.habits.remove(index);
        let before = self.completions.len();
        self.completions.retain(|c| c.habit_id != id);
        let completions_removed = before - self.completions.len();
        tracing::info!(habit_id = id, completions_removed, "habit deleted");
        Some(Event::HabitDeleted {
            habit_id: id.to_string(),
            completions_removed,
            at: Utc::now(),
        })
    }

    /// Mark a habit done for the current cycle.
    ///
    /// No-op if the habit is unknown or already completed this cycle.
    pub fn complete_habit(&mut self, id: &str) -> Option<Event> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            tracing::debug!(habit_id = id, "complete_habit ignored: unknown habit");
            return None;
        };
        if habit.completed_today {
            tracing::debug!(habit_id = id, "complete_habit ignored: already completed this cycle");
            return None;
        }

        let drawn = self.multipliers.next_multiplier();
        let range = self.settings.multiplier_range;
        let multiplier = range.clamp(drawn);
        if multiplier != drawn {
            tracing::warn!(
                habit_id = id,
                drawn,
                multiplier,
                min = range.min(),
                max = range.max(),
                "multiplier source drew outside range, clamped"
            );
        }
        let now = Utc::now();
        habit.streak += 1;
        habit.completed_today = true;
        habit.last_completed = Some(now);

        let completion = HabitCompletion::at(id, now, habit.streak, habit.base_reward, multiplier);
        let streak = habit.streak;
        tracing::info!(
            habit_id = id,
            streak,
            multiplier,
            reward_earned = completion.reward_earned,
            "habit completed"
        );
        self.completions.insert(0, completion.clone());
        Some(Event::HabitCompleted {
            habit_id: id.to_string(),
            streak,
            completion,
            at: now,
        })
    }

    /// Pay out this cycle's rewards into the wallet and start a new cycle.
    ///
    /// No-op while disconnected or when nothing was completed.
    pub fn claim_reward(&mut self) -> Option<Event> {
        if !self.wallet.connected {
            tracing::debug!("claim_reward ignored: wallet disconnected");
            return None;
        }
        let available = self.available_reward();
        if available <= 0.0 {
            tracing::debug!("claim_reward ignored: nothing to claim");
            return None;
        }

        let claimed: Vec<&Habit> = self.habits.iter().filter(|h| h.completed_today).collect();
        let recorded: f64 = claimed
            .iter()
            .filter_map(|h| self.completions.iter().find(|c| c.habit_id == h.id))
            .map(|c| c.reward_earned)
            .sum();
        let habit_ids = claimed.iter().map(|h| h.id.clone()).collect();

        let claim = RewardClaim::new(available, self.settings.claim_multiplier, recorded, habit_ids);
        self.wallet.credit_rewards(claim.total_reward);
        for habit in &mut self.habits {
            habit.completed_today = false;
        }

        tracing::info!(
            total_reward = claim.total_reward,
            recorded_completion_reward = claim.recorded_completion_reward,
            xlpr_balance = self.wallet.xlpr_balance,
            "reward claimed"
        );
        if claim.divergence().abs() > f64::EPSILON {
            tracing::debug!(
                divergence = claim.divergence(),
                "claim payout differs from recorded completion rewards"
            );
        }

        self.claims.insert(0, claim.clone());
        Some(Event::RewardClaimed {
            claim,
            xlpr_balance: self.wallet.xlpr_balance,
            at: Utc::now(),
        })
    }

    /// Clear `completed_today` on every habit. Always applies.
    pub fn reset_daily_progress(&mut self) -> Option<Event> {
        let habits_cleared = self.habits.iter().filter(|h| h.completed_today).count();
        for habit in &mut self.habits {
            habit.completed_today = false;
        }
        tracing::info!(habits_cleared, "daily progress reset");
        Some(Event::DailyProgressReset {
            habits_cleared,
            at: Utc::now(),
        })
    }

    /// Load pre-built habits and completions, bypassing the commands.
    pub(crate) fn restore(&mut self, habits: Vec<Habit>, completions: Vec<HabitCompletion>) {
        self.habits = habits;
        self.completions = completions;
    }
}

impl fmt::Debug for HabitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HabitStore")
            .field("habits", &self.habits.len())
            .field("completions", &self.completions.len())
            .field("claims", &self.claims.len())
            .field("wallet", &self.wallet)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
