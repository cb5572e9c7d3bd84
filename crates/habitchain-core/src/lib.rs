//! # HabitChain Core Library
//!
//! This library provides the core logic for HabitChain, a habit tracker that
//! pays out mock token rewards for streaks. All habit and wallet state lives
//! in memory for the lifetime of a [`HabitStore`]; nothing touches a real
//! wallet, chain or price feed.
//!
//! ## Architecture
//!
//! - **Store**: single-owner state for habits, completion history, claims
//!   and the mock wallet. Every command returns an [`Event`] or `None`
//! - **Rewards**: pluggable completion multipliers and the fixed claim
//!   multiplier quoted by a mock price feed
//! - **Stats**: dashboard, history and milestone figures derived on demand
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: the state store
//! - [`MultiplierSource`]: where completion multipliers come from
//! - [`Config`]: application configuration management

pub mod demo;
pub mod error;
pub mod events;
pub mod habit;
pub mod rewards;
pub mod stats;
pub mod storage;
pub mod store;
pub mod wallet;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use habit::{Habit, HabitCategory, HabitCompletion, HabitDifficulty, HabitDraft, HabitPatch, StreakLevel};
pub use rewards::{
    FixedMultiplier, MultiplierRange, MultiplierSource, PriceFeed, PriceQuote, RewardClaim,
    SeededMultiplier, SequenceMultiplier, ThreadRngMultiplier, DEFAULT_CLAIM_MULTIPLIER,
};
pub use stats::{DashboardStats, HistoryEntry, HistoryStats, Milestone};
pub use storage::Config;
pub use store::{HabitStore, StoreSettings, StoreSnapshot};
pub use wallet::{MockWalletProfile, WalletState};
