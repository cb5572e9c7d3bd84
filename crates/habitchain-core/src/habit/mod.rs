//! Habit types: categories, difficulty tiers, creation drafts and patches.
//!
//! A habit's `base_reward` is always derived from its difficulty. The only
//! way it changes is through a patch that changes the difficulty.

mod completion;

pub use completion::HabitCompletion;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category a habit belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Fitness,
    Learning,
    Wellness,
    Productivity,
    Social,
    Creativity,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 6] = [
        HabitCategory::Fitness,
        HabitCategory::Learning,
        HabitCategory::Wellness,
        HabitCategory::Productivity,
        HabitCategory::Social,
        HabitCategory::Creativity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Fitness => "fitness",
            HabitCategory::Learning => "learning",
            HabitCategory::Wellness => "wellness",
            HabitCategory::Productivity => "productivity",
            HabitCategory::Social => "social",
            HabitCategory::Creativity => "creativity",
        }
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HabitCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Difficulty tier. Each tier maps to a fixed base reward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl HabitDifficulty {
    pub const ALL: [HabitDifficulty; 4] = [
        HabitDifficulty::Easy,
        HabitDifficulty::Medium,
        HabitDifficulty::Hard,
        HabitDifficulty::Expert,
    ];

    /// Tokens awarded per completion before any multiplier.
    pub fn base_reward(&self) -> f64 {
        match self {
            HabitDifficulty::Easy => 1.0,
            HabitDifficulty::Medium => 2.0,
            HabitDifficulty::Hard => 4.0,
            HabitDifficulty::Expert => 8.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitDifficulty::Easy => "easy",
            HabitDifficulty::Medium => "medium",
            HabitDifficulty::Hard => "hard",
            HabitDifficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for HabitDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitDifficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HabitDifficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}

/// Streak tier shown next to a habit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StreakLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
    Legendary,
}

impl StreakLevel {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            50.. => StreakLevel::Legendary,
            30..=49 => StreakLevel::Master,
            21..=29 => StreakLevel::Expert,
            14..=20 => StreakLevel::Advanced,
            7..=13 => StreakLevel::Intermediate,
            _ => StreakLevel::Beginner,
        }
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    pub difficulty: HabitDifficulty,
    /// Derived from `difficulty`
    pub base_reward: f64,
    /// Consecutive completions
    pub streak: u32,
    /// Set by a completion, cleared by a claim or a daily reset
    pub completed_today: bool,
    pub last_completed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
}

impl Habit {
    /// Create a fresh habit with a zero streak.
    pub fn new(
        name: impl Into<String>,
        category: HabitCategory,
        difficulty: HabitDifficulty,
        description: Option<String>,
    ) -> Self {
        Habit {
            id: format!("habit-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            category,
            difficulty,
            base_reward: difficulty.base_reward(),
            streak: 0,
            completed_today: false,
            last_completed: None,
            created_at: Utc::now(),
            description,
        }
    }

    pub fn streak_level(&self) -> StreakLevel {
        StreakLevel::for_streak(self.streak)
    }

    /// Progress through the current 7-day block, 0.0 .. 100.0.
    pub fn weekly_progress_pct(&self) -> f64 {
        f64::from(self.streak % 7) * (100.0 / 7.0)
    }

    /// Apply a partial update. Returns true if any field was supplied.
    pub fn apply(&mut self, patch: HabitPatch) -> bool {
        let touched = !patch.is_empty();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
            self.base_reward = difficulty.base_reward();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        touched
    }
}

/// Payload for creating a habit.
///
/// Fields are optional so a partially filled form can be handed over as is;
/// name, category and difficulty must all be present for the habit to be
/// created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<HabitCategory>,
    #[serde(default)]
    pub difficulty: Option<HabitDifficulty>,
    #[serde(default)]
    pub description: Option<String>,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>, category: HabitCategory, difficulty: HabitDifficulty) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category),
            difficulty: Some(difficulty),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the habit, or `None` when a required field is missing.
    pub fn build(self) -> Option<Habit> {
        Some(Habit::new(
            self.name?,
            self.category?,
            self.difficulty?,
            self.description,
        ))
    }
}

/// Partial update for an existing habit.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<HabitCategory>,
    #[serde(default)]
    pub difficulty: Option<HabitDifficulty>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.description.is_none()
    }
}
