//! Sample data for trying the app out.
//!
//! Three habits at various streaks, one of them already completed today,
//! plus a short completion history.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::habit::{Habit, HabitCategory, HabitCompletion, HabitDifficulty};
use crate::store::HabitStore;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn sample(
    name: &str,
    category: HabitCategory,
    difficulty: HabitDifficulty,
    streak: u32,
    created_at: DateTime<Utc>,
    description: &str,
) -> Habit {
    let mut habit = Habit::new(name, category, difficulty, Some(description.to_string()));
    habit.streak = streak;
    habit.created_at = created_at;
    habit
}

/// The sample habits and completions, newest completion first.
pub fn sample_data() -> (Vec<Habit>, Vec<HabitCompletion>) {
    let now = Utc::now();
    let yesterday = now - Duration::days(1);

    let workout = sample(
        "Morning Workout",
        HabitCategory::Fitness,
        HabitDifficulty::Medium,
        5,
        date(2024, 1, 1),
        "30 minutes of cardio and strength training",
    );
    let mut reading = sample(
        "Read Technical Books",
        HabitCategory::Learning,
        HabitDifficulty::Hard,
        12,
        date(2024, 1, 5),
        "Read for at least 45 minutes daily",
    );
    reading.completed_today = true;
    reading.last_completed = Some(now);
    let meditation = sample(
        "Meditation",
        HabitCategory::Wellness,
        HabitDifficulty::Easy,
        8,
        date(2024, 1, 10),
        "15 minutes of mindfulness meditation",
    );

    let completions = vec![
        HabitCompletion::at(reading.id.clone(), now, 12, reading.base_reward, 1.2),
        HabitCompletion::at(workout.id.clone(), yesterday, 4, workout.base_reward, 1.2),
        HabitCompletion::at(meditation.id.clone(), yesterday, 7, meditation.base_reward, 1.15),
    ];

    (vec![workout, reading, meditation], completions)
}

/// Replace the store's habits and history with the sample data.
/// The wallet is left as is.
pub fn seed(store: &mut HabitStore) {
    let (habits, completions) = sample_data();
    tracing::info!(habits = habits.len(), completions = completions.len(), "seeding demo data");
    store.restore(habits, completions);
}
