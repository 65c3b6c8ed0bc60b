//! Weekly plan prompt construction.
//!
//! T031: Define week preferences and work schedule types
//! T032: Build the generation prompt from goals and preferences

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::goals::types::TrainingGoals;

/// Number of days in a generated plan.
pub const PLAN_DAYS: usize = 7;

/// Work shift assignment for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShiftType {
    /// Early shift starting 6:45
    Am,
    /// Afternoon shift starting 2:45
    Pm,
    /// Night shift starting 11:45
    Night,
    /// No work scheduled
    #[default]
    Off,
}

impl ShiftType {
    /// All shift types, in display order.
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Am,
        ShiftType::Pm,
        ShiftType::Night,
        ShiftType::Off,
    ];

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Am => "AM (6:45)",
            ShiftType::Pm => "PM (2:45)",
            ShiftType::Night => "Night (11:45)",
            ShiftType::Off => "Day Off",
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One day of the weekly work schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Shift worked on that day
    pub shift: ShiftType,
}

impl WorkDay {
    /// Weekday name for display and prompt text.
    pub fn day_name(&self) -> &'static str {
        match self.date.weekday() {
            chrono::Weekday::Mon => "Monday",
            chrono::Weekday::Tue => "Tuesday",
            chrono::Weekday::Wed => "Wednesday",
            chrono::Weekday::Thu => "Thursday",
            chrono::Weekday::Fri => "Friday",
            chrono::Weekday::Sat => "Saturday",
            chrono::Weekday::Sun => "Sunday",
        }
    }
}

/// User preferences for one week's plan request. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPreferences {
    /// First day of the plan
    pub plan_start_date: NaiveDate,
    /// Specific notes for this week only
    pub general_notes: String,
    /// Work schedule for the seven plan days
    pub work_schedule: Vec<WorkDay>,
    /// Feedback on the previous week of training, may be empty
    pub last_week_feedback: String,
}

impl WeekPreferences {
    /// Default preferences for the week containing `today`.
    ///
    /// The plan starts on that week's Monday with every day off.
    pub fn for_week_of(today: NaiveDate) -> Self {
        let start = monday_of_week(today);
        Self {
            plan_start_date: start,
            general_notes: String::new(),
            work_schedule: build_schedule(start),
            last_week_feedback: String::new(),
        }
    }

    /// Move the plan start date, rebuilding the schedule dates.
    ///
    /// Shift assignments are preserved by position within the week.
    pub fn set_start_date(&mut self, start: NaiveDate) {
        let shifts: Vec<ShiftType> = self.work_schedule.iter().map(|d| d.shift).collect();
        self.plan_start_date = start;
        self.work_schedule = build_schedule(start);
        for (day, shift) in self.work_schedule.iter_mut().zip(shifts) {
            day.shift = shift;
        }
    }
}

/// Monday of the week containing the given date.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Seven consecutive work days starting at `start`, all off.
fn build_schedule(start: NaiveDate) -> Vec<WorkDay> {
    (0..PLAN_DAYS as i64)
        .map(|offset| WorkDay {
            date: start + Duration::days(offset),
            shift: ShiftType::Off,
        })
        .collect()
}

/// Build the generation prompt for one week's plan.
pub fn build_prompt(goals: &TrainingGoals, preferences: &WeekPreferences) -> String {
    let start = preferences.plan_start_date;

    let mut goal_instructions = format!(
        "The user is a {} focusing on marathon training.\n\
         Their overall marathon goal is: \"{}\".\n\
         Their current comfortable running pace is {}.\n\
         Their current fastest running pace is {}.",
        goals.fitness_level, goals.goal_time, goals.comfortable_pace, goals.fastest_pace,
    );
    if let Some(date) = goals.marathon_date {
        goal_instructions.push_str(&format!("\nTheir target marathon date is {}.", date));
    }
    if let Some(ref notes) = goals.long_term_notes {
        goal_instructions.push_str(&format!(
            "\nUser's long-term training notes/philosophy: \"{}\".",
            notes
        ));
    }

    let schedule_lines: Vec<String> = preferences
        .work_schedule
        .iter()
        .map(|day| format!("- {} ({}): {}", day.day_name(), day.date, day.shift))
        .collect();

    let feedback_instructions = if preferences.last_week_feedback.trim().is_empty() {
        String::new()
    } else {
        format!(
            "User's feedback on their previous week of training: \"{}\".\n\
             Consider this feedback when planning the current week.\n\
             - If they felt good and found activities manageable or easy, consider a slight, \
             safe progression in volume or intensity on 1-2 key workouts.\n\
             - If they struggled or felt overly fatigued, prioritize recovery, maintain current \
             load, or slightly reduce intensity/volume.\n\
             - If feedback is neutral, focus on consistency with a gentle progression aligned \
             with their overall goal.\n\
             Always prioritize injury prevention, especially for a {}.\n",
            preferences.last_week_feedback.trim(),
            goals.fitness_level,
        )
    };

    let weekly_notes = if preferences.general_notes.trim().is_empty() {
        "User has not provided specific preferences for this week. Focus on a plan that aligns \
         with their overall goals and fitness level, adjusting for work schedule and any feedback."
            .to_string()
    } else {
        preferences.general_notes.trim().to_string()
    };

    format!(
        "You are a marathon training plan assistant.\n\
         {goal_instructions}\n\
         \n\
         You are generating a 7-day training plan for the week starting {start}.\n\
         \n\
         User's work schedule for this specific week:\n\
         {schedule}\n\
         \n\
         {feedback_instructions}\n\
         User's specific preferences or goals for *this upcoming week only*:\n\
         {weekly_notes}\n\
         \n\
         Generate a 7-day training plan.\n\
         IMPORTANT: Consider the user's work schedule. Suggest lighter, shorter, or \
         recovery-focused activities on days with demanding shifts (especially PM or Night \
         shifts) or on days immediately following night shifts. Prioritize recovery around \
         tough shifts.\n\
         \n\
         The plan should include a mix of running activities appropriate for their {level} \
         level, building gradually towards their marathon goal.\n\
         Structure the runs with specific instructions in the 'notes' field:\n\
         - Easy/Recovery runs: clearly state target duration or distance; pace should be \
         comfortable, significantly slower than {comfortable}.\n\
         - Steady/Moderate runs: target duration or distance; pace around {comfortable}.\n\
         - Interval/Tempo runs (if appropriate for a {level}, max 1-2 per week unless feedback \
         is positive): provide a detailed structure (warm-up, work intervals duration/distance \
         and pace, recovery intervals, cool-down). Work interval paces can be between \
         {comfortable} and {fastest}.\n\
         - Long distance run (one per week): specify distance; pace should be easy and \
         conversational, increasing gradually week over week towards the marathon date if one \
         is set.\n\
         \n\
         For all run types, the 'notes' field MUST contain the specific instructions.\n\
         The 'durationMinutes' field should reflect TOTAL estimated time.\n\
         The 'distanceKm' field should be populated for distance-based runs.\n\
         \n\
         Include cross-training (e.g., swimming) or rest days as appropriate for a balanced \
         marathon plan. A \"Rest\" day: no strenuous activity. Notes: \"Full rest\" or \
         \"Active recovery: light walk/stretching.\" Type: \"Rest\".\n\
         \n\
         Return the plan as a JSON array of exactly 7 objects, one for each day starting from \
         {start}. Each object *must* have: \"date\" (YYYY-MM-DD, sequential), \"type\" \
         (\"Run\" | \"Swim\" | \"Rest\"), \"durationMinutes\" (number), \"distanceKm\" \
         (optional number), \"notes\" (REQUIRED string).\n\
         \n\
         Example run: {{ \"date\": \"{start}\", \"type\": \"Run\", \"durationMinutes\": 45, \
         \"distanceKm\": 5, \"notes\": \"Easy run: 5km at a conversational pace.\" }}\n\
         \n\
         Ensure the output is ONLY the JSON array, without any surrounding text or markdown.",
        goal_instructions = goal_instructions,
        start = start,
        schedule = schedule_lines.join("\n"),
        feedback_instructions = feedback_instructions,
        weekly_notes = weekly_notes,
        level = goals.fitness_level,
        comfortable = goals.comfortable_pace,
        fastest = goals.fastest_pace,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::types::FitnessLevel;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_monday_of_week() {
        // 2024-07-17 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2024, 7, 17).unwrap();
        assert_eq!(monday_of_week(wednesday), monday());

        // A Monday maps to itself
        assert_eq!(monday_of_week(monday()), monday());

        // A Sunday belongs to the week that started six days earlier
        let sunday = NaiveDate::from_ymd_opt(2024, 7, 21).unwrap();
        assert_eq!(monday_of_week(sunday), monday());
    }

    #[test]
    fn test_default_preferences_cover_seven_days_off() {
        let prefs = WeekPreferences::for_week_of(monday());

        assert_eq!(prefs.plan_start_date, monday());
        assert_eq!(prefs.work_schedule.len(), PLAN_DAYS);
        assert!(prefs.work_schedule.iter().all(|d| d.shift == ShiftType::Off));
        assert_eq!(prefs.work_schedule[6].date, monday() + Duration::days(6));
    }

    #[test]
    fn test_set_start_date_preserves_shifts_by_position() {
        let mut prefs = WeekPreferences::for_week_of(monday());
        prefs.work_schedule[0].shift = ShiftType::Night;
        prefs.work_schedule[3].shift = ShiftType::Am;

        let next_week = monday() + Duration::days(7);
        prefs.set_start_date(next_week);

        assert_eq!(prefs.work_schedule[0].date, next_week);
        assert_eq!(prefs.work_schedule[0].shift, ShiftType::Night);
        assert_eq!(prefs.work_schedule[3].shift, ShiftType::Am);
        assert_eq!(prefs.work_schedule[1].shift, ShiftType::Off);
    }

    #[test]
    fn test_prompt_embeds_goals_and_schedule() {
        let mut goals = TrainingGoals::default();
        goals.fitness_level = FitnessLevel::Beginner;
        goals.marathon_date = NaiveDate::from_ymd_opt(2025, 4, 21);

        let mut prefs = WeekPreferences::for_week_of(monday());
        prefs.work_schedule[0].shift = ShiftType::Night;

        let prompt = build_prompt(&goals, &prefs);

        assert!(prompt.contains("Under 5 hours"));
        assert!(prompt.contains("7:30 min/km"));
        assert!(prompt.contains("6:30 min/km"));
        assert!(prompt.contains("Beginner"));
        assert!(prompt.contains("2025-04-21"));
        assert!(prompt.contains("- Monday (2024-07-15): Night (11:45)"));
        assert!(prompt.contains("week starting 2024-07-15"));
        assert!(prompt.contains("JSON array of exactly 7 objects"));
    }

    #[test]
    fn test_prompt_feedback_block_only_when_present() {
        let goals = TrainingGoals::default();
        let mut prefs = WeekPreferences::for_week_of(monday());

        let without = build_prompt(&goals, &prefs);
        assert!(!without.contains("feedback on their previous week"));

        prefs.last_week_feedback = "Long run felt easy, ready for more.".to_string();
        let with = build_prompt(&goals, &prefs);
        assert!(with.contains("feedback on their previous week"));
        assert!(with.contains("Long run felt easy, ready for more."));
        assert!(with.contains("prioritize recovery"));
    }

    #[test]
    fn test_prompt_uses_fallback_weekly_notes() {
        let goals = TrainingGoals::default();
        let prefs = WeekPreferences::for_week_of(monday());

        let prompt = build_prompt(&goals, &prefs);
        assert!(prompt.contains("has not provided specific preferences"));
    }
}
