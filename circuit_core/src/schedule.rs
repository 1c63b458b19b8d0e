//! Built-in weekly workout schedule.
//!
//! Four training days (A-D) with warmup, circuit, and cooldown sections.
//! The schedule is loaded once and read-only thereafter; every referenced
//! exercise id must resolve in the catalog.

use crate::catalog::ExerciseCatalog;
use crate::error::{Error, Result};
use crate::types::{DaySchedule, Rounds, ScheduleItem};
use chrono::Weekday;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Cached default weekly schedule
static DEFAULT_WEEK: Lazy<WeeklySchedule> = Lazy::new(build_default_week);

/// Get a reference to the cached default weekly schedule
pub fn default_weekly_schedule() -> &'static WeeklySchedule {
    &DEFAULT_WEEK
}

/// Identifier for one of the four training days
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKey {
    A,
    B,
    C,
    D,
}

impl DayKey {
    pub const ALL: [DayKey; 4] = [DayKey::A, DayKey::B, DayKey::C, DayKey::D];

    /// Wire/storage form, e.g. `dayA`
    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::A => "dayA",
            DayKey::B => "dayB",
            DayKey::C => "dayC",
            DayKey::D => "dayD",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "daya" => Ok(DayKey::A),
            "b" | "dayb" => Ok(DayKey::B),
            "c" | "dayc" => Ok(DayKey::C),
            "d" | "dayd" => Ok(DayKey::D),
            _ => Err(format!("unknown day '{}', expected a, b, c or d", s)),
        }
    }
}

/// Which training day a calendar weekday maps to, if any.
///
/// Training days are Monday, Tuesday, Thursday, Friday; the rest of the
/// week has no suggestion.
pub fn day_for_weekday(weekday: Weekday) -> Option<DayKey> {
    match weekday {
        Weekday::Mon => Some(DayKey::A),
        Weekday::Tue => Some(DayKey::B),
        Weekday::Thu => Some(DayKey::C),
        Weekday::Fri => Some(DayKey::D),
        _ => None,
    }
}

/// The four-day weekly plan
#[derive(Clone, Debug)]
pub struct WeeklySchedule {
    days: Vec<(DayKey, DaySchedule)>,
}

impl WeeklySchedule {
    pub fn new(days: Vec<(DayKey, DaySchedule)>) -> Self {
        Self { days }
    }

    pub fn day(&self, key: DayKey) -> Option<&DaySchedule> {
        self.days.iter().find(|(k, _)| *k == key).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &DaySchedule)> {
        self.days.iter().map(|(k, d)| (*k, d))
    }

    /// Cross-check every referenced exercise id against the catalog and
    /// flag structurally unusable round counts.
    pub fn validate(&self, catalog: &ExerciseCatalog) -> Vec<String> {
        let mut errors = Vec::new();
        for (key, day) in self.iter() {
            if let Rounds::Fixed { count: 0 } = day.rounds {
                errors.push(format!("{}: fixed round count of 0", key));
            }
            for (section, items) in [
                ("warmup", &day.warmup),
                ("circuit", &day.circuit),
                ("cooldown", &day.cooldown),
            ] {
                for item in items {
                    if !catalog.contains(&item.id) {
                        errors.push(format!(
                            "{} {}: unknown exercise id '{}'",
                            key, section, item.id
                        ));
                    }
                }
            }
        }
        errors
    }

    /// Validate the catalog and the schedule together, warning on each
    /// problem. Callers run this before building queues so a broken plan
    /// surfaces at startup instead of as silently dropped steps.
    pub fn ensure_valid(&self, catalog: &ExerciseCatalog) -> Result<()> {
        let mut errors = catalog.validate();
        errors.extend(self.validate(catalog));
        if errors.is_empty() {
            return Ok(());
        }
        for error in &errors {
            tracing::warn!("plan validation: {}", error);
        }
        Err(Error::ScheduleValidation(format!(
            "{} problem(s) found in the workout plan",
            errors.len()
        )))
    }
}

fn item(id: &str, reps: Option<&str>, duration: Option<&str>, equipment: Option<&str>) -> ScheduleItem {
    ScheduleItem {
        id: id.into(),
        reps: reps.map(Into::into),
        duration: duration.map(Into::into),
        equipment: equipment.map(Into::into),
    }
}

fn timed(id: &str, duration: &str) -> ScheduleItem {
    item(id, None, Some(duration), None)
}

fn reps(id: &str, reps_label: &str, equipment: &str) -> ScheduleItem {
    item(id, Some(reps_label), None, Some(equipment))
}

fn build_default_week() -> WeeklySchedule {
    let day_a = DaySchedule {
        name: "Lower Body + Core Stability".into(),
        day: "Monday".into(),
        focus: "Fat-burning via large muscles, hip mobility".into(),
        rounds: Rounds::Fixed { count: 3 },
        rest_between: "20s".into(),
        warmup: vec![
            timed("cardio_march", "60 sec"),
            timed("mob_hip_circles", "30s each"),
            timed("mob_lunge_twist", "6 per side"),
            timed("mob_cat_cow", "6-8 reps"),
            timed("squat_bodyweight", "10 reps"),
        ],
        circuit: vec![
            reps("squat_goblet", "12-15 reps", "8kg"),
            reps("lunge_reverse", "8-10/leg", "Bodyweight"),
            reps("glute_bridge", "15 reps", "5-8kg"),
            reps("core_dead_bug", "8-10/side", "None"),
            reps("cardio_high_knees", "40 sec", "None"),
        ],
        cooldown: vec![
            timed("stretch_hip_flexor", "30s/side"),
            timed("stretch_hamstring", "30s/side"),
            timed("stretch_figure4", "30s/side"),
            timed("breath_supine", "1 min"),
        ],
    };

    let day_b = DaySchedule {
        name: "Upper Body + Core".into(),
        day: "Tuesday".into(),
        focus: "Posture & Strength".into(),
        rounds: Rounds::Fixed { count: 3 },
        rest_between: "20s".into(),
        warmup: vec![
            timed("mob_arm_circles", "60 sec"),
            timed("mob_pendulum", "30s each"),
            timed("scapular_retraction", "12 reps"),
            timed("pushup_wall", "10 reps"),
        ],
        circuit: vec![
            reps("pushup_incline", "8-12 reps", "Bench"),
            reps("row_one_arm", "10/arm", "5-8kg"),
            reps("core_plank", "30-45 sec", "None"),
            reps("rdl_dumbbell", "12-15 reps", "2x5kg"),
            reps("core_pallof", "30 sec", "Band/DB"),
        ],
        cooldown: vec![
            timed("stretch_chest", "30 sec"),
            timed("stretch_upper_back", "30 sec"),
            timed("breath_supine", "1 min"),
        ],
    };

    let day_c = DaySchedule {
        name: "Mobility + Conditioning".into(),
        day: "Thursday".into(),
        focus: "Joint health & Sweat".into(),
        rounds: Rounds::Fixed { count: 4 },
        rest_between: "None".into(),
        warmup: vec![
            timed("cardio_jacks", "60 sec"),
            timed("mob_worlds_greatest", "3/side"),
            timed("mob_hip_openers", "30 sec"),
            timed("mob_arm_circles", "30 sec"),
        ],
        circuit: vec![
            reps("squat_calf_raise", "12 reps", "None"),
            reps("lunge_knee_drive", "8/side", "None"),
            reps("bear_crawl", "30 sec", "None"),
            reps("cardio_mountain_climbers", "30 sec", "None"),
            reps("core_hollow_hold", "30 sec", "None"),
        ],
        cooldown: vec![
            timed("stretch_squat_hold", "60 sec"),
            timed("stretch_hip_flexor", "30s/side"),
            timed("stretch_spinal_twist", "30s/side"),
            timed("breath_nasal", "1 min"),
        ],
    };

    let day_d = DaySchedule {
        name: "Core + Metabolic".into(),
        day: "Friday".into(),
        focus: "Midsection & Cardio".into(),
        rounds: Rounds::Fixed { count: 3 },
        rest_between: "20s".into(),
        warmup: vec![
            timed("cardio_march", "60 sec"),
            timed("mob_torso_rotation", "30 sec"),
            timed("glute_bridge", "10 reps"),
            timed("core_dead_bug", "6/side"),
        ],
        circuit: vec![
            reps("core_side_plank", "30s/side", "None"),
            reps("core_bicycle", "10-12/side", "None"),
            reps("carry_suitcase", "30s/side", "8kg"),
            reps("squat_pulses", "20 sec", "None"),
            reps("cardio_shadow_boxing", "40 sec", "None"),
        ],
        cooldown: vec![
            timed("stretch_cobra", "30 sec"),
            timed("stretch_childs_pose", "60 sec"),
            timed("breath_supine", "1 min"),
        ],
    };

    WeeklySchedule::new(vec![
        (DayKey::A, day_a),
        (DayKey::B, day_b),
        (DayKey::C, day_c),
        (DayKey::D, day_d),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;

    #[test]
    fn test_week_has_four_days() {
        let week = default_weekly_schedule();
        for key in DayKey::ALL {
            assert!(week.day(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_all_referenced_exercises_exist() {
        let week = default_weekly_schedule();
        let catalog = build_default_catalog();
        let errors = week.validate(&catalog);
        assert!(errors.is_empty(), "schedule validation errors: {:?}", errors);
    }

    #[test]
    fn test_day_key_parsing() {
        assert_eq!("a".parse::<DayKey>().unwrap(), DayKey::A);
        assert_eq!("dayC".parse::<DayKey>().unwrap(), DayKey::C);
        assert!("dayE".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_weekday_mapping() {
        assert_eq!(day_for_weekday(Weekday::Mon), Some(DayKey::A));
        assert_eq!(day_for_weekday(Weekday::Tue), Some(DayKey::B));
        assert_eq!(day_for_weekday(Weekday::Wed), None);
        assert_eq!(day_for_weekday(Weekday::Thu), Some(DayKey::C));
        assert_eq!(day_for_weekday(Weekday::Fri), Some(DayKey::D));
        assert_eq!(day_for_weekday(Weekday::Sat), None);
    }

    #[test]
    fn test_day_c_runs_four_rounds() {
        let week = default_weekly_schedule();
        let day_c = week.day(DayKey::C).unwrap();
        assert_eq!(day_c.rounds, Rounds::Fixed { count: 4 });
    }

    #[test]
    fn test_ensure_valid_accepts_default_plan() {
        let week = default_weekly_schedule();
        let catalog = build_default_catalog();
        assert!(week.ensure_valid(&catalog).is_ok());
    }

    #[test]
    fn test_ensure_valid_rejects_unknown_ids() {
        let catalog = build_default_catalog();
        let mut day = default_weekly_schedule().day(DayKey::A).unwrap().clone();
        day.circuit.push(ScheduleItem {
            id: "squat_imaginary".into(),
            ..Default::default()
        });
        let week = WeeklySchedule::new(vec![(DayKey::A, day)]);

        let result = week.ensure_valid(&catalog);
        assert!(matches!(result, Err(Error::ScheduleValidation(_))));
    }

    #[test]
    fn test_zero_round_day_flagged() {
        let catalog = build_default_catalog();
        let mut day = default_weekly_schedule().day(DayKey::A).unwrap().clone();
        day.rounds = Rounds::Fixed { count: 0 };
        let week = WeeklySchedule::new(vec![(DayKey::A, day)]);
        let errors = week.validate(&catalog);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("round count of 0"));
    }
}
