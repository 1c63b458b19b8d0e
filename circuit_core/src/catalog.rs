//! Built-in exercise catalog.
//!
//! The catalog maps exercise ids to their display metadata. It is built
//! once at startup and read-only thereafter.

use crate::types::ExerciseDefinition;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Lookup table of exercise definitions keyed by id
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    exercises: HashMap<String, ExerciseDefinition>,
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: ExerciseDefinition) {
        self.exercises.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.exercises.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (id, def) in &self.exercises {
            if id.is_empty() || def.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if id != &def.id {
                errors.push(format!(
                    "Exercise key '{}' doesn't match definition.id '{}'",
                    id, def.id
                ));
            }
            if def.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", id));
            }
        }
        errors
    }
}

/// (id, name, demo media url, catalog-level default duration)
type ExerciseRow = (&'static str, &'static str, Option<&'static str>, Option<&'static str>);

const EXERCISES: &[ExerciseRow] = &[
    // Cardio
    ("cardio_march", "March in Place", Some("https://media.circuit.fit/cardio_march.gif"), None),
    ("cardio_high_knees", "High Knees", Some("https://media.circuit.fit/high_knees.gif"), None),
    ("cardio_jacks", "Jumping Jacks", Some("https://media.circuit.fit/jumping_jacks.gif"), None),
    ("cardio_mountain_climbers", "Mountain Climbers", Some("https://media.circuit.fit/mountain_climbers.gif"), None),
    ("cardio_shadow_boxing", "Shadow Boxing", None, None),
    // Mobility
    ("mob_hip_circles", "Hip Circles", None, None),
    ("mob_lunge_twist", "Lunge with Twist", None, None),
    ("mob_cat_cow", "Cat-Cow", Some("https://media.circuit.fit/cat_cow.gif"), None),
    ("mob_arm_circles", "Arm Circles", None, None),
    ("mob_pendulum", "Arm Pendulum Swings", None, None),
    ("mob_worlds_greatest", "World's Greatest Stretch", Some("https://media.circuit.fit/worlds_greatest.gif"), None),
    ("mob_hip_openers", "Standing Hip Openers", None, None),
    ("mob_torso_rotation", "Torso Rotations", None, None),
    // Strength
    ("squat_bodyweight", "Bodyweight Squat", Some("https://media.circuit.fit/bw_squat.gif"), None),
    ("squat_goblet", "Goblet Squat", Some("https://media.circuit.fit/goblet_squat.gif"), None),
    ("squat_calf_raise", "Squat to Calf Raise", None, None),
    ("squat_pulses", "Squat Pulses", None, None),
    ("lunge_reverse", "Reverse Lunge", Some("https://media.circuit.fit/reverse_lunge.gif"), None),
    ("lunge_knee_drive", "Lunge with Knee Drive", None, None),
    ("glute_bridge", "Glute Bridge", Some("https://media.circuit.fit/glute_bridge.gif"), None),
    ("rdl_dumbbell", "Dumbbell Romanian Deadlift", Some("https://media.circuit.fit/db_rdl.gif"), None),
    ("pushup_wall", "Wall Push-up", None, None),
    ("pushup_incline", "Incline Push-up", Some("https://media.circuit.fit/incline_pushup.gif"), None),
    ("row_one_arm", "One-Arm Row", Some("https://media.circuit.fit/one_arm_row.gif"), None),
    ("scapular_retraction", "Scapular Retractions", None, None),
    ("carry_suitcase", "Suitcase Carry", None, None),
    ("bear_crawl", "Bear Crawl", Some("https://media.circuit.fit/bear_crawl.gif"), None),
    // Core
    ("core_dead_bug", "Dead Bug", Some("https://media.circuit.fit/dead_bug.gif"), None),
    ("core_plank", "Plank", Some("https://media.circuit.fit/plank.gif"), None),
    ("core_side_plank", "Side Plank", Some("https://media.circuit.fit/side_plank.gif"), None),
    ("core_pallof", "Pallof Press", None, None),
    ("core_bicycle", "Bicycle Crunch", None, None),
    ("core_hollow_hold", "Hollow Hold", None, None),
    // Stretches
    ("stretch_hip_flexor", "Hip Flexor Stretch", None, Some("30s/side")),
    ("stretch_hamstring", "Hamstring Stretch", None, Some("30s/side")),
    ("stretch_figure4", "Figure-4 Stretch", None, Some("30s/side")),
    ("stretch_chest", "Doorway Chest Stretch", None, Some("30 sec")),
    ("stretch_upper_back", "Upper Back Stretch", None, Some("30 sec")),
    ("stretch_squat_hold", "Deep Squat Hold", None, Some("60 sec")),
    ("stretch_spinal_twist", "Supine Spinal Twist", None, Some("30s/side")),
    ("stretch_cobra", "Cobra Stretch", None, Some("30 sec")),
    ("stretch_childs_pose", "Child's Pose", None, Some("60 sec")),
    // Breathing
    ("breath_supine", "Supine Breathing", None, Some("1 min")),
    ("breath_nasal", "Nasal Breathing", None, Some("1 min")),
];

/// Builds the default catalog of exercises
///
/// **Note**: For production use, prefer `default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> ExerciseCatalog {
    let mut catalog = ExerciseCatalog::new();
    for (id, name, media_ref, default_duration) in EXERCISES {
        catalog.insert(ExerciseDefinition {
            id: (*id).into(),
            name: (*name).into(),
            media_ref: media_ref.map(Into::into),
            default_duration: default_duration.map(Into::into),
        });
    }
    catalog
}
