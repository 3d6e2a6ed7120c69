use std::fmt;

use derive_more::{AsRef, Deref, Display};
use rand::{Rng, seq::SliceRandom};

use crate::{MissingExerciseError, MuscleID};

#[derive(Debug, PartialEq, Eq)]
pub struct Exercise {
    pub name: &'static str,
    pub muscles: &'static [MuscleID],
    pub equipment: Equipment,
    pub load: LoadPattern,
    pub sets: u32,
    pub reps: &'static str,
    pub progression: &'static str,
}

impl Exercise {
    #[must_use]
    pub fn id(&self) -> ExerciseID {
        ExerciseID::from_name(self.name)
    }

    #[must_use]
    pub fn targets(&self, muscle: MuscleID) -> bool {
        self.muscles.contains(&muscle)
    }
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    /// Lowercases the name and collapses every run of other characters into `_`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut id = String::with_capacity(name.len());
        let mut separator = false;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                if separator && !id.is_empty() {
                    id.push('_');
                }
                separator = false;
                id.push(c.to_ascii_lowercase());
            } else {
                separator = true;
            }
        }
        Self(id)
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Movement pattern that determines the first-time load estimate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LoadPattern {
    CompoundLower,
    BenchPress,
    Curl,
    Press,
    General,
}

impl LoadPattern {
    /// Fraction of body weight used as the starting load.
    #[must_use]
    pub fn body_weight_coefficient(self) -> f64 {
        match self {
            LoadPattern::CompoundLower => 0.8,
            LoadPattern::BenchPress => 0.6,
            LoadPattern::Curl => 0.2,
            LoadPattern::Press => 0.4,
            LoadPattern::General => 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Kettlebell,
    Bodyweight,
    Band,
    Grippers,
    Specialty,
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Equipment::Barbell => "Barbell",
                Equipment::Dumbbell => "Dumbbell",
                Equipment::Machine => "Machine",
                Equipment::Cable => "Cable",
                Equipment::Kettlebell => "Kettlebell",
                Equipment::Bodyweight => "Bodyweight",
                Equipment::Band => "Band",
                Equipment::Grippers => "Grippers",
                Equipment::Specialty => "Specialty",
            }
        )
    }
}

/// Selects one exercise targeting `muscle`, uniformly at random.
pub fn pick_exercise<'a>(
    catalog: &'a [Exercise],
    muscle: MuscleID,
    rng: &mut impl Rng,
) -> Result<&'a Exercise, MissingExerciseError> {
    catalog
        .iter()
        .filter(|e| e.targets(muscle))
        .collect::<Vec<_>>()
        .choose(rng)
        .copied()
        .ok_or(MissingExerciseError { muscle })
}

const fn ex(
    name: &'static str,
    muscles: &'static [MuscleID],
    equipment: Equipment,
    load: LoadPattern,
    sets: u32,
    reps: &'static str,
    progression: &'static str,
) -> Exercise {
    Exercise {
        name,
        muscles,
        equipment,
        load,
        sets,
        reps,
        progression,
    }
}

use Equipment::{
    Band, Barbell, Bodyweight, Cable, Dumbbell, Grippers, Kettlebell, Machine, Specialty,
};
use LoadPattern::{BenchPress, CompoundLower, Curl, General, Press};

#[rustfmt::skip]
pub static EXERCISES: &[Exercise] = &[
    // Quadriceps
    ex("Back Squat (high-bar)", &[MuscleID::Quads], Barbell, CompoundLower, 3, "5", "Add 5 lbs"),
    ex("Front Squat", &[MuscleID::Quads], Barbell, CompoundLower, 3, "5", "Add 5 lbs"),
    ex("Hack Squat", &[MuscleID::Quads], Machine, CompoundLower, 3, "8-12", "Add 10 lbs"),
    ex("Goblet Squat", &[MuscleID::Quads], Dumbbell, CompoundLower, 3, "10-15", "Heavier DB"),
    ex("Dumbbell Bulgarian Split Squat", &[MuscleID::Quads], Dumbbell, CompoundLower, 3, "8-12 each", "Add 2.5-5 lbs"),
    ex("Leg Press", &[MuscleID::Quads], Machine, General, 3, "10-15", "Add 10-20 lbs"),
    ex("Leg Extension", &[MuscleID::Quads], Machine, General, 3, "12-20", "Add 5-10 lbs"),
    ex("Sissy Squat", &[MuscleID::Quads], Specialty, CompoundLower, 3, "10-15", "Add weight (plate)"),
    // Hamstrings
    ex("Romanian Deadlift (RDL)", &[MuscleID::Hamstrings], Barbell, CompoundLower, 3, "8-12", "Add 5-10 lbs"),
    ex("Conventional Deadlift", &[MuscleID::Hamstrings], Barbell, CompoundLower, 3, "5", "Add 5-10 lbs"),
    ex("Good Morning", &[MuscleID::Hamstrings], Barbell, General, 3, "8-12", "Add 5-10 lbs"),
    ex("Lying Leg Curl", &[MuscleID::Hamstrings], Machine, Curl, 3, "12-20", "Add 5-10 lbs"),
    ex("Seated Leg Curl", &[MuscleID::Hamstrings], Machine, Curl, 3, "12-20", "Add 5-10 lbs"),
    ex("Nordic Curl (eccentric)", &[MuscleID::Hamstrings], Bodyweight, Curl, 3, "5-8", "Add eccentric time"),
    // Glutes
    ex("Hip Thrust", &[MuscleID::Glutes], Barbell, General, 3, "8-12", "Add 10 lbs"),
    ex("Dumbbell Glute Bridge", &[MuscleID::Glutes], Dumbbell, General, 3, "15", "Heavier DB"),
    ex("Cable Glute Kickback", &[MuscleID::Glutes], Cable, General, 3, "15 each", "Increase weight"),
    ex("Step-ups", &[MuscleID::Glutes], Bodyweight, General, 3, "12 each", "Add height/reps"),
    ex("Kettlebell Swing", &[MuscleID::Glutes], Kettlebell, CompoundLower, 3, "15-20", "Heavier bell"),
    // Chest
    ex("Flat Bench Press", &[MuscleID::Chest], Barbell, BenchPress, 3, "5", "Add 2.5-5 lbs"),
    ex("Incline Bench Press", &[MuscleID::Chest], Barbell, BenchPress, 3, "8-12", "Add 5 lbs"),
    ex("Flat Dumbbell Press", &[MuscleID::Chest], Dumbbell, Press, 3, "8-12", "Heavier DB"),
    ex("Dumbbell Fly", &[MuscleID::Chest], Dumbbell, General, 3, "12-15", "Heavier DB"),
    ex("Chest Press Machine", &[MuscleID::Chest], Machine, Press, 3, "10-15", "Add weight"),
    ex("Push-up", &[MuscleID::Chest], Bodyweight, General, 3, "20+", "Add reps, then weighted vest"),
    // Back
    ex("Bent-Over Row", &[MuscleID::Back], Barbell, General, 3, "8-12", "Add 5-10 lbs"),
    ex("Pendlay Row", &[MuscleID::Back], Barbell, General, 3, "6-10", "Add 5 lbs"),
    ex("Single-Arm Dumbbell Row", &[MuscleID::Back], Dumbbell, General, 3, "10-15 each", "Heavier DB"),
    ex("Seated Cable Row", &[MuscleID::Back], Machine, General, 3, "10-15", "Add 5-10 lbs"),
    ex("Inverted Row", &[MuscleID::Back], Bodyweight, General, 3, "12-15", "Elevate feet"),
    // Lats
    ex("Lat Pulldown", &[MuscleID::Lats], Machine, General, 3, "10-15", "Add 5-10 lbs"),
    ex("Straight-Arm Pulldown", &[MuscleID::Lats], Cable, General, 3, "12-15", "Increase weight"),
    ex("Pull-ups", &[MuscleID::Lats], Bodyweight, General, 3, "AMRAP", "Add reps, then weighted"),
    // Traps
    ex("Barbell Shrug", &[MuscleID::Traps], Barbell, General, 3, "12-15", "Add 10 lbs"),
    ex("Dumbbell Shrug", &[MuscleID::Traps], Dumbbell, General, 3, "12-15", "Heavier DB"),
    // Rear delts
    ex("Face Pull", &[MuscleID::RearDelts], Cable, General, 3, "15-20", "Increase weight"),
    ex("Bent-Over Reverse Fly", &[MuscleID::RearDelts], Dumbbell, General, 3, "15", "Heavier DB"),
    ex("Reverse Pec Deck", &[MuscleID::RearDelts], Machine, General, 3, "15", "Add weight"),
    // Shoulders
    ex("Overhead Press (strict)", &[MuscleID::Shoulders], Barbell, Press, 3, "5", "Add 2.5 lbs"),
    ex("Seated Dumbbell Press", &[MuscleID::Shoulders], Dumbbell, Press, 3, "8-12", "Heavier DB"),
    ex("Arnold Press", &[MuscleID::Shoulders], Dumbbell, Press, 3, "8-12", "Heavier DB"),
    ex("Dumbbell Lateral Raise", &[MuscleID::Shoulders], Dumbbell, General, 3, "15-20", "Add 2.5 lbs"),
    ex("Cable Lateral Raise", &[MuscleID::Shoulders], Cable, General, 3, "15", "Increase weight"),
    ex("Turkish Get-Up", &[MuscleID::Shoulders], Kettlebell, General, 3, "3 each", "Heavier bell"),
    // Biceps
    ex("Barbell Curl", &[MuscleID::Biceps], Barbell, Curl, 3, "8-12", "Add 2.5 lbs"),
    ex("EZ-Bar Curl", &[MuscleID::Biceps], Barbell, Curl, 3, "8-12", "Add 2.5 lbs"),
    ex("Incline Dumbbell Curl", &[MuscleID::Biceps], Dumbbell, Curl, 3, "10-12", "Heavier DB"),
    ex("Concentration Curl", &[MuscleID::Biceps], Dumbbell, Curl, 3, "12-15", "Heavier DB"),
    ex("Chin-up (underhand)", &[MuscleID::Biceps], Bodyweight, General, 3, "AMRAP", "Add weight"),
    // Triceps
    ex("Close-Grip Bench Press", &[MuscleID::Triceps], Barbell, BenchPress, 3, "8-12", "Add 5 lbs"),
    ex("Skull Crusher (French Press)", &[MuscleID::Triceps], Barbell, Press, 3, "10-12", "Add 2.5 lbs"),
    ex("Overhead Dumbbell Extension", &[MuscleID::Triceps], Dumbbell, General, 3, "12-15", "Heavier DB"),
    ex("Cable Pushdown", &[MuscleID::Triceps], Cable, General, 3, "15", "Increase weight"),
    ex("Dips (triceps focus)", &[MuscleID::Triceps], Bodyweight, General, 3, "10-20", "Add weight"),
    // Forearms
    ex("Wrist Curl (palms up)", &[MuscleID::Forearms], Barbell, Curl, 3, "15-20", "Add 2.5 lbs"),
    ex("Reverse Wrist Curl (palms down)", &[MuscleID::Forearms], Barbell, Curl, 3, "15-20", "Add 2.5 lbs"),
    ex("Farmer's Walk", &[MuscleID::Forearms], Dumbbell, General, 3, "30-60 sec", "Heavier weights"),
    ex("Dead Hang", &[MuscleID::Forearms], Bodyweight, General, 3, "max time", "Add time"),
    ex("Wrist Roller", &[MuscleID::Forearms], Specialty, General, 3, "roll up/down", "Add weight"),
    // Core
    ex("Plank", &[MuscleID::Core], Bodyweight, General, 3, "60+ sec", "Add time, then weighted vest"),
    ex("Hanging Leg Raise", &[MuscleID::Core], Bodyweight, General, 3, "15", "Add ankle weight"),
    ex("Cable Crunch", &[MuscleID::Core], Machine, General, 3, "15", "Increase weight"),
    ex("Ab Wheel", &[MuscleID::Core], Specialty, General, 3, "8-12", "Add reps, then standing"),
    ex("Dragon Flag", &[MuscleID::Core], Specialty, General, 3, "5-8", "Progress from tuck"),
    // Obliques
    ex("Dumbbell Side Bend", &[MuscleID::Obliques], Dumbbell, General, 3, "15 each", "Heavier DB"),
    ex("Cable Woodchopper", &[MuscleID::Obliques], Cable, General, 3, "12 each", "Increase weight"),
    ex("Russian Twist (with dumbbell)", &[MuscleID::Obliques], Dumbbell, General, 3, "20", "Heavier DB"),
    // Hip flexors
    ex("Mountain Climbers", &[MuscleID::HipFlexors], Bodyweight, General, 3, "30 sec", "Increase speed"),
    ex("L-Sit", &[MuscleID::HipFlexors], Bodyweight, General, 3, "max time", "Progress to longer"),
    // Adductors and abductors
    ex("Adduction Machine", &[MuscleID::Adductors], Machine, General, 3, "15-20", "Add weight"),
    ex("Cable Hip Adduction", &[MuscleID::Adductors], Cable, General, 3, "15 each", "Increase weight"),
    ex("Copenhagen Plank", &[MuscleID::Adductors], Specialty, General, 3, "30 sec each", "Increase time"),
    ex("Abduction Machine", &[MuscleID::Abductors], Machine, General, 3, "15-20", "Add weight"),
    ex("Cable Hip Abduction", &[MuscleID::Abductors], Cable, General, 3, "15 each", "Increase weight"),
    ex("Clamshell", &[MuscleID::Abductors], Bodyweight, General, 3, "20 each", "Add band"),
    // Erectors
    ex("Reverse Hyperextension", &[MuscleID::Erectors], Specialty, General, 3, "12-15", "Add weight"),
    ex("45° Hyperextension", &[MuscleID::Erectors], Specialty, General, 3, "12-15", "Add plate"),
    ex("Rack Pull", &[MuscleID::Erectors], Barbell, CompoundLower, 3, "5-8", "Add weight"),
    // Serratus
    ex("Landmine Press", &[MuscleID::Serratus], Specialty, Press, 3, "10-12", "Add weight"),
    // Calves
    ex("Standing Calf Raise (barbell on back)", &[MuscleID::Calves], Barbell, General, 4, "15-20", "Add 10 lbs"),
    ex("Seated Calf Raise Machine", &[MuscleID::Calves], Machine, General, 4, "20", "Add weight"),
    ex("Single-Leg Calf Raise (holding DB)", &[MuscleID::Calves], Dumbbell, General, 4, "15 each", "Heavier DB"),
    ex("Bodyweight Calf Raise", &[MuscleID::Calves], Bodyweight, General, 4, "25", "Increase reps"),
    // Neck
    ex("Neck Isometric (manual)", &[MuscleID::Neck], Bodyweight, General, 3, "10 sec each direction", "Increase resistance"),
    ex("Neck Harness (plate)", &[MuscleID::Neck], Bodyweight, General, 3, "8-12", "Add 2.5 lbs"),
    ex("Band Neck Flexion", &[MuscleID::DeepNeck], Band, General, 3, "15", "Increase band tension"),
    ex("Chin Tuck", &[MuscleID::DeepNeck], Bodyweight, General, 3, "10 holds", "Increase hold time"),
    // Shoulder girdle
    ex("YTWL (lying on incline)", &[MuscleID::Rhomboids], Bodyweight, General, 3, "10 each", "Hold longer"),
    ex("Band Pull-Apart", &[MuscleID::Rhomboids], Band, General, 3, "20", "Thicker band"),
    ex("Band External Rotation", &[MuscleID::Infraspinatus], Band, General, 3, "15 each", "Thicker band"),
    ex("Side-Lying External Rotation", &[MuscleID::Teres], Dumbbell, General, 3, "15 each", "Add 1 lb"),
    ex("Full Can Raise", &[MuscleID::Supraspinatus], Dumbbell, General, 3, "12-15", "Add 1 lb"),
    ex("Band Internal Rotation", &[MuscleID::Subscapularis], Band, General, 3, "15 each", "Thicker band"),
    ex("Scapular Shrug (pec minor stretch)", &[MuscleID::PecMinor], Bodyweight, General, 3, "12", "Add pause"),
    ex("Levator Scapulae Stretch", &[MuscleID::LevatorScap], Bodyweight, General, 2, "30 sec each", "Increase hold time"),
    ex("Low-to-High Cable Fly", &[MuscleID::Coracobrach], Cable, General, 3, "12-15", "Increase weight"),
    // Elbow and wrist
    ex("Cable Hammer Curl", &[MuscleID::Brachialis], Cable, Curl, 3, "15", "Increase weight"),
    ex("Reverse Curl", &[MuscleID::Brachioradialis], Barbell, Curl, 3, "12-15", "Add 2.5 lbs"),
    ex("Dumbbell Supination", &[MuscleID::Supinator], Dumbbell, General, 3, "15 each", "Choke up on handle"),
    ex("Dumbbell Pronation", &[MuscleID::Pronator], Dumbbell, General, 3, "15 each", "Choke up on handle"),
    ex("Elbow Lockout Isometric", &[MuscleID::Anconeus], Bodyweight, General, 3, "10 sec holds", "Increase hold time"),
    ex("Kettlebell Bottoms-Up Hold", &[MuscleID::Forearms], Kettlebell, General, 3, "20 sec each", "Heavier bell"),
    // Knee, shin and ankle
    ex("Tibialis Raise", &[MuscleID::Tibialis], Bodyweight, General, 3, "20", "Add weight"),
    ex("Banded Ankle Eversion", &[MuscleID::PeroneusTertius], Band, General, 3, "20", "Thicker band"),
    ex("Bent-Knee Calf Raise (on step)", &[MuscleID::Soleus], Bodyweight, General, 4, "20", "Add weight"),
    ex("Terminal Knee Extension", &[MuscleID::ArticularisGenus], Band, General, 3, "20 each", "Thicker band"),
    ex("Seated Knee Flexion (band)", &[MuscleID::Popliteus], Band, General, 3, "15 each", "Thicker band"),
    // Deep trunk
    ex("Bird Dog", &[MuscleID::Multifidus], Bodyweight, General, 3, "10 each", "Add pause"),
    ex("Cable Pallof Press", &[MuscleID::Transverse], Cable, General, 3, "10 sec holds", "Increase weight"),
    ex("Dead Bug", &[MuscleID::Transverse], Bodyweight, General, 3, "10 each", "Add ankle weight"),
    // Hands
    ex("Captains of Crush Grippers", &[MuscleID::Thenar], Grippers, General, 3, "5-10 each hand", "Higher resistance"),
    ex("Plate Pinch", &[MuscleID::Thenar], Specialty, General, 3, "max time", "Heavier plates"),
    ex("Finger Extension with Band", &[MuscleID::HandLumbricals], Band, General, 3, "15", "Thicker band"),
    ex("Finger Adduction (rubber band)", &[MuscleID::HandInterossei], Band, General, 3, "20", "Thicker band"),
    // Feet
    ex("Short Foot", &[MuscleID::FootIntrinsics], Bodyweight, General, 3, "10 holds (10 sec)", "Increase hold time"),
    ex("Towel Curls", &[MuscleID::FootIntrinsics], Bodyweight, General, 3, "20", "Increase resistance"),
    ex("Toe Yoga", &[MuscleID::FootInterossei], Bodyweight, General, 3, "20", "Increase range of motion"),
    ex("Marble Pickup", &[MuscleID::FlexorBrevis], Bodyweight, General, 3, "20", "Smaller objects"),
    ex("Big Toe Abduction", &[MuscleID::AbductorHallucis], Bodyweight, General, 3, "15 each", "Add hold"),
    ex("Arch Doming", &[MuscleID::QuadratusPlantae], Bodyweight, General, 3, "15 each", "Add hold"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Back Squat (high-bar)", "back_squat_high_bar")]
    #[case("Farmer's Walk", "farmer_s_walk")]
    #[case("45° Hyperextension", "45_hyperextension")]
    #[case("  Plank  ", "plank")]
    fn test_exercise_id_from_name(#[case] name: &str, #[case] id: &str) {
        assert_eq!(ExerciseID::from_name(name), ExerciseID::from(id));
    }

    #[test]
    fn test_exercise_ids_unique() {
        let mut ids = HashSet::new();

        for exercise in EXERCISES {
            let id = exercise.id();

            assert!(!id.is_empty());
            assert!(!ids.contains(&id), "duplicate id {id}");

            ids.insert(id);
        }
    }

    #[test]
    fn test_every_exercise_targets_a_muscle() {
        assert!(EXERCISES.iter().all(|e| !e.muscles.is_empty()));
        assert!(EXERCISES.iter().all(|e| e.sets > 0));
    }

    #[test]
    fn test_only_calf_exercises_target_calves() {
        assert!(
            EXERCISES
                .iter()
                .filter(|e| e.targets(MuscleID::Calves))
                .all(|e| e.muscles == [MuscleID::Calves])
        );
    }

    #[test]
    fn test_every_muscle_has_exercises() {
        for muscle in MuscleID::iter() {
            assert!(
                EXERCISES.iter().any(|e| e.targets(*muscle)),
                "no exercise for {}",
                muscle.as_ref()
            );
        }
    }

    #[test]
    fn test_every_equipment_is_used() {
        for equipment in [
            Equipment::Barbell,
            Equipment::Dumbbell,
            Equipment::Machine,
            Equipment::Cable,
            Equipment::Kettlebell,
            Equipment::Bodyweight,
            Equipment::Band,
            Equipment::Grippers,
            Equipment::Specialty,
        ] {
            assert!(
                EXERCISES.iter().any(|e| e.equipment == equipment),
                "unused equipment {equipment}"
            );
        }
    }

    #[test]
    fn test_fallback_muscles_have_exercises() {
        for muscle in [MuscleID::Core, MuscleID::Forearms] {
            assert!(EXERCISES.iter().any(|e| e.targets(muscle)));
        }
    }

    #[rstest]
    #[case(LoadPattern::CompoundLower, 0.8)]
    #[case(LoadPattern::BenchPress, 0.6)]
    #[case(LoadPattern::Curl, 0.2)]
    #[case(LoadPattern::Press, 0.4)]
    #[case(LoadPattern::General, 0.3)]
    fn test_load_pattern_coefficient(#[case] load: LoadPattern, #[case] expected: f64) {
        assert_eq!(load.body_weight_coefficient(), expected);
    }

    #[test]
    fn test_pick_exercise() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let exercise = pick_exercise(EXERCISES, MuscleID::Chest, &mut rng).unwrap();
            assert!(exercise.targets(MuscleID::Chest));
        }
    }

    #[test]
    fn test_pick_exercise_single_candidate() {
        static CATALOG: &[Exercise] = &[
            ex("Plank", &[MuscleID::Core], Bodyweight, General, 3, "60 sec", "Add time"),
            ex("Push-up", &[MuscleID::Chest], Bodyweight, General, 3, "20", "Add reps"),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            pick_exercise(CATALOG, MuscleID::Core, &mut rng).map(|e| e.name),
            Ok("Plank")
        );
    }

    #[test]
    fn test_pick_exercise_missing() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            pick_exercise(&EXERCISES[..1], MuscleID::Neck, &mut rng),
            Err(MissingExerciseError {
                muscle: MuscleID::Neck
            })
        );
    }

    #[test]
    fn test_equipment_display() {
        assert_eq!(Equipment::Kettlebell.to_string(), "Kettlebell");
        assert_eq!(Equipment::Grippers.to_string(), "Grippers");
    }
}
