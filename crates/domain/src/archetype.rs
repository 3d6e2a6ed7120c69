use std::slice::Iter;

use strum::{AsRefStr, EnumString};

use crate::MuscleID;

#[derive(AsRefStr, EnumString, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[strum(serialize_all = "snake_case")]
pub enum ArchetypeID {
    FullBodyA,
    FullBodyB,
    Longevity,
    Push,
    Pull,
    Legs,
}

/// Session template of the fixed training rotation.
#[derive(Debug, PartialEq, Eq)]
pub struct Archetype {
    pub id: ArchetypeID,
    pub name: &'static str,
    pub focus: &'static [MuscleID],
    pub rest_days: u32,
    pub leg_focused: bool,
}

impl Archetype {
    #[must_use]
    pub fn is_mandatory(&self, muscle: MuscleID) -> bool {
        self.focus.contains(&muscle)
    }
}

impl ArchetypeID {
    pub fn iter() -> Iter<'static, ArchetypeID> {
        static ARCHETYPES: [ArchetypeID; 6] = [
            ArchetypeID::FullBodyA,
            ArchetypeID::FullBodyB,
            ArchetypeID::Longevity,
            ArchetypeID::Push,
            ArchetypeID::Pull,
            ArchetypeID::Legs,
        ];
        ARCHETYPES.iter()
    }

    #[must_use]
    pub fn archetype(self) -> &'static Archetype {
        &ROTATION[self.index()]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.archetype().name
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Successor in the rotation, wrapping to the first archetype.
    #[must_use]
    pub fn next(self) -> ArchetypeID {
        ROTATION[(self.index() + 1) % ROTATION.len()].id
    }
}

/// The first session, or one following an unknown archetype, starts the rotation over.
#[must_use]
pub fn next_archetype(previous: Option<ArchetypeID>) -> &'static Archetype {
    previous.map_or(&ROTATION[0], |id| id.next().archetype())
}

pub static ROTATION: [Archetype; 6] = [
    Archetype {
        id: ArchetypeID::FullBodyA,
        name: "Full Body A (Strength)",
        focus: &[
            MuscleID::Quads,
            MuscleID::Chest,
            MuscleID::Back,
            MuscleID::Shoulders,
        ],
        rest_days: 2,
        leg_focused: false,
    },
    Archetype {
        id: ArchetypeID::FullBodyB,
        name: "Full Body B (Hypertrophy)",
        focus: &[
            MuscleID::Hamstrings,
            MuscleID::Back,
            MuscleID::Biceps,
            MuscleID::Glutes,
        ],
        rest_days: 2,
        leg_focused: false,
    },
    Archetype {
        id: ArchetypeID::Longevity,
        name: "Longevity & Joint Health",
        focus: &[
            MuscleID::Neck,
            MuscleID::Forearms,
            MuscleID::FootIntrinsics,
            MuscleID::Core,
        ],
        rest_days: 1,
        leg_focused: false,
    },
    Archetype {
        id: ArchetypeID::Push,
        name: "Push Day",
        focus: &[MuscleID::Chest, MuscleID::Shoulders, MuscleID::Triceps],
        rest_days: 3,
        leg_focused: false,
    },
    Archetype {
        id: ArchetypeID::Pull,
        name: "Pull Day",
        focus: &[MuscleID::Back, MuscleID::Biceps, MuscleID::Forearms],
        rest_days: 3,
        leg_focused: false,
    },
    Archetype {
        id: ArchetypeID::Legs,
        name: "Legs Day",
        focus: &[
            MuscleID::Quads,
            MuscleID::Hamstrings,
            MuscleID::Glutes,
            MuscleID::Calves,
        ],
        rest_days: 3,
        leg_focused: true,
    },
];
