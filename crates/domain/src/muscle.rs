use std::slice::Iter;

use strum::{AsRefStr, EnumString};

#[derive(AsRefStr, EnumString, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[strum(serialize_all = "snake_case")]
pub enum MuscleID {
    // Major
    Quads,
    Hamstrings,
    Glutes,
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Calves,
    Core,
    Forearms,
    Traps,
    Lats,
    RearDelts,
    Obliques,
    HipFlexors,
    Adductors,
    Abductors,
    Erectors,
    Serratus,
    // Longevity
    Neck,
    DeepNeck,
    LevatorScap,
    Rhomboids,
    Teres,
    Infraspinatus,
    Supraspinatus,
    Subscapularis,
    Brachialis,
    Brachioradialis,
    Anconeus,
    Supinator,
    Pronator,
    PecMinor,
    Coracobrach,
    Popliteus,
    Tibialis,
    Soleus,
    PeroneusTertius,
    ArticularisGenus,
    Multifidus,
    Transverse,
    QuadratusPlantae,
    // Hands
    HandLumbricals,
    HandInterossei,
    Thenar,
    // Feet
    FootIntrinsics,
    FootInterossei,
    AbductorHallucis,
    FlexorBrevis,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Major,
    Longevity,
    Hands,
    Feet,
}

impl Category {
    /// Categories whose muscles are joint-health work rather than primary movers.
    #[must_use]
    pub fn is_longevity(self) -> bool {
        matches!(self, Category::Longevity | Category::Hands | Category::Feet)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum AgingRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Muscle {
    pub id: MuscleID,
    pub name: &'static str,
    pub category: Category,
    pub rest_days: u32,
    pub aging_risk: Option<AgingRisk>,
}

impl Muscle {
    /// Whether an injury note refers to this muscle by key, display name or a common alias.
    ///
    /// Only whole words match, so "feedback" does not mention the back.
    #[must_use]
    pub fn is_mentioned_in(&self, note: &str) -> bool {
        let note = note.to_lowercase();
        let words = tokens(&note).collect::<Vec<_>>();
        let key = self.id.as_ref().replace('_', " ");
        let name = self.name.to_lowercase();
        [key.as_str(), name.as_str()]
            .into_iter()
            .chain(self.id.aliases().iter().copied())
            .any(|term| contains_phrase(&words, term))
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let phrase = tokens(phrase).collect::<Vec<_>>();
    !phrase.is_empty()
        && words
            .windows(phrase.len())
            .any(|window| window == phrase.as_slice())
}

impl MuscleID {
    pub fn iter() -> Iter<'static, MuscleID> {
        static MUSCLES: std::sync::LazyLock<Vec<MuscleID>> =
            std::sync::LazyLock::new(|| REGISTRY.iter().map(|m| m.id).collect());
        MUSCLES.iter()
    }

    #[must_use]
    pub fn muscle(self) -> &'static Muscle {
        // The registry is ordered like the enum.
        &REGISTRY[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.muscle().name
    }

    #[must_use]
    pub fn category(self) -> Category {
        self.muscle().category
    }

    /// Everyday words for a muscle, mostly singular forms.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            MuscleID::Quads => &["quad", "quadricep"],
            MuscleID::Hamstrings => &["hamstring", "hammy"],
            MuscleID::Glutes => &["glute", "gluteus"],
            MuscleID::Chest => &["pec", "pecs", "pectoral", "pectorals"],
            MuscleID::Shoulders => &["shoulder"],
            MuscleID::Biceps => &["bicep"],
            MuscleID::Triceps => &["tricep"],
            MuscleID::Calves => &["calf"],
            MuscleID::Core => &["abs"],
            MuscleID::Forearms => &["forearm"],
            MuscleID::Traps => &["trap", "trapezius"],
            MuscleID::Lats => &["lat", "latissimus"],
            MuscleID::RearDelts => &["rear delt", "rear deltoid"],
            MuscleID::Obliques => &["oblique"],
            MuscleID::HipFlexors => &["hip flexor", "psoas"],
            MuscleID::Adductors => &["adductor", "groin"],
            MuscleID::Abductors => &["abductor"],
            MuscleID::Erectors => &["erector", "spinal erectors"],
            MuscleID::LevatorScap => &["levator"],
            MuscleID::Rhomboids => &["rhomboid"],
            MuscleID::Teres => &["teres major", "teres minor"],
            MuscleID::Pronator => &["pronator teres"],
            MuscleID::Tibialis => &["shin", "shins"],
            MuscleID::PeroneusTertius => &["peroneus", "peroneal"],
            MuscleID::Transverse => &["transversus abdominis"],
            MuscleID::HandLumbricals => &["lumbrical", "lumbricals"],
            MuscleID::Thenar => &["hypothenar"],
            MuscleID::FootIntrinsics => &["foot intrinsic", "arch"],
            _ => &[],
        }
    }
}

const fn major(id: MuscleID, name: &'static str, rest_days: u32) -> Muscle {
    Muscle {
        id,
        name,
        category: Category::Major,
        rest_days,
        aging_risk: None,
    }
}

const fn at_risk(
    id: MuscleID,
    name: &'static str,
    category: Category,
    rest_days: u32,
    aging_risk: AgingRisk,
) -> Muscle {
    Muscle {
        id,
        name,
        category,
        rest_days,
        aging_risk: Some(aging_risk),
    }
}

use AgingRisk::{High, Low, Medium};
use Category::{Feet, Hands, Longevity};

pub static REGISTRY: [Muscle; 50] = [
    major(MuscleID::Quads, "Quadriceps", 3),
    major(MuscleID::Hamstrings, "Hamstrings", 3),
    major(MuscleID::Glutes, "Glutes", 2),
    major(MuscleID::Chest, "Chest", 2),
    major(MuscleID::Back, "Back", 2),
    major(MuscleID::Shoulders, "Shoulders", 2),
    major(MuscleID::Biceps, "Biceps", 2),
    major(MuscleID::Triceps, "Triceps", 2),
    major(MuscleID::Calves, "Calves", 2),
    major(MuscleID::Core, "Core", 1),
    major(MuscleID::Forearms, "Forearms", 2),
    major(MuscleID::Traps, "Traps", 2),
    major(MuscleID::Lats, "Latissimus Dorsi", 2),
    major(MuscleID::RearDelts, "Rear Deltoids", 2),
    major(MuscleID::Obliques, "Obliques", 2),
    major(MuscleID::HipFlexors, "Hip Flexors", 2),
    major(MuscleID::Adductors, "Adductors", 3),
    major(MuscleID::Abductors, "Abductors", 2),
    major(MuscleID::Erectors, "Erector Spinae", 3),
    major(MuscleID::Serratus, "Serratus Anterior", 2),
    at_risk(MuscleID::Neck, "Neck", Longevity, 3, High),
    at_risk(MuscleID::DeepNeck, "Deep Neck Flexors", Longevity, 2, High),
    at_risk(MuscleID::LevatorScap, "Levator Scapulae", Longevity, 2, Medium),
    at_risk(MuscleID::Rhomboids, "Rhomboids", Longevity, 2, Medium),
    at_risk(MuscleID::Teres, "Teres Major/Minor", Longevity, 3, Medium),
    at_risk(MuscleID::Infraspinatus, "Infraspinatus", Longevity, 3, High),
    at_risk(MuscleID::Supraspinatus, "Supraspinatus", Longevity, 3, High),
    at_risk(MuscleID::Subscapularis, "Subscapularis", Longevity, 3, High),
    at_risk(MuscleID::Brachialis, "Brachialis", Longevity, 2, Low),
    at_risk(MuscleID::Brachioradialis, "Brachioradialis", Longevity, 2, Low),
    at_risk(MuscleID::Anconeus, "Anconeus", Longevity, 2, Medium),
    at_risk(MuscleID::Supinator, "Supinator", Longevity, 2, Medium),
    at_risk(MuscleID::Pronator, "Pronators", Longevity, 2, Medium),
    at_risk(MuscleID::PecMinor, "Pectoralis Minor", Longevity, 2, Medium),
    at_risk(MuscleID::Coracobrach, "Coracobrachialis", Longevity, 2, Low),
    at_risk(MuscleID::Popliteus, "Popliteus", Longevity, 3, High),
    at_risk(MuscleID::Tibialis, "Tibialis Anterior", Longevity, 2, Medium),
    at_risk(MuscleID::Soleus, "Soleus", Longevity, 2, Medium),
    at_risk(MuscleID::PeroneusTertius, "Peroneus Tertius", Longevity, 2, High),
    at_risk(MuscleID::ArticularisGenus, "Articularis Genus", Longevity, 2, High),
    at_risk(MuscleID::Multifidus, "Multifidus", Longevity, 2, High),
    at_risk(MuscleID::Transverse, "Transverse Abdominis", Longevity, 1, High),
    at_risk(MuscleID::QuadratusPlantae, "Quadratus Plantae", Longevity, 2, Medium),
    at_risk(MuscleID::HandLumbricals, "Hand Lumbricals", Hands, 1, High),
    at_risk(MuscleID::HandInterossei, "Hand Interossei", Hands, 1, High),
    at_risk(MuscleID::Thenar, "Thenar/Hypothenar", Hands, 1, High),
    at_risk(MuscleID::FootIntrinsics, "Foot Intrinsics", Feet, 1, High),
    at_risk(MuscleID::FootInterossei, "Foot Interossei", Feet, 1, High),
    at_risk(MuscleID::AbductorHallucis, "Abductor Hallucis", Feet, 2, Medium),
    at_risk(MuscleID::FlexorBrevis, "Flexor Digitorum Brevis", Feet, 2, Medium),
];
