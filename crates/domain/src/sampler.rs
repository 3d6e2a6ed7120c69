use log::debug;
use rand::Rng;

use crate::{Archetype, Candidate, MuscleID, SamplingError};

const FALLBACK_MUSCLES: [MuscleID; 2] = [MuscleID::Core, MuscleID::Forearms];

pub fn accessory_count(rng: &mut impl Rng) -> usize {
    rng.gen_range(2..=3)
}

/// Draws up to `count` muscles without replacement, with probability proportional to score.
///
/// Stops early when the pool runs dry. If all remaining scores are zero, the first remaining
/// candidate is taken.
pub fn weighted_sample(
    mut pool: Vec<Candidate>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<MuscleID> {
    let mut selected = Vec::with_capacity(count.min(pool.len()));
    while selected.len() < count && !pool.is_empty() {
        let idx = draw(&pool, rng);
        selected.push(pool.remove(idx).muscle);
    }
    selected
}

fn draw(pool: &[Candidate], rng: &mut impl Rng) -> usize {
    let total = pool.iter().map(|c| c.score.max(0.0)).sum::<f64>();
    if !(total > 0.0 && total.is_finite()) {
        debug!("{}, taking first candidate", SamplingError::DegenerateScores);
        return 0;
    }
    let mut threshold = rng.gen_range(0.0..total);
    for (idx, candidate) in pool.iter().enumerate() {
        threshold -= candidate.score.max(0.0);
        if threshold < 0.0 {
            return idx;
        }
    }
    // Rounding can leave a tiny remainder.
    pool.iter().rposition(|c| c.score > 0.0).unwrap_or(0)
}

/// Minimal accessory pool used when scoring yields no candidates.
#[must_use]
pub fn fallback_pool(archetype: &Archetype) -> Vec<Candidate> {
    FALLBACK_MUSCLES
        .iter()
        .filter(|m| !archetype.is_mandatory(**m))
        .map(|muscle| Candidate {
            muscle: *muscle,
            score: 1.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use crate::ArchetypeID;

    use super::*;

    fn pool(scores: &[f64]) -> Vec<Candidate> {
        MuscleID::iter()
            .zip(scores)
            .map(|(muscle, score)| Candidate {
                muscle: *muscle,
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_accessory_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let counts = (0..100)
            .map(|_| accessory_count(&mut rng))
            .collect::<HashSet<_>>();

        assert_eq!(counts, HashSet::from([2, 3]));
    }

    #[test]
    fn test_weighted_sample_dominant_score_first() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);

            let selected = weighted_sample(pool(&[10.0, 0.0, 0.0]), 1, &mut rng);

            assert_eq!(selected, vec![MuscleID::Quads]);
        }
    }

    #[test]
    fn test_weighted_sample_dominant_score_not_first() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);

            let selected = weighted_sample(pool(&[0.0, 0.0, 10.0]), 2, &mut rng);

            assert_eq!(selected[0], MuscleID::Glutes);
            assert_eq!(selected.len(), 2);
        }
    }

    #[test]
    fn test_weighted_sample_all_zero() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            weighted_sample(pool(&[0.0, 0.0, 0.0]), 3, &mut rng),
            vec![MuscleID::Quads, MuscleID::Hamstrings, MuscleID::Glutes]
        );
    }

    #[rstest]
    #[case(&[], 3, 0)]
    #[case(&[1.0], 3, 1)]
    #[case(&[1.0, 2.0], 3, 2)]
    #[case(&[1.0, 2.0, 3.0, 4.0], 3, 3)]
    #[case(&[1.0, 2.0, 3.0, 4.0], 0, 0)]
    fn test_weighted_sample_count(
        #[case] scores: &[f64],
        #[case] count: usize,
        #[case] expected: usize,
    ) {
        let mut rng = StdRng::seed_from_u64(3);

        let selected = weighted_sample(pool(scores), count, &mut rng);

        assert_eq!(selected.len(), expected);
        assert_eq!(selected.iter().collect::<HashSet<_>>().len(), expected);
    }

    #[test]
    fn test_weighted_sample_distribution() {
        let mut rng = StdRng::seed_from_u64(5);
        let first_drawn = (0..1000)
            .filter(|_| weighted_sample(pool(&[3.0, 1.0]), 1, &mut rng)[0] == MuscleID::Quads)
            .count();

        assert!((650..850).contains(&first_drawn));
    }

    #[test]
    fn test_weighted_sample_deterministic() {
        let scores = [1.0, 4.0, 2.0, 0.5, 3.0];

        assert_eq!(
            weighted_sample(pool(&scores), 3, &mut StdRng::seed_from_u64(9)),
            weighted_sample(pool(&scores), 3, &mut StdRng::seed_from_u64(9))
        );
    }

    #[rstest]
    #[case(ArchetypeID::FullBodyA, vec![MuscleID::Core, MuscleID::Forearms])]
    #[case(ArchetypeID::Pull, vec![MuscleID::Core])]
    #[case(ArchetypeID::Longevity, vec![])]
    fn test_fallback_pool(#[case] archetype: ArchetypeID, #[case] expected: Vec<MuscleID>) {
        let pool = fallback_pool(archetype.archetype());

        assert_eq!(pool.iter().map(|c| c.muscle).collect::<Vec<_>>(), expected);
        assert!(pool.iter().all(|c| c.score > 0.0));
    }
}
