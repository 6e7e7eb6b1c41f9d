use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::{EXTRA_WAGONS, GameError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WagonItem {
    pub word: String,
    pub is_correct: bool,
}

/// One play-through: the category words, the wrong words picked for this
/// round and the shuffled tiles built from both.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub correct_words: Vec<String>,
    pub distractors: Vec<String>,
    pub round_extras: Vec<String>,
    pub wagon_items: Vec<WagonItem>,
}

impl RoundState {
    pub fn prepare<R: Rng + ?Sized>(
        correct_words: &[String],
        distractors: &[String],
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if distractors.len() < EXTRA_WAGONS {
            return Err(GameError::NotEnoughDistractors {
                needed: EXTRA_WAGONS,
                available: distractors.len(),
            });
        }

        let mut extras = distractors.to_vec();
        extras.shuffle(rng);
        extras.truncate(EXTRA_WAGONS);

        let mut wagon_items: Vec<WagonItem> = correct_words
            .iter()
            .map(|word| WagonItem {
                word: word.clone(),
                is_correct: true,
            })
            .chain(extras.iter().map(|word| WagonItem {
                word: word.clone(),
                is_correct: false,
            }))
            .collect();
        wagon_items.shuffle(rng);

        Ok(Self {
            correct_words: correct_words.to_vec(),
            distractors: distractors.to_vec(),
            round_extras: extras,
            wagon_items,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.correct_words.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn round_has_every_correct_word_and_four_extras() {
        let correct = words(&["банан", "бджола", "булка", "бочка", "бублик"]);
        let pool = words(&["дуб", "зуб", "хліб", "куб", "риба", "жаба"]);

        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let round = RoundState::prepare(&correct, &pool, &mut rng).unwrap();

            assert_eq!(round.wagon_items.len(), correct.len() + EXTRA_WAGONS);
            let tagged = round.wagon_items.iter().filter(|w| w.is_correct).count();
            assert_eq!(tagged, correct.len());
            assert_eq!(round.round_extras.len(), EXTRA_WAGONS);
            for extra in &round.round_extras {
                assert!(pool.contains(extra));
                assert!(
                    round
                        .wagon_items
                        .iter()
                        .any(|w| &w.word == extra && !w.is_correct)
                );
            }
        }
    }

    #[test]
    fn extras_are_distinct_picks() {
        let correct = words(&["a", "b", "c", "d"]);
        let pool = words(&["e", "f", "g", "h", "i"]);
        let mut rng = SmallRng::seed_from_u64(7);
        let round = RoundState::prepare(&correct, &pool, &mut rng).unwrap();
        let mut extras = round.round_extras.clone();
        extras.sort();
        extras.dedup();
        assert_eq!(extras.len(), EXTRA_WAGONS);
    }

    #[test]
    fn small_pool_is_rejected() {
        let correct = words(&["a", "b", "c", "d"]);
        let pool = words(&["e", "f", "g"]);
        let mut rng = SmallRng::seed_from_u64(1);
        let err = RoundState::prepare(&correct, &pool, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughDistractors {
                needed: 4,
                available: 3
            }
        );
    }
}
