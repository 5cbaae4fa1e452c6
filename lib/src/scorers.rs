//! Scorers that rank potential guesses against the current set of possible words.

use crate::data::LocatedLetter;
use crate::data::WordCounter;
use crate::restrictions::WordRestrictions;
use crate::results::get_result_for_guess;
use crate::results::CompressedGuessResult;
use crate::results::WordleError;
use crate::results::MAX_WORD_LENGTH;
use rayon::prelude::*;
use std::collections::HashMap;
use std::result::Result;
use std::sync::Arc;

/// Gives words a score, where the maximum score indicates the best guess.
///
/// Use [`MaxEntropyScorer`] to minimize the expected number of guesses if you can
/// afford the computation cost, or [`LetterFrequencyScorer`] for decent guessing
/// performance at a much lower cost.
pub trait WordScorer {
    /// Updates the scorer with the latest guess, the updated set of restrictions, and
    /// the updated list of possible words.
    fn update(
        &mut self,
        latest_guess: &str,
        restrictions: &WordRestrictions,
        possible_words: &[Arc<str>],
    ) -> Result<(), WordleError>;

    /// Determines a score for the given word. The higher the score, the better the
    /// guess.
    fn score_word(&self, word: &Arc<str>) -> i64;
}

/// Scores a guess by the Shannon entropy of the partition it induces on the set of
/// possible words.
///
/// Each possible word is treated as a hypothetical objective, and the possible words
/// are grouped by the feedback pattern the guess would receive against them. A guess
/// whose patterns split the possible words into many small groups carries more
/// information, and a guess that splits them into singletons is unbeatable. The
/// entropy is `-sum(p * log2(p))` over the group probabilities, scaled by 1000 and
/// truncated so scores can be compared as integers.
///
/// Computing this for every word against every word is expensive, so the scores for
/// the first round (when all words are still possible) are precomputed in parallel
/// at construction. Construct the scorer once per word bank and clone it for each
/// game to reuse that work.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxEntropyScorer {
    possible_words: Vec<Arc<str>>,
    first_entropy_per_word: HashMap<Arc<str>, f64>,
    is_first_round: bool,
}

impl MaxEntropyScorer {
    /// Constructs a `MaxEntropyScorer`. **Be careful, this is expensive to compute!**
    ///
    /// The cost of this function scales in approximately *O*(*n*<sup>2</sup>), where
    /// *n* is the number of words. Once constructed for a given set of words, the
    /// precomputation can be reused by cloning a new version of the scorer for each
    /// game.
    pub fn new(all_words: &[Arc<str>]) -> Result<MaxEntropyScorer, WordleError> {
        if let Some(word) = all_words.first() {
            let word_length = word.chars().count();
            if word_length > MAX_WORD_LENGTH {
                return Err(WordleError::UnsupportedWordLength(word_length));
            }
        }
        let first_entropy_per_word: HashMap<Arc<str>, f64> = all_words
            .par_iter()
            .map(|word| (Arc::clone(word), compute_entropy(word, all_words)))
            .collect();
        Ok(MaxEntropyScorer {
            possible_words: all_words.to_vec(),
            first_entropy_per_word,
            is_first_round: true,
        })
    }
}

/// Computes the entropy of the feedback-pattern partition that guessing `word`
/// induces on `possible_words`.
fn compute_entropy(word: &Arc<str>, possible_words: &[Arc<str>]) -> f64 {
    if possible_words.len() <= 1 {
        return 0.0;
    }
    let mut num_per_pattern: HashMap<CompressedGuessResult, usize> = HashMap::new();
    for possible_objective in possible_words {
        let result = get_result_for_guess(possible_objective.as_ref(), word.as_ref()).unwrap();
        let pattern = CompressedGuessResult::from_results(&result.results).unwrap();
        *num_per_pattern.entry(pattern).or_insert(0) += 1;
    }
    let num_possible_words = possible_words.len() as f64;
    num_per_pattern.into_values().fold(0.0, |entropy, count| {
        let probability = count as f64 / num_possible_words;
        entropy - probability * probability.log2()
    })
}

impl WordScorer for MaxEntropyScorer {
    fn update(
        &mut self,
        _latest_guess: &str,
        _restrictions: &WordRestrictions,
        possible_words: &[Arc<str>],
    ) -> Result<(), WordleError> {
        self.possible_words = possible_words.to_vec();
        self.is_first_round = false;
        Ok(())
    }

    fn score_word(&self, word: &Arc<str>) -> i64 {
        if self.is_first_round {
            if let Some(entropy) = self.first_entropy_per_word.get(word) {
                return (entropy * 1000.0) as i64;
            }
        }
        (compute_entropy(word, &self.possible_words) * 1000.0) as i64
    }
}

/// Scores a guess by how frequently its letters appear in the possible words, both
/// anywhere in a word and at the same position as in the guess.
///
/// Overall letter frequency is weighted twice as heavily as positional frequency,
/// and a repeated letter only collects the overall-frequency portion once, which
/// discourages guesses that spend multiple positions on the same letter. This is far
/// cheaper than [`MaxEntropyScorer`] and usually needs about one guess more.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterFrequencyScorer {
    counter: WordCounter,
}

impl LetterFrequencyScorer {
    /// Constructs a `LetterFrequencyScorer` from the given word list.
    pub fn new<S: AsRef<str>>(all_words: &[S]) -> LetterFrequencyScorer {
        LetterFrequencyScorer {
            counter: WordCounter::new(all_words),
        }
    }
}

impl WordScorer for LetterFrequencyScorer {
    fn update(
        &mut self,
        _latest_guess: &str,
        _restrictions: &WordRestrictions,
        possible_words: &[Arc<str>],
    ) -> Result<(), WordleError> {
        self.counter = WordCounter::new(possible_words);
        Ok(())
    }

    fn score_word(&self, word: &Arc<str>) -> i64 {
        let mut sum = 0;
        for (index, letter) in word.char_indices() {
            sum += self
                .counter
                .num_words_with_located_letter(&LocatedLetter::new(letter, index as u8))
                as i64;
            let is_new_letter = index == 0
                || word
                    .chars()
                    .take(index)
                    .all(|other_letter| other_letter != letter);
            if is_new_letter {
                sum += 2 * self.counter.num_words_with_letter(letter) as i64;
            }
        }
        sum
    }
}
