use crate::results::GuessResult;
use crate::results::LetterResult;
use crate::results::WordleError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::iter::zip;
use std::result::Result;

/// Defines letter restrictions that a word must adhere to.
///
/// Restrictions accumulate across guesses and only ever tighten: a required letter
/// is never forgotten, an excluded letter is never re-allowed, minimum counts only
/// rise and maximum counts only fall. Feedback that contradicts previously
/// accumulated evidence fails with [`WordleError::InconsistentFeedback`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordRestrictions {
    word_length: usize,
    /// The letter that must appear at each location, where known.
    required_letters: Vec<Option<char>>,
    /// Letters known not to appear at each location.
    excluded_letters: Vec<HashSet<char>>,
    /// The minimum number of times each letter must appear in the word.
    min_count_by_letter: HashMap<char, u8>,
    /// The maximum number of times each letter may appear in the word.
    max_count_by_letter: HashMap<char, u8>,
}

impl WordRestrictions {
    /// Creates a `WordRestrictions` object for the given word length with all letters
    /// unknown.
    pub fn new(word_length: usize) -> WordRestrictions {
        WordRestrictions {
            word_length,
            required_letters: vec![None; word_length],
            excluded_letters: vec![HashSet::new(); word_length],
            min_count_by_letter: HashMap::new(),
            max_count_by_letter: HashMap::new(),
        }
    }

    /// Returns the restrictions imposed by the given result.
    pub fn from_result(result: &GuessResult) -> Result<WordRestrictions, WordleError> {
        let mut restrictions = WordRestrictions::new(result.guess.chars().count());
        restrictions.update(result)?;
        Ok(restrictions)
    }

    /// Returns the length of words these restrictions apply to.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Clears all accumulated restrictions, as at the start of a new game.
    pub fn reset(&mut self) {
        *self = WordRestrictions::new(self.word_length);
    }

    /// Adds restrictions arising from the given guess result.
    ///
    /// Each letter's evidence is interpreted in the context of the whole guess: a
    /// `NotPresent` result for a letter that also received `Correct` or
    /// `PresentNotHere` elsewhere in the same guess caps the letter's count at the
    /// number of those other occurrences, rather than excluding it entirely.
    pub fn update(&mut self, guess_result: &GuessResult) -> Result<(), WordleError> {
        let guess_letters: Vec<char> = guess_result.guess.chars().collect();
        if guess_letters.len() != self.word_length {
            return Err(WordleError::InvalidLength {
                expected: self.word_length,
                actual: guess_letters.len(),
            });
        }
        if guess_result.results.len() != guess_letters.len() {
            return Err(WordleError::InvalidLength {
                expected: guess_letters.len(),
                actual: guess_result.results.len(),
            });
        }

        let mut num_times_present: HashMap<char, u8> = HashMap::new();
        for (letter, result) in zip(guess_letters.iter(), guess_result.results.iter()) {
            if *result != LetterResult::NotPresent {
                *num_times_present.entry(*letter).or_insert(0) += 1;
            }
        }

        for (index, (letter, result)) in
            zip(guess_letters.iter(), guess_result.results.iter()).enumerate()
        {
            match result {
                LetterResult::Correct => {
                    if self
                        .required_letters[index]
                        .map_or(false, |required| required != *letter)
                        || self.excluded_letters[index].contains(letter)
                    {
                        return Err(WordleError::InconsistentFeedback);
                    }
                    self.required_letters[index] = Some(*letter);
                }
                LetterResult::PresentNotHere => {
                    if self.required_letters[index] == Some(*letter) {
                        return Err(WordleError::InconsistentFeedback);
                    }
                    self.excluded_letters[index].insert(*letter);
                }
                LetterResult::NotPresent => {
                    if self.required_letters[index] == Some(*letter) {
                        return Err(WordleError::InconsistentFeedback);
                    }
                    self.excluded_letters[index].insert(*letter);
                    let num_present = num_times_present.get(letter).copied().unwrap_or(0);
                    let max_count = self
                        .max_count_by_letter
                        .entry(*letter)
                        .or_insert(self.word_length as u8);
                    if num_present < *max_count {
                        *max_count = num_present;
                    }
                }
            }
        }

        for (letter, count) in num_times_present {
            let min_count = self.min_count_by_letter.entry(letter).or_insert(0);
            if count > *min_count {
                *min_count = count;
            }
        }

        for (letter, min_count) in &self.min_count_by_letter {
            let max_count = self
                .max_count_by_letter
                .get(letter)
                .copied()
                .unwrap_or(self.word_length as u8);
            if *min_count > max_count {
                return Err(WordleError::InconsistentFeedback);
            }
        }
        Ok(())
    }

    /// Returns `true` iff the given word satisfies these restrictions.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        let mut letter_counts: HashMap<char, u8> = HashMap::new();
        let mut length = 0;
        for (index, letter) in word.chars().enumerate() {
            if index >= self.word_length {
                return false;
            }
            if self.required_letters[index].map_or(false, |required| required != letter) {
                return false;
            }
            if self.excluded_letters[index].contains(&letter) {
                return false;
            }
            *letter_counts.entry(letter).or_insert(0) += 1;
            length += 1;
        }
        if length != self.word_length {
            return false;
        }
        self.min_count_by_letter.iter().all(|(letter, min_count)| {
            letter_counts.get(letter).copied().unwrap_or(0) >= *min_count
        }) && self.max_count_by_letter.iter().all(|(letter, max_count)| {
            letter_counts.get(letter).copied().unwrap_or(0) <= *max_count
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_satisfied_by_no_restrictions() {
        let restrictions = WordRestrictions::new(4);

        assert!(restrictions.is_satisfied_by("abcd"));
        assert!(restrictions.is_satisfied_by("zzzz"));

        // Wrong length
        assert!(!restrictions.is_satisfied_by(""));
        assert!(!restrictions.is_satisfied_by("abcde"));
    }

    #[test]
    fn is_satisfied_by_with_restrictions() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);

        restrictions.update(&GuessResult {
            guess: "abbc",
            results: vec![
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::Correct,
                LetterResult::NotPresent,
            ],
        })?;

        assert!(restrictions.is_satisfied_by("bdba"));
        assert!(restrictions.is_satisfied_by("dabb"));

        assert!(!restrictions.is_satisfied_by("bbba"));
        assert!(!restrictions.is_satisfied_by("bcba"));
        assert!(!restrictions.is_satisfied_by("adbd"));
        assert!(!restrictions.is_satisfied_by("bdbd"));
        Ok(())
    }

    #[test]
    fn is_satisfied_by_with_capped_count() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);

        // The guess has two 'b's but only one was scored, so the word has exactly
        // one 'b'.
        restrictions.update(&GuessResult {
            guess: "abbc",
            results: vec![
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::Correct,
                LetterResult::NotPresent,
            ],
        })?;

        assert!(restrictions.is_satisfied_by("edba"));
        assert!(restrictions.is_satisfied_by("dabe"));
        assert!(restrictions.is_satisfied_by("daba"));

        assert!(!restrictions.is_satisfied_by("bdba"));
        assert!(!restrictions.is_satisfied_by("dcba"));
        assert!(!restrictions.is_satisfied_by("adbd"));
        Ok(())
    }

    #[test]
    fn update_is_idempotent() -> Result<(), WordleError> {
        let result = GuessResult {
            guess: "abbc",
            results: vec![
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::Correct,
                LetterResult::NotPresent,
            ],
        };
        let mut restrictions = WordRestrictions::from_result(&result)?;
        let once = restrictions.clone();

        restrictions.update(&result)?;

        assert_eq!(restrictions, once);
        Ok(())
    }

    #[test]
    fn update_wrong_length_errors() {
        let mut restrictions = WordRestrictions::new(4);

        assert_eq!(
            restrictions.update(&GuessResult {
                guess: "abc",
                results: vec![LetterResult::Correct; 3],
            }),
            Err(WordleError::InvalidLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            restrictions.update(&GuessResult {
                guess: "abcd",
                results: vec![LetterResult::Correct; 3],
            }),
            Err(WordleError::InvalidLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn update_conflicting_required_letter_errors() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);
        restrictions.update(&GuessResult {
            guess: "abcd",
            results: vec![
                LetterResult::Correct,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
            ],
        })?;

        assert_eq!(
            restrictions.update(&GuessResult {
                guess: "ebcd",
                results: vec![
                    LetterResult::Correct,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                ],
            }),
            Err(WordleError::InconsistentFeedback)
        );
        Ok(())
    }

    #[test]
    fn update_not_present_after_correct_errors() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);
        restrictions.update(&GuessResult {
            guess: "abcd",
            results: vec![
                LetterResult::Correct,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
            ],
        })?;

        assert_eq!(
            restrictions.update(&GuessResult {
                guess: "aeee",
                results: vec![
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                ],
            }),
            Err(WordleError::InconsistentFeedback)
        );
        Ok(())
    }

    #[test]
    fn update_min_count_above_max_count_errors() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);
        // Two 'a's scored present.
        restrictions.update(&GuessResult {
            guess: "aabc",
            results: vec![
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
            ],
        })?;

        // Now 'a' claims to be entirely absent.
        assert_eq!(
            restrictions.update(&GuessResult {
                guess: "adef",
                results: vec![
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                    LetterResult::NotPresent,
                ],
            }),
            Err(WordleError::InconsistentFeedback)
        );
        Ok(())
    }

    #[test]
    fn reset_clears_all_evidence() -> Result<(), WordleError> {
        let mut restrictions = WordRestrictions::new(4);
        restrictions.update(&GuessResult {
            guess: "abbc",
            results: vec![
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::Correct,
                LetterResult::NotPresent,
            ],
        })?;
        assert!(!restrictions.is_satisfied_by("zzzz"));

        restrictions.reset();

        assert_eq!(restrictions, WordRestrictions::new(4));
        assert!(restrictions.is_satisfied_by("zzzz"));
        Ok(())
    }
}
