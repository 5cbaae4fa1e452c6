use std::collections::HashMap;
use std::fmt;

/// The maximum word length supported by [`CompressedGuessResult`].
pub const MAX_WORD_LENGTH: usize = 10;

/// The result of a given letter at a specific location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterResult {
    Correct,
    PresentNotHere,
    NotPresent,
}

/// Indicates that an error occurred while trying to guess the objective word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordleError {
    /// A guess, feedback, or word didn't have the expected length.
    InvalidLength { expected: usize, actual: usize },
    /// The given `GuessResult`s are impossible due to some inconsistency.
    InconsistentFeedback,
    /// No word in the dictionary is consistent with the accumulated feedback.
    EmptyCandidateSet,
    /// Words of this length can't be used with this solver.
    UnsupportedWordLength(usize),
}

impl fmt::Display for WordleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordleError::InvalidLength { expected, actual } => write!(
                f,
                "expected a length of {} letters but got {}",
                expected, actual
            ),
            WordleError::InconsistentFeedback => {
                write!(f, "the given guess results contradict each other")
            }
            WordleError::EmptyCandidateSet => {
                write!(f, "no word in the dictionary matches the given results")
            }
            WordleError::UnsupportedWordLength(length) => write!(
                f,
                "words of length {} are not supported (max: {})",
                length, MAX_WORD_LENGTH
            ),
        }
    }
}

impl std::error::Error for WordleError {}

/// The result of a single word guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult<'a> {
    pub guess: &'a str,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl<'a> GuessResult<'a> {
    /// Returns `true` iff every letter was marked [`LetterResult::Correct`].
    pub fn is_correct(&self) -> bool {
        self.results
            .iter()
            .all(|result| *result == LetterResult::Correct)
    }
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Letters are resolved in two passes so that duplicated letters in the guess are
/// only marked [`LetterResult::PresentNotHere`] as many times as the letter appears
/// in the objective. For example, guessing "sassy" against the objective "mesas"
/// marks the first two `s`s present and the third one not present.
pub fn get_result_for_guess<'a>(
    objective: &str,
    guess: &'a str,
) -> Result<GuessResult<'a>, WordleError> {
    let objective_letters: Vec<char> = objective.chars().collect();
    let guess_letters: Vec<char> = guess.chars().collect();
    if objective_letters.len() != guess_letters.len() {
        return Err(WordleError::InvalidLength {
            expected: objective_letters.len(),
            actual: guess_letters.len(),
        });
    }

    let mut results = vec![LetterResult::NotPresent; guess_letters.len()];
    let mut unmatched_letters: HashMap<char, u8> = HashMap::new();
    for (index, letter) in objective_letters.iter().enumerate() {
        if guess_letters[index] == *letter {
            results[index] = LetterResult::Correct;
        } else {
            *unmatched_letters.entry(*letter).or_insert(0) += 1;
        }
    }
    for (index, letter) in guess_letters.iter().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some(remaining) = unmatched_letters.get_mut(letter) {
            if *remaining > 0 {
                results[index] = LetterResult::PresentNotHere;
                *remaining -= 1;
            }
        }
    }
    Ok(GuessResult { guess, results })
}

/// A guess result packed into a single integer, usable as a cheap hash key.
///
/// Each letter result takes one base-3 digit, so words of up to
/// [`MAX_WORD_LENGTH`] letters fit in a `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedGuessResult(u16);

impl CompressedGuessResult {
    /// Creates a compressed version of the given letter results.
    ///
    /// Returns [`WordleError::UnsupportedWordLength`] if there are more than
    /// [`MAX_WORD_LENGTH`] results.
    pub fn from_results(results: &[LetterResult]) -> Result<Self, WordleError> {
        if results.len() > MAX_WORD_LENGTH {
            return Err(WordleError::UnsupportedWordLength(results.len()));
        }
        let mut compressed: u16 = 0;
        for result in results.iter().rev() {
            let digit = match result {
                LetterResult::NotPresent => 0,
                LetterResult::PresentNotHere => 1,
                LetterResult::Correct => 2,
            };
            compressed = compressed * 3 + digit;
        }
        Ok(Self(compressed))
    }
}

/// Whether the game was solved, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Solved(Vec<Box<str>>),
    /// Indicates that the guesser used up its guess budget, and provides the guesses
    /// that were given.
    Exhausted(Vec<Box<str>>),
    /// Indicates that the feedback was inconsistent with every word in the word bank,
    /// and provides the guesses that were given. This usually means the objective word
    /// was not in the word bank.
    Failed(Vec<Box<str>>),
}

/// The lifecycle state of a solving session.
///
/// Sessions move from `Initialized` to `InProgress` on the first guess, and end in
/// exactly one of `Solved`, `Exhausted` or `Failed`. Terminal states accept no
/// further guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// No feedback has been received yet; every word in the dictionary is possible.
    Initialized,
    /// At least one round of feedback has been folded in.
    InProgress,
    /// The objective word was confirmed by an all-correct result.
    Solved,
    /// The guess budget was used up without solving.
    Exhausted,
    /// The feedback was inconsistent, or no dictionary word matches it.
    Failed,
}

impl SessionState {
    /// Returns `true` for `Solved`, `Exhausted` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Solved | SessionState::Exhausted | SessionState::Failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_guess_result_distinguishes_results() -> Result<(), WordleError> {
        let all_correct = CompressedGuessResult::from_results(&[LetterResult::Correct; 3])?;
        let all_present = CompressedGuessResult::from_results(&[LetterResult::PresentNotHere; 3])?;
        let mixed = CompressedGuessResult::from_results(&[
            LetterResult::Correct,
            LetterResult::PresentNotHere,
            LetterResult::NotPresent,
        ])?;
        let mixed_reversed = CompressedGuessResult::from_results(&[
            LetterResult::NotPresent,
            LetterResult::PresentNotHere,
            LetterResult::Correct,
        ])?;

        assert_ne!(all_correct, all_present);
        assert_ne!(all_correct, mixed);
        assert_ne!(mixed, mixed_reversed);
        Ok(())
    }

    #[test]
    fn compressed_guess_result_max_length() {
        assert!(
            CompressedGuessResult::from_results(&[LetterResult::Correct; MAX_WORD_LENGTH]).is_ok()
        );
        assert_eq!(
            CompressedGuessResult::from_results(&[LetterResult::Correct; MAX_WORD_LENGTH + 1]),
            Err(WordleError::UnsupportedWordLength(MAX_WORD_LENGTH + 1))
        );
    }
}
