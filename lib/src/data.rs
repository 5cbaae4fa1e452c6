use crate::restrictions::WordRestrictions;
use crate::results::WordleError;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::io;
use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

/// A letter along with its location in the word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocatedLetter {
    pub letter: char,
    /// The zero-based location (i.e. index) for this letter in a word.
    pub location: u8,
}

impl LocatedLetter {
    pub fn new(letter: char, location: u8) -> LocatedLetter {
        LocatedLetter { letter, location }
    }
}

/// Contains all the possible words for a Wordle-style game.
///
/// All words have the same length, and the bank is never modified after
/// construction, so it can be shared freely between concurrent solving sessions.
#[derive(Debug, Clone)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is converted to
    /// lower case, and words whose length differs from `word_length` are skipped.
    pub fn from_reader<R: BufRead>(word_reader: R, word_length: usize) -> io::Result<Self> {
        Ok(WordBank {
            all_words: word_reader
                .lines()
                .filter_map(|maybe_word| {
                    maybe_word
                        .map(|word| {
                            if word.chars().count() != word_length {
                                return None;
                            }
                            Some(Arc::from(word.to_lowercase().as_str()))
                        })
                        .transpose()
                })
                .collect::<io::Result<Vec<Arc<str>>>>()?,
            word_length,
        })
    }

    /// Constructs a new `WordBank` from the given words.
    ///
    /// Each word is converted to lower case, and empty words are skipped. The word
    /// length is inferred from the first non-empty word; any word with a different
    /// length fails with [`WordleError::InvalidLength`].
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let all_words = words
            .into_iter()
            .filter(|word| !word.as_ref().is_empty())
            .map(|word| {
                let length = word.as_ref().chars().count();
                if word_length == 0 {
                    word_length = length;
                } else if length != word_length {
                    return Err(WordleError::InvalidLength {
                        expected: word_length,
                        actual: length,
                    });
                }
                Ok(Arc::from(word.as_ref().to_lowercase().as_str()))
            })
            .collect::<Result<Vec<Arc<str>>, WordleError>>()?;
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of each word in the bank.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Chooses a word from the bank at random, e.g. to serve as the objective of a
    /// simulated game.
    pub fn random_word(&self) -> Option<Arc<str>> {
        self.all_words
            .choose(&mut rand::thread_rng())
            .map(Arc::clone)
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Gets the list of words that meet the given restrictions.
///
/// This is a pure function of its inputs. It is recomputed from the full word list
/// after every round rather than patched incrementally, which keeps filtering
/// errors from compounding across rounds.
pub fn get_possible_words(restrictions: &WordRestrictions, words: &[Arc<str>]) -> Vec<Arc<str>> {
    words
        .iter()
        .filter_map(|word| {
            if restrictions.is_satisfied_by(word) {
                return Some(Arc::clone(word));
            }
            None
        })
        .collect()
}

/// Counts the number of words that contain each letter, both anywhere in the word
/// and at each specific location.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordCounter {
    num_words_by_ll: HashMap<LocatedLetter, u32>,
    num_words_by_letter: HashMap<char, u32>,
}

impl WordCounter {
    /// Creates a new word counter based on the given word list.
    pub fn new<S: AsRef<str>>(words: &[S]) -> WordCounter {
        let mut num_words_by_ll: HashMap<LocatedLetter, u32> = HashMap::new();
        let mut num_words_by_letter: HashMap<char, u32> = HashMap::new();
        for word in words {
            let word = word.as_ref();
            for (index, letter) in word.char_indices() {
                *num_words_by_ll
                    .entry(LocatedLetter::new(letter, index as u8))
                    .or_insert(0) += 1;
                if index == 0
                    || word
                        .chars()
                        .take(index)
                        .all(|other_letter| other_letter != letter)
                {
                    *num_words_by_letter.entry(letter).or_insert(0) += 1;
                }
            }
        }
        WordCounter {
            num_words_by_ll,
            num_words_by_letter,
        }
    }

    /// Retrieves the count of words with the given letter at the given location.
    pub fn num_words_with_located_letter(&self, ll: &LocatedLetter) -> u32 {
        *self.num_words_by_ll.get(ll).unwrap_or(&0)
    }

    /// Retrieves the count of words that contain the given letter.
    pub fn num_words_with_letter(&self, letter: char) -> u32 {
        *self.num_words_by_letter.get(&letter).unwrap_or(&0)
    }
}
