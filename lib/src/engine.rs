use crate::data::get_possible_words;
use crate::data::WordBank;
use crate::restrictions::WordRestrictions;
use crate::results::get_result_for_guess;
use crate::results::GameResult;
use crate::results::GuessResult;
use crate::results::SessionState;
use crate::results::WordleError;
use crate::scorers::WordScorer;
use dyn_clone::DynClone;
use std::collections::HashSet;
use std::sync::Arc;

/// The standard Wordle guess budget.
pub const DEFAULT_MAX_GUESSES: u32 = 6;

/// Defines which set of words a [`Guesser`] should select its guesses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessFrom {
    /// Only guess words that could still be the objective word.
    PossibleWords,
    /// Guess from any not-yet-guessed word in the guess pool. This may waste a guess
    /// on a word that can't be the objective, but can gather more information.
    AllUnguessedWords,
}

/// Guesses words in response to accumulated feedback.
pub trait Guesser: DynClone {
    /// Updates this guesser with the result of the latest guess.
    fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError>;

    /// Selects the word to guess next, or `None` if no guess is available.
    fn select_next_guess(&self) -> Option<Arc<str>>;

    /// Returns the words that are still possible objectives given the feedback so far.
    fn possible_words(&self) -> &[Arc<str>];
}

dyn_clone::clone_trait_object!(Guesser);

impl Guesser for Box<dyn Guesser> {
    fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError> {
        (**self).update(result)
    }

    fn select_next_guess(&self) -> Option<Arc<str>> {
        (**self).select_next_guess()
    }

    fn possible_words(&self) -> &[Arc<str>] {
        (**self).possible_words()
    }
}

/// A possible guess along with its score against the current possible words.
///
/// Scores are only comparable within a single round; they are recomputed from
/// scratch each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredGuess {
    pub word: Arc<str>,
    pub score: i64,
}

/// A single game's worth of solving state: the accumulated restrictions, the words
/// still possible, and where the game stands.
///
/// Each session exclusively owns its mutable state; the word lists it starts from
/// are shared, immutable references into the [`WordBank`], so any number of
/// sessions can run concurrently against the same bank.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session<S: WordScorer> {
    guess_from: GuessFrom,
    dictionary: Vec<Arc<str>>,
    guess_pool: Vec<Arc<str>>,
    possible_words: Vec<Arc<str>>,
    restrictions: WordRestrictions,
    scorer: S,
    guesses: Vec<Box<str>>,
    max_guesses: u32,
    state: SessionState,
}

impl<S: WordScorer> Session<S> {
    /// Starts a new session where guesses are drawn from the same word bank that the
    /// objective word is drawn from.
    pub fn new(bank: &WordBank, guess_from: GuessFrom, scorer: S, max_guesses: u32) -> Session<S> {
        Session {
            guess_from,
            dictionary: bank.to_vec(),
            guess_pool: bank.to_vec(),
            possible_words: bank.to_vec(),
            restrictions: WordRestrictions::new(bank.word_length()),
            scorer,
            guesses: Vec::new(),
            max_guesses,
            state: SessionState::Initialized,
        }
    }

    /// Starts a new session with a guess pool that differs from the dictionary of
    /// possible objective words, e.g. a larger list of allowed-but-unlikely guesses.
    pub fn with_guess_pool(
        bank: &WordBank,
        guess_pool: &WordBank,
        guess_from: GuessFrom,
        scorer: S,
        max_guesses: u32,
    ) -> Result<Session<S>, WordleError> {
        if guess_pool.word_length() != bank.word_length() {
            return Err(WordleError::InvalidLength {
                expected: bank.word_length(),
                actual: guess_pool.word_length(),
            });
        }
        let mut session = Session::new(bank, guess_from, scorer, max_guesses);
        session.guess_pool = guess_pool.to_vec();
        Ok(session)
    }

    /// The current lifecycle state of this session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The guesses submitted so far, in order.
    pub fn guesses(&self) -> &[Box<str>] {
        &self.guesses
    }

    /// The number of words that are still possible objectives.
    pub fn num_possible_words(&self) -> usize {
        self.possible_words.len()
    }

    /// Selects the best-scoring guesses, at most `n` of them, in descending order of
    /// preference.
    ///
    /// Ties are broken deterministically: a word that could still be the objective
    /// beats one that can't, and the alphabetically first word wins after that.
    pub fn select_top_n_guesses(&self, n: usize) -> Vec<ScoredGuess> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        // With at most one possible word left, scoring can't discriminate further.
        if self.possible_words.len() <= 1 {
            return self
                .possible_words
                .iter()
                .map(|word| ScoredGuess {
                    word: Arc::clone(word),
                    score: 0,
                })
                .collect();
        }
        let possible: HashSet<&str> = self
            .possible_words
            .iter()
            .map(|word| word.as_ref())
            .collect();
        let mut scored: Vec<(i64, bool, &Arc<str>)> = self
            .selection_pool()
            .map(|word| {
                (
                    self.scorer.score_word(word),
                    possible.contains(word.as_ref()),
                    word,
                )
            })
            .collect();
        scored.sort_unstable_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.cmp(b.2))
        });
        scored
            .into_iter()
            .take(n)
            .map(|(score, _, word)| ScoredGuess {
                word: Arc::clone(word),
                score,
            })
            .collect()
    }

    fn selection_pool(&self) -> Box<dyn Iterator<Item = &Arc<str>> + '_> {
        match self.guess_from {
            GuessFrom::PossibleWords => Box::new(self.possible_words.iter()),
            // Once only a couple of possibilities remain, an information-gathering
            // guess can't beat just trying them.
            GuessFrom::AllUnguessedWords if self.possible_words.len() <= 2 => {
                Box::new(self.possible_words.iter())
            }
            GuessFrom::AllUnguessedWords => Box::new(
                self.guess_pool
                    .iter()
                    .filter(|word| !self.guesses.iter().any(|guess| **guess == ***word)),
            ),
        }
    }

    /// Computes the feedback the given guess would receive if `objective` were the
    /// secret word, submits it to this session, and returns it.
    pub fn simulate_secret<'a>(
        &mut self,
        guess: &'a str,
        objective: &str,
    ) -> Result<GuessResult<'a>, WordleError> {
        let result = get_result_for_guess(objective, guess)?;
        self.update(&result)?;
        Ok(result)
    }

    /// Folds one round of feedback into this session and advances its state.
    ///
    /// Length mismatches are rejected with [`WordleError::InvalidLength`] and leave
    /// the session untouched. Inconsistent feedback and an emptied possible-word set
    /// move the session to [`SessionState::Failed`] and also surface the error. Once
    /// the session is in a terminal state, further results are ignored and the
    /// terminal state is returned unchanged.
    pub fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        let word_length = self.restrictions.word_length();
        let guess_length = result.guess.chars().count();
        if guess_length != word_length {
            return Err(WordleError::InvalidLength {
                expected: word_length,
                actual: guess_length,
            });
        }
        if result.results.len() != word_length {
            return Err(WordleError::InvalidLength {
                expected: word_length,
                actual: result.results.len(),
            });
        }

        self.guesses.push(Box::from(result.guess));
        if let Err(err) = self.restrictions.update(result) {
            self.state = SessionState::Failed;
            return Err(err);
        }
        // Always refilter from the full dictionary so one round's filtering mistake
        // can't compound into the next.
        self.possible_words = get_possible_words(&self.restrictions, &self.dictionary);
        if result.is_correct() {
            self.state = SessionState::Solved;
            return Ok(self.state);
        }
        if self.possible_words.is_empty() {
            self.state = SessionState::Failed;
            return Err(WordleError::EmptyCandidateSet);
        }
        self.scorer
            .update(result.guess, &self.restrictions, &self.possible_words)?;
        self.state = if self.guesses.len() as u32 >= self.max_guesses {
            SessionState::Exhausted
        } else {
            SessionState::InProgress
        };
        Ok(self.state)
    }

    /// Selects the single best guess, or `None` if the session is over.
    pub fn select_next_guess(&self) -> Option<Arc<str>> {
        if self.state.is_terminal() {
            return None;
        }
        if self.possible_words.len() <= 1 {
            return self.possible_words.first().map(Arc::clone);
        }
        self.select_top_n_guesses(1)
            .into_iter()
            .next()
            .map(|scored| scored.word)
    }

    /// The words that are still possible objectives given the feedback so far.
    pub fn possible_words(&self) -> &[Arc<str>] {
        &self.possible_words
    }
}

impl<S: WordScorer + Clone> Guesser for Session<S> {
    fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError> {
        Session::update(self, result)
    }

    fn select_next_guess(&self) -> Option<Arc<str>> {
        Session::select_next_guess(self)
    }

    fn possible_words(&self) -> &[Arc<str>] {
        Session::possible_words(self)
    }
}

/// Guesses at random from the possible words that meet the restrictions.
///
/// This is a baseline: every strategy should beat it.
#[derive(Debug, Clone)]
pub struct RandomGuesser {
    dictionary: Vec<Arc<str>>,
    possible_words: Vec<Arc<str>>,
    restrictions: WordRestrictions,
}

impl RandomGuesser {
    pub fn new(bank: &WordBank) -> RandomGuesser {
        RandomGuesser {
            dictionary: bank.to_vec(),
            possible_words: bank.to_vec(),
            restrictions: WordRestrictions::new(bank.word_length()),
        }
    }
}

impl Guesser for RandomGuesser {
    fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError> {
        self.restrictions.update(result)?;
        self.possible_words = get_possible_words(&self.restrictions, &self.dictionary);
        if result.is_correct() {
            return Ok(SessionState::Solved);
        }
        if self.possible_words.is_empty() {
            return Err(WordleError::EmptyCandidateSet);
        }
        Ok(SessionState::InProgress)
    }

    fn select_next_guess(&self) -> Option<Arc<str>> {
        if self.possible_words.is_empty() {
            return None;
        }
        let random: usize = rand::random();
        self.possible_words
            .get(random % self.possible_words.len())
            .map(Arc::clone)
    }

    fn possible_words(&self) -> &[Arc<str>] {
        &self.possible_words
    }
}

/// Suggests guesses from outside the engine, e.g. from a language model or a human
/// kibitzer.
///
/// Advisors see the engine's exact list of possible words and its own choice, so
/// external reasoning is grounded in real solver state rather than a guessed-at
/// word list.
pub trait Advisor: DynClone {
    /// Returns an alternative suggestion, or `None` to defer to the engine.
    fn advise(
        &self,
        possible_words: &[Arc<str>],
        engine_choice: Option<&Arc<str>>,
    ) -> Option<Box<str>>;
}

dyn_clone::clone_trait_object!(Advisor);

/// Wraps a [`Guesser`] so an [`Advisor`] may override its guesses.
///
/// Advice is only accepted if it names a word that could still be the objective;
/// anything else falls back to the inner guesser's deterministic choice, so a
/// misbehaving advisor can slow the solver down but never derail it.
#[derive(Clone)]
pub struct AdvisedGuesser<G: Guesser + Clone> {
    inner: G,
    advisor: Box<dyn Advisor>,
}

impl<G: Guesser + Clone> AdvisedGuesser<G> {
    pub fn new(inner: G, advisor: Box<dyn Advisor>) -> AdvisedGuesser<G> {
        AdvisedGuesser { inner, advisor }
    }
}

impl<G: Guesser + Clone> Guesser for AdvisedGuesser<G> {
    fn update(&mut self, result: &GuessResult) -> Result<SessionState, WordleError> {
        self.inner.update(result)
    }

    fn select_next_guess(&self) -> Option<Arc<str>> {
        let engine_choice = self.inner.select_next_guess();
        if let Some(advice) = self
            .advisor
            .advise(self.inner.possible_words(), engine_choice.as_ref())
        {
            if let Some(word) = self
                .inner
                .possible_words()
                .iter()
                .find(|word| word.as_ref() == advice.as_ref())
            {
                return Some(Arc::clone(word));
            }
        }
        engine_choice
    }

    fn possible_words(&self) -> &[Arc<str>] {
        self.inner.possible_words()
    }
}

/// Attempts to guess the given word within the maximum number of guesses, using the
/// given guesser.
pub fn play_game_with_guesser<G: Guesser>(
    objective: &str,
    max_num_guesses: u32,
    mut guesser: G,
) -> GameResult {
    let mut guesses: Vec<Box<str>> = Vec::new();
    for _ in 1..=max_num_guesses {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            // No possible objectives left is a contradiction; running out of
            // allowed guesses with candidates remaining is just a hard game.
            None if guesser.possible_words().is_empty() => return GameResult::Failed(guesses),
            None => return GameResult::Exhausted(guesses),
        };
        guesses.push(Box::from(guess.as_ref()));
        let result = match get_result_for_guess(objective, guess.as_ref()) {
            Ok(result) => result,
            Err(_) => return GameResult::Failed(guesses),
        };
        if result.is_correct() {
            return GameResult::Solved(guesses);
        }
        match guesser.update(&result) {
            Ok(SessionState::Failed) => return GameResult::Failed(guesses),
            Ok(SessionState::Exhausted) => return GameResult::Exhausted(guesses),
            Ok(_) => {}
            Err(_) => return GameResult::Failed(guesses),
        }
    }
    GameResult::Exhausted(guesses)
}
