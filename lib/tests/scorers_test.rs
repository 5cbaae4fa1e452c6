#[macro_use]
extern crate assert_matches;

use std::result::Result;
use std::sync::Arc;
use wordle_engine::scorers::*;
use wordle_engine::*;

macro_rules! test_scorer {
    ($construct_scorer_from_bank_fn:ident) => {
        #[test]
        fn solve_wordle() -> Result<(), WordleError> {
            let bank = WordBank::from_iterator(vec![
                "alpha", "allot", "begot", "below", "endow", "ingot",
            ])?;
            let scorer = $construct_scorer_from_bank_fn(&bank);
            let session = Session::new(
                &bank,
                GuessFrom::AllUnguessedWords,
                scorer,
                DEFAULT_MAX_GUESSES,
            );

            let result = play_game_with_guesser("alpha", bank.len() as u32, session);

            assert_matches!(result, GameResult::Solved(_guesses));
            Ok(())
        }

        #[test]
        fn try_solve_unknown_word() -> Result<(), WordleError> {
            let bank = WordBank::from_iterator(vec![
                "alpha", "allot", "begot", "below", "endow", "ingot",
            ])?;
            let scorer = $construct_scorer_from_bank_fn(&bank);
            let session = Session::new(
                &bank,
                GuessFrom::AllUnguessedWords,
                scorer,
                bank.len() as u32,
            );

            let result = play_game_with_guesser("other", bank.len() as u32, session);

            assert_matches!(result, GameResult::Failed(_guesses));
            Ok(())
        }
    };
}

mod max_entropy_scorer {

    use super::*;

    fn create_scorer(bank: &WordBank) -> MaxEntropyScorer {
        MaxEntropyScorer::new(bank).unwrap()
    }

    test_scorer!(create_scorer);

    #[test]
    fn score_word_first_round() {
        let possible_words: Vec<Arc<str>> =
            vec![Arc::from("cod"), Arc::from("wod"), Arc::from("mod")];
        let scorer = MaxEntropyScorer::new(&possible_words).unwrap();

        // "cod" splits the words into groups of 1 and 2:
        // -(1/3)*log2(1/3) - (2/3)*log2(2/3) ~= 0.918.
        assert_eq!(scorer.score_word(&possible_words[0]), 918);
        // "mwc" gives every word a distinct pattern: log2(3) ~= 1.585.
        assert_eq!(scorer.score_word(&Arc::from("mwc")), 1584);
        // "zzz" gives every word the same pattern.
        assert_eq!(scorer.score_word(&Arc::from("zzz")), 0);
    }

    #[test]
    fn score_word_after_update() -> Result<(), WordleError> {
        let possible_words: Vec<Arc<str>> = vec![
            Arc::from("abb"),
            Arc::from("abc"),
            Arc::from("bad"),
            Arc::from("zza"),
            Arc::from("zzz"),
        ];
        let mut scorer = MaxEntropyScorer::new(&possible_words).unwrap();

        let restrictions = WordRestrictions::from_result(&GuessResult {
            guess: "zza",
            results: vec![
                LetterResult::NotPresent,
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
            ],
        })?;
        scorer.update("zza", &restrictions, &possible_words[0..3])?;
        // Still possible: abb, abc, bad

        // "abb" gives each remaining word a distinct pattern.
        assert_eq!(scorer.score_word(&possible_words[0]), 1584);
        // So does "abc".
        assert_eq!(scorer.score_word(&possible_words[1]), 1584);
        // "zzz" can no longer distinguish anything.
        assert_eq!(scorer.score_word(&possible_words[4]), 0);
        Ok(())
    }

    #[test]
    fn unsupported_word_length() {
        let too_long: Vec<Arc<str>> = vec![Arc::from("abcdefghijk")];

        assert_matches!(
            MaxEntropyScorer::new(&too_long),
            Err(WordleError::UnsupportedWordLength(11))
        );
    }

    #[test]
    fn cloned_scorer_reuses_precomputation() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(vec![
            "alpha", "allot", "begot", "below", "endow", "ingot",
        ])?;
        let scorer = MaxEntropyScorer::new(&bank)?;

        for objective in ["allot", "endow"] {
            let session = Session::new(
                &bank,
                GuessFrom::AllUnguessedWords,
                scorer.clone(),
                DEFAULT_MAX_GUESSES,
            );
            let result = play_game_with_guesser(objective, DEFAULT_MAX_GUESSES, session);
            assert_matches!(result, GameResult::Solved(_));
        }
        Ok(())
    }
}

mod letter_frequency_scorer {

    use super::*;

    fn create_scorer(bank: &WordBank) -> LetterFrequencyScorer {
        LetterFrequencyScorer::new(bank)
    }

    test_scorer!(create_scorer);

    #[test]
    fn score_word() -> Result<(), WordleError> {
        let bank =
            WordBank::from_iterator(vec!["alpha", "allot", "begot", "below", "endow", "ingot"])?;
        let scorer = LetterFrequencyScorer::new(&bank);

        // Positional counts plus twice the per-word letter counts; the repeated 'a'
        // only collects the positional portion.
        assert_eq!(
            scorer.score_word(&Arc::from("alpha")),
            (2 + 2 + 1 + 1 + 1) + 2 * (2 + 3 + 1 + 1)
        );
        // 'l' appears twice: only its first occurrence collects the overall count.
        assert_eq!(
            scorer.score_word(&Arc::from("allot")),
            (2 + 2 + 2 + 5 + 3) + 2 * (2 + 3 + 5 + 3)
        );
        Ok(())
    }

    #[test]
    fn score_word_after_update() -> Result<(), WordleError> {
        let bank =
            WordBank::from_iterator(vec!["alpha", "allot", "begot", "below", "endow", "ingot"])?;
        let mut scorer = LetterFrequencyScorer::new(&bank);

        let restrictions = WordRestrictions::from_result(&GuessResult {
            guess: "begot",
            results: vec![
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::Correct,
                LetterResult::NotPresent,
            ],
        })?;
        scorer.update("begot", &restrictions, &[Arc::from("endow")])?;
        // Remaining possible words: 'endow'

        assert_eq!(scorer.score_word(&Arc::from("endow")), 5 + 2 * 5);
        assert_eq!(scorer.score_word(&Arc::from("alpha")), 0);
        Ok(())
    }
}
