use clap::{ArgEnum, Parser, Subcommand};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io;
use std::time::Instant;
use wordle_engine::scorers::{LetterFrequencyScorer, MaxEntropyScorer};
use wordle_engine::*;

/// Runs a Wordle game in reverse, where the computer guesses the word.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// The length of words to solve for. Words of any other length in the words file
    /// are skipped.
    #[clap(short = 'l', long, default_value_t = 5)]
    word_length: usize,

    /// The maximum number of guesses allowed per game.
    #[clap(short = 'g', long, default_value_t = DEFAULT_MAX_GUESSES)]
    max_guesses: u32,

    /// How to score potential guesses.
    #[clap(short = 's', long, arg_enum, default_value = "entropy")]
    scorer: ScorerChoice,

    /// If set, only guesses words that could still be the objective, rather than
    /// information-gathering words.
    #[clap(long)]
    guess_only_possible_words: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ArgEnum)]
enum ScorerChoice {
    /// Maximize the Shannon entropy of the feedback. Slowest but fewest guesses.
    Entropy,
    /// Prefer letters that are common in the remaining words.
    Frequency,
    /// Guess at random from the remaining words. A baseline.
    Random,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark the solver against every word in the given words file.
    Benchmark,
    /// Run a single game with the given word.
    Single { word: String },
    /// Run a single game with a randomly chosen word from the words file.
    Random,
    /// Run an interactive game against the solver.
    Interactive,
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let args = Args::parse();
    println!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader, args.word_length)?;
    println!("There are {} possible words.", word_bank.len());

    let guesser = create_guesser(&args, &word_bank)?;
    match args.command {
        Command::Benchmark => run_benchmark(&word_bank, args.max_guesses, guesser),
        Command::Single { word } => play_single_game(&word, args.max_guesses, guesser),
        Command::Random => {
            let word = word_bank
                .random_word()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty word list"))?;
            println!("The objective word is: {}", word);
            play_single_game(&word, args.max_guesses, guesser);
        }
        Command::Interactive => play_interactive_game(args.max_guesses, guesser)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn create_guesser(args: &Args, word_bank: &WordBank) -> Result<Box<dyn Guesser>, WordleError> {
    let guess_from = if args.guess_only_possible_words {
        GuessFrom::PossibleWords
    } else {
        GuessFrom::AllUnguessedWords
    };
    match args.scorer {
        ScorerChoice::Entropy => Ok(Box::new(Session::new(
            word_bank,
            guess_from,
            MaxEntropyScorer::new(word_bank)?,
            args.max_guesses,
        ))),
        ScorerChoice::Frequency => Ok(Box::new(Session::new(
            word_bank,
            guess_from,
            LetterFrequencyScorer::new(word_bank),
            args.max_guesses,
        ))),
        ScorerChoice::Random => Ok(Box::new(RandomGuesser::new(word_bank))),
    }
}

fn run_benchmark(word_bank: &WordBank, max_guesses: u32, guesser: Box<dyn Guesser>) {
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut num_unsolved: u32 = 0;
    for word in word_bank.iter() {
        match play_game_with_guesser(word, max_guesses, guesser.clone()) {
            GameResult::Solved(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            GameResult::Exhausted(_) | GameResult::Failed(_) => num_unsolved += 1,
        }
    }
    println!(
        "Solved {} out of {} words. Results:",
        num_guesses_per_game.len(),
        word_bank.len()
    );

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds: Vec<u32> = num_games_per_round.keys().copied().collect();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!(
            "|{}|{}|",
            num_round,
            num_games_per_round.get(num_round).unwrap()
        );
    }
    if num_unsolved > 0 {
        println!("|unsolved|{}|", num_unsolved);
    }

    if num_guesses_per_game.is_empty() {
        return;
    }
    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
}

fn play_single_game(word: &str, max_guesses: u32, guesser: Box<dyn Guesser>) {
    match play_game_with_guesser(word, max_guesses, guesser) {
        GameResult::Solved(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Exhausted(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failed(_) => {
            eprintln!("Error: given word not in the word list.");
            std::process::exit(1);
        }
    }
}

fn play_interactive_game(max_guesses: u32, mut guesser: Box<dyn Guesser>) -> io::Result<()> {
    println!("Choose a word from the word-list. Press enter once you've chosen.");

    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }

    println!(
        "I will now try to guess your word.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\""
    );

    for round in 1..=max_guesses {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            None => break,
        };
        println!("I'm guessing: {}. How did I do?", guess);

        let mut result = read_result_for_guess(guess.as_ref());
        while result.is_err() {
            println!("{}", result.unwrap_err());
            result = read_result_for_guess(guess.as_ref());
        }
        let result = result.unwrap();

        if result.is_correct() {
            println!("I did it! It took me {} guesses.", round);
            return Ok(());
        }

        match guesser.update(&result) {
            Ok(SessionState::Failed) | Err(WordleError::EmptyCandidateSet) => {
                println!("That word isn't in my word list :(");
                return Ok(());
            }
            Ok(_) => {}
            Err(err) => {
                println!("Something went wrong: {}", err);
                return Ok(());
            }
        }
    }

    println!("I couldn't guess it :(");

    Ok(())
}

fn read_result_for_guess(guess: &str) -> io::Result<GuessResult> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    let input = buffer.trim();

    if guess.chars().count() != input.chars().count() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Input {} didn't match the length of my guess. Try again.",
                input
            ),
        ));
    }

    Ok(GuessResult {
        guess,
        results: input
            .chars()
            .map(|letter| match letter {
                '.' => Ok(LetterResult::NotPresent),
                'y' => Ok(LetterResult::PresentNotHere),
                'g' => Ok(LetterResult::Correct),
                _ => Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Must enter only the letters '.', 'y', or 'g'. Try again.",
                )),
            })
            .collect::<io::Result<Vec<LetterResult>>>()?,
    })
}
