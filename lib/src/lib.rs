//! Solves Wordle-style games by tracking letter restrictions and scoring guesses
//! against the words that are still possible.

mod data;
mod engine;
mod restrictions;
mod results;
pub mod scorers;

pub use data::*;
pub use engine::*;
pub use restrictions::WordRestrictions;
pub use results::*;
