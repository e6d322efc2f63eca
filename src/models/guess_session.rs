use std::{cmp::Ordering, sync::Arc};

use anyhow::{anyhow, Context};

use crate::{
    random::{RandomNumberSource, MAX_NUMBER, MIN_NUMBER},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    Correct,
    TooHigh,
    TooLow,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    NoGuessesYet,
    GuessHigher,
    GuessLower,
    Unparsable,
}

impl HintKind {
    pub fn message(&self) -> Option<&'static str> {
        return match self {
            HintKind::NoGuessesYet => None,
            HintKind::GuessHigher => Some("Try higher..."),
            HintKind::GuessLower => Some("Not that high!"),
            HintKind::Unparsable => Some("I didn't quite get that."),
        };
    }
}

/// The last thing the player typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Number(i32),
    Invalid,
}

/// One player's game. Owned by a single entry in the session store and only
/// ever mutated under that entry's lock.
pub struct GuessSession {
    player_name: String,
    random: Arc<dyn RandomNumberSource>,

    target: Option<i32>,
    guess_count: u32,
    last_outcome: Option<GuessResult>,
    last_guess: Option<Guess>,
}

impl GuessSession {
    pub fn new(player_name: impl Into<String>, random: Arc<dyn RandomNumberSource>) -> Self {
        return Self {
            player_name: player_name.into(),
            random,

            target: None,
            guess_count: 0,
            last_outcome: None,
            last_guess: None,
        };
    }

    pub fn player_name(&self) -> &str {
        return &self.player_name;
    }

    pub fn game_in_progress(&self) -> bool {
        return self.target.is_some();
    }

    /// Draws a fresh target and resets the counter. On failure the session
    /// keeps whatever state it had before.
    pub fn start_game(&mut self) -> Result {
        let number = self
            .random
            .next_number()
            .context("drawing a number for a new game")?;

        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
            return Err(anyhow!(
                "random source returned {number}, outside {MIN_NUMBER}..={MAX_NUMBER}"
            )
            .into());
        }

        self.target = Some(number);
        self.guess_count = 0;
        self.last_outcome = None;
        self.last_guess = None;

        tracing::debug!(player = %self.player_name, target = number, "game started");

        return Ok(());
    }

    /// Unparsable input, including padded numbers like `" 42"`, is not an
    /// error: it counts as a guess with outcome `Invalid`.
    pub fn submit_guess(&mut self, raw_input: &str) -> Result<GuessResult> {
        let Some(target) = self.target else {
            return Err(anyhow!("no game in progress").into());
        };

        self.guess_count += 1;

        let (guess, outcome) = match raw_input.parse::<i32>() {
            Err(_) => (Guess::Invalid, GuessResult::Invalid),
            Ok(n) => {
                let outcome = match n.cmp(&target) {
                    Ordering::Equal => GuessResult::Correct,
                    Ordering::Greater => GuessResult::TooHigh,
                    Ordering::Less => GuessResult::TooLow,
                };
                (Guess::Number(n), outcome)
            }
        };

        self.last_guess = Some(guess);
        self.last_outcome = Some(outcome);

        return Ok(outcome);
    }

    pub fn hint(&self) -> HintKind {
        // `last_outcome` is cleared by `start_game` and set by every
        // `submit_guess`, so it is `None` exactly when `guess_count == 0`.
        return match self.last_outcome {
            None => HintKind::NoGuessesYet,
            Some(GuessResult::Invalid) => HintKind::Unparsable,
            Some(GuessResult::TooHigh) => HintKind::GuessLower,
            // A solved round is shown on the win screen, never with a hint.
            Some(GuessResult::TooLow) | Some(GuessResult::Correct) => HintKind::GuessHigher,
        };
    }

    pub fn guess_count(&self) -> u32 {
        return self.guess_count;
    }

    pub fn is_solved(&self) -> bool {
        return self.last_outcome == Some(GuessResult::Correct);
    }

    pub fn last_guess(&self) -> Option<Guess> {
        return self.last_guess;
    }
}

impl std::fmt::Debug for GuessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuessSession")
            .field("player_name", &self.player_name)
            .field("in_progress", &self.game_in_progress())
            .field("guess_count", &self.guess_count)
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Scripted(Mutex<Vec<i32>>);

    impl Scripted {
        fn new(numbers: &[i32]) -> Arc<Self> {
            let mut numbers = numbers.to_vec();
            numbers.reverse();
            return Arc::new(Self(Mutex::new(numbers)));
        }
    }

    impl RandomNumberSource for Scripted {
        fn next_number(&self) -> anyhow::Result<i32> {
            let next = self.0.lock().unwrap().pop();
            return next.ok_or_else(|| anyhow!("script exhausted"));
        }
    }

    struct Broken;

    impl RandomNumberSource for Broken {
        fn next_number(&self) -> anyhow::Result<i32> {
            return Err(anyhow!("entropy pool empty"));
        }
    }

    fn started(target: i32) -> GuessSession {
        let mut session = GuessSession::new("brindy", Scripted::new(&[target]));
        session.start_game().unwrap();
        return session;
    }

    #[test]
    fn new_session_has_no_game() {
        let session = GuessSession::new("brindy", Scripted::new(&[]));

        assert!(!session.game_in_progress());
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.hint(), HintKind::NoGuessesYet);
        assert_eq!(session.player_name(), "brindy");
    }

    #[test]
    fn start_game_resets_counter() {
        let session = started(42);

        assert!(session.game_in_progress());
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.hint(), HintKind::NoGuessesYet);
    }

    #[test]
    fn scenario_high_low_invalid_correct() {
        let mut session = started(42);

        assert_eq!(session.submit_guess("50").unwrap(), GuessResult::TooHigh);
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.hint(), HintKind::GuessLower);

        assert_eq!(session.submit_guess("10").unwrap(), GuessResult::TooLow);
        assert_eq!(session.guess_count(), 2);
        assert_eq!(session.hint(), HintKind::GuessHigher);

        assert_eq!(session.submit_guess("abc").unwrap(), GuessResult::Invalid);
        assert_eq!(session.guess_count(), 3);
        assert_eq!(session.hint(), HintKind::Unparsable);
        assert_eq!(session.last_guess(), Some(Guess::Invalid));

        assert_eq!(session.submit_guess("42").unwrap(), GuessResult::Correct);
        assert_eq!(session.guess_count(), 4);
        assert!(session.is_solved());
        assert_eq!(session.last_guess(), Some(Guess::Number(42)));
    }

    #[test]
    fn restarting_draws_again_and_resets() {
        let mut session = GuessSession::new("brindy", Scripted::new(&[17, 83]));

        session.start_game().unwrap();
        session.submit_guess("5").unwrap();
        session.submit_guess("6").unwrap();
        assert_eq!(session.submit_guess("17").unwrap(), GuessResult::Correct);

        session.start_game().unwrap();
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.hint(), HintKind::NoGuessesYet);
        assert!(!session.is_solved());
        assert_eq!(session.submit_guess("17").unwrap(), GuessResult::TooLow);
        assert_eq!(session.submit_guess("83").unwrap(), GuessResult::Correct);
    }

    #[test]
    fn start_game_twice_resets_each_time() {
        let mut session = GuessSession::new("brindy", Scripted::new(&[3, 97]));

        session.start_game().unwrap();
        assert_eq!(session.submit_guess("1").unwrap(), GuessResult::TooLow);
        session.start_game().unwrap();
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.submit_guess("50").unwrap(), GuessResult::TooLow);
    }

    #[test]
    fn correct_guess_wins_regardless_of_history() {
        let mut session = started(7);

        for input in ["1", "99", "", "seven", "-3", "8"] {
            assert_ne!(session.submit_guess(input).unwrap(), GuessResult::Correct);
        }

        assert_eq!(session.submit_guess("7").unwrap(), GuessResult::Correct);
        assert_eq!(session.guess_count(), 7);
    }

    #[test]
    fn count_matches_number_of_submissions() {
        let mut session = started(60);
        let inputs = ["10", "x", "70", "60", "2147483648", "-61", "0"];

        for (i, input) in inputs.iter().enumerate() {
            session.submit_guess(input).unwrap();
            assert_eq!(session.guess_count(), i as u32 + 1);
        }
    }

    #[test]
    fn padded_and_overflowing_input_is_invalid() {
        let mut session = started(60);

        assert_eq!(session.submit_guess(" 60\n").unwrap(), GuessResult::Invalid);
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.hint(), HintKind::Unparsable);

        assert_eq!(session.submit_guess(" 42 ").unwrap(), GuessResult::Invalid);
        assert_eq!(session.guess_count(), 2);

        assert_eq!(
            session.submit_guess("99999999999").unwrap(),
            GuessResult::Invalid
        );
        assert_eq!(session.guess_count(), 3);
        assert!(!session.is_solved());
    }

    #[test]
    fn hint_and_count_are_idempotent() {
        let mut session = started(30);
        session.submit_guess("31").unwrap();

        assert_eq!(session.hint(), session.hint());
        assert_eq!(session.guess_count(), session.guess_count());
        assert_eq!(session.guess_count(), 1);
    }

    #[test]
    fn guess_without_game_is_rejected() {
        let mut session = GuessSession::new("brindy", Scripted::new(&[]));

        assert!(session.submit_guess("5").is_err());
        assert_eq!(session.guess_count(), 0);
    }

    #[test]
    fn source_failure_propagates_and_keeps_state() {
        let mut session = GuessSession::new("brindy", Arc::new(Broken));

        assert!(session.start_game().is_err());
        assert!(!session.game_in_progress());
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        let mut session = GuessSession::new("brindy", Scripted::new(&[20, 101]));
        session.start_game().unwrap();
        session.submit_guess("3").unwrap();

        assert!(session.start_game().is_err());
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.submit_guess("20").unwrap(), GuessResult::Correct);
    }
}
