//! Cooperative, cancellable auto-guess loop.
//!
//! The scheduler repeatedly draws uniform nonce candidates, feeds them
//! through the session and yields between iterations so the surrounding
//! interface stays responsive.  Iterations are strictly sequential: the
//! loop holds an exclusive borrow of the session, so there is never more
//! than one outstanding guess and manual input cannot interleave while
//! it runs.  A [`StopToken`] is checked before every iteration; an
//! iteration already past its digest await may still land its result,
//! but no new iteration starts once a stop request is observed.

use crate::digest::DigestCapability;
use crate::session::{GameSession, GuessError, MAX_NONCE};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable cancellation handle shared between the loop and its owner.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// Creates a token in the not-stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.  Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Summary of one auto-guess run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoGuessReport {
    /// Guesses recorded during this run.
    pub guesses_made: u64,
    /// Whether the session was won when the run ended.
    pub won: bool,
    /// Whether the run ended because the token was stopped.
    pub stopped: bool,
}

/// The auto-guess scheduler configuration.
#[derive(Debug, Clone)]
pub struct AutoGuesser {
    delay: Duration,
    max_guesses: Option<u64>,
}

impl Default for AutoGuesser {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1),
            max_guesses: None,
        }
    }
}

impl AutoGuesser {
    /// Creates a scheduler with the default 1 ms inter-iteration yield
    /// and no guess budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the inter-iteration delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Caps the number of guesses made by a single run.
    pub fn with_max_guesses(mut self, max_guesses: u64) -> Self {
        self.max_guesses = Some(max_guesses);
        self
    }

    /// Runs the loop until a win, a stop request, a digest failure or
    /// the guess budget.
    ///
    /// Each iteration draws a uniform nonce in `[0, MAX_NONCE]`,
    /// submits it, then sleeps for the configured delay before checking
    /// the token again.  A digest failure aborts the run with the error
    /// and leaves the failed guess unrecorded.
    pub async fn run(
        &self,
        session: &mut GameSession,
        capability: &impl DigestCapability,
        token: &StopToken,
    ) -> Result<AutoGuessReport, GuessError> {
        let mut rng = rand::thread_rng();
        let mut guesses_made = 0u64;
        while !token.is_stopped() && !session.won() {
            if self.max_guesses.is_some_and(|limit| guesses_made >= limit) {
                break;
            }
            let nonce = rng.gen_range(0..=MAX_NONCE);
            let outcome = session.submit_guess(nonce, capability)?;
            guesses_made += 1;
            if outcome.won {
                break;
            }
            tokio::time::sleep(self.delay).await;
        }
        Ok(AutoGuessReport {
            guesses_made,
            won: session.won(),
            stopped: token.is_stopped(),
        })
    }
}
