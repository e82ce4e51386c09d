use crate::error::{ReducerError, SessionError};
use crate::reducer::{reduce, TypingEvent};
use crate::score::ScoreResult;
use crate::text::SessionText;
use crate::words::TextSource;
use std::fmt;

/// Lifecycle of one timed attempt.
///
/// Idle -> Running on the first keystroke, Running -> Expired when the clock
/// hits zero, Expired -> Idle on play-again. Ticks and keystrokes outside
/// Running are inert, so nothing left over from a previous session can touch
/// a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Expired,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Running => write!(f, "running"),
            Phase::Expired => write!(f, "expired"),
        }
    }
}

/// Horizontal advance applied per correct keystroke; the view consumes it.
pub const SCROLL_STEP: u16 = 1;

/// One timed typing attempt: the generated text, the countdown, and the
/// running speed counter. Exclusively owned by the controller; replaced
/// wholesale on play-again.
#[derive(Debug)]
pub struct Session {
    text: SessionText,
    phase: Phase,
    pub seconds_remaining: u64,
    pub input_cursor: usize,
    pub scroll_offset: u16,
    speed: u32,
    duration_secs: u64,
    number_of_words: usize,
    result: Option<ScoreResult>,
}

impl Session {
    pub fn new(source: &dyn TextSource, number_of_words: usize, duration_secs: u64) -> Self {
        let text = SessionText::from_words(&source.generate(number_of_words));
        Self {
            text,
            phase: Phase::Idle,
            seconds_remaining: duration_secs,
            input_cursor: 0,
            scroll_offset: 0,
            speed: 0,
            duration_secs,
            number_of_words,
            result: None,
        }
    }

    pub fn text(&self) -> &SessionText {
        &self.text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Space-count accumulated so far; the session's words-per-minute proxy.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn result(&self) -> Option<ScoreResult> {
        self.result
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn has_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Keystroke dispatcher.
    ///
    /// An index outside the text is a fail-soft no-op: no cell changes, no
    /// counter moves, nothing panics. Otherwise the first keystroke starts
    /// the clock, the cell at `index` is marked attempted and then scored
    /// against its expected letter, and the cursor advances. A space bumps
    /// the speed counter whether or not it matched; the scroll offset moves
    /// only on a correct match.
    pub fn on_key(&mut self, key: char, index: usize) {
        if self.phase == Phase::Expired || index >= self.text.len() {
            return;
        }
        if self.phase == Phase::Idle {
            if self.seconds_remaining == 0 {
                return;
            }
            self.phase = Phase::Running;
        }
        if key == ' ' {
            self.speed += 1;
        }

        let is_correct = self.text.letter(index) == Some(key);
        let outcome = if is_correct {
            TypingEvent::Correct(index)
        } else {
            TypingEvent::Incorrect(index)
        };
        match reduce(&self.text, TypingEvent::Attempted(index))
            .and_then(|text| reduce(&text, outcome))
        {
            Ok(next) => {
                self.text = next;
                self.input_cursor = index + 1;
                if is_correct {
                    self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
                }
            }
            // Guarded above; kept fail-soft rather than asserted.
            Err(ReducerError::IndexOutOfRange { .. }) => {}
        }
    }

    /// One-second countdown tick. Inert outside Running; finalizes exactly
    /// once when the clock reaches zero, after which further ticks are
    /// no-ops until the next restart.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.phase = Phase::Expired;
            self.result = Some(ScoreResult::from_text(&self.text, self.speed));
        }
    }

    /// Final score of an expired session.
    pub fn finalize(&self) -> Result<ScoreResult, SessionError> {
        match (self.phase, self.result) {
            (Phase::Expired, Some(result)) => Ok(result),
            _ => Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "finalize",
            }),
        }
    }

    /// Play-again: fresh text of the configured length, full clock, cursor
    /// and counters cleared. Rejected mid-run.
    pub fn restart(&mut self, source: &dyn TextSource) -> Result<(), SessionError> {
        if self.phase == Phase::Running {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "restart",
            });
        }
        *self = Session::new(source, self.number_of_words, self.duration_secs);
        Ok(())
    }
}
