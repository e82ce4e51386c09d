use crate::error::ReducerError;
use crate::text::SessionText;

/// The closed set of transitions over a session's text. Anything else is
/// unrepresentable; there is no silent default arm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    /// Replace the text wholesale. Used at session (re)start.
    SetText(SessionText),
    /// Mark the cell at the index as attempted.
    Attempted(usize),
    /// Record a correct outcome at the index, clearing any incorrect flag.
    Correct(usize),
    /// Record an incorrect outcome at the index, clearing any correct flag.
    Incorrect(usize),
}

/// Pure transition function: returns a new text reflecting the event and
/// never mutates `state`. Callers holding the previous value can keep using
/// it unchanged. Indexed events fail with `IndexOutOfRange` when the index
/// is outside the text, leaving every cell untouched.
pub fn reduce(state: &SessionText, event: TypingEvent) -> Result<SessionText, ReducerError> {
    match event {
        TypingEvent::SetText(next) => Ok(next),
        TypingEvent::Attempted(index) => state.with_cell(index, |cell| cell.attempted = true),
        TypingEvent::Correct(index) => state.with_cell(index, |cell| {
            cell.correct = true;
            cell.incorrect = false;
        }),
        TypingEvent::Incorrect(index) => state.with_cell(index, |cell| {
            cell.incorrect = true;
            cell.correct = false;
        }),
    }
}
