use crate::error::ReducerError;

/// One character of the generated prompt, with its attempt/outcome flags.
///
/// `correct` and `incorrect` are mutually exclusive; both stay false until the
/// cell has been attempted, after which the dispatcher sets exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharacterCell {
    pub letter: char,
    pub attempted: bool,
    pub correct: bool,
    pub incorrect: bool,
}

impl CharacterCell {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            attempted: false,
            correct: false,
            incorrect: false,
        }
    }
}

/// The prompt for one session: an ordered run of cells, fixed in length once
/// built. Flags change through the reducer; the length never does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionText {
    cells: Vec<CharacterCell>,
}

impl SessionText {
    /// Builds the character stream for a session. Words are joined with comma
    /// separators which are then stripped, leaving single spaces as ordinary
    /// typed targets between words.
    pub fn from_words(words: &[String]) -> Self {
        let joined = words.join(", ");
        let cells = joined
            .chars()
            .filter(|c| *c != ',')
            .map(CharacterCell::new)
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CharacterCell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CharacterCell> {
        self.cells.get(index)
    }

    /// Expected character at `index`, if in bounds.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.cells.get(index).map(|c| c.letter)
    }

    pub fn attempted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.attempted).count()
    }

    pub fn correct_count(&self) -> usize {
        self.cells.iter().filter(|c| c.correct).count()
    }

    /// Returns a copy with `apply` run against the cell at `index`. The
    /// receiver is never mutated; an out-of-range index fails without
    /// touching anything.
    pub(crate) fn with_cell(
        &self,
        index: usize,
        apply: impl FnOnce(&mut CharacterCell),
    ) -> Result<SessionText, ReducerError> {
        if index >= self.cells.len() {
            return Err(ReducerError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        let mut next = self.clone();
        apply(&mut next.cells[index]);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_new_cell_has_no_flags() {
        let cell = CharacterCell::new('a');
        assert_eq!(cell.letter, 'a');
        assert!(!cell.attempted);
        assert!(!cell.correct);
        assert!(!cell.incorrect);
    }

    #[test]
    fn test_from_words_joins_with_single_spaces() {
        let text = SessionText::from_words(&words(&["hot", "cocoa"]));
        let stream: String = text.cells().iter().map(|c| c.letter).collect();
        assert_eq!(stream, "hot cocoa");
    }

    #[test]
    fn test_from_words_strips_separator_punctuation() {
        let text = SessionText::from_words(&words(&["a", "b", "c"]));
        assert!(text.cells().iter().all(|c| c.letter != ','));
        assert_eq!(text.len(), 5);
    }

    #[test]
    fn test_from_words_empty() {
        let text = SessionText::from_words(&[]);
        assert!(text.is_empty());
    }

    #[test]
    fn test_letter_lookup() {
        let text = SessionText::from_words(&words(&["hi"]));
        assert_eq!(text.letter(0), Some('h'));
        assert_eq!(text.letter(1), Some('i'));
        assert_eq!(text.letter(2), None);
    }

    #[test]
    fn test_with_cell_leaves_receiver_unchanged() {
        let text = SessionText::from_words(&words(&["hi"]));
        let next = text.with_cell(0, |c| c.attempted = true).unwrap();
        assert!(!text.cells()[0].attempted);
        assert!(next.cells()[0].attempted);
        assert_eq!(text.len(), next.len());
    }

    #[test]
    fn test_with_cell_out_of_range() {
        let text = SessionText::from_words(&words(&["hi"]));
        let err = text.with_cell(5, |c| c.attempted = true).unwrap_err();
        assert_eq!(err, ReducerError::IndexOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn test_counts() {
        let text = SessionText::from_words(&words(&["abc"]));
        let text = text
            .with_cell(0, |c| {
                c.attempted = true;
                c.correct = true;
            })
            .unwrap()
            .with_cell(1, |c| {
                c.attempted = true;
                c.incorrect = true;
            })
            .unwrap();
        assert_eq!(text.attempted_count(), 2);
        assert_eq!(text.correct_count(), 1);
    }
}
