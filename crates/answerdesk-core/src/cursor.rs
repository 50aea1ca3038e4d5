//! Question cursor.
//!
//! Selects exactly one unanswered question to present. The unanswered list
//! is recomputed from a fresh fetch on every interaction; the cursor is only
//! an index into it.

use answerdesk_types::question::Question;

/// The unanswered view: every question whose answer is empty, in fetch order.
pub fn unanswered(questions: Vec<Question>) -> Vec<Question> {
    questions.into_iter().filter(|q| !q.is_answered()).collect()
}

/// Zero-based position in the unanswered list of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionCursor {
    index: usize,
}

impl QuestionCursor {
    /// A cursor at the start of the list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cursor from a stored index.
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The question under the cursor, or `None` once exhausted.
    pub fn current<'a>(&self, unanswered: &'a [Question]) -> Option<&'a Question> {
        unanswered.get(self.index)
    }

    /// Whether there is nothing left to show.
    ///
    /// An empty list and an index past the end are both terminal.
    pub fn is_exhausted(&self, unanswered: &[Question]) -> bool {
        self.index >= unanswered.len()
    }

    /// Move to the next question (Skip, or Save after a successful write).
    pub fn advance(&mut self) {
        self.index += 1;
    }
}
