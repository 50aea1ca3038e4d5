//! Per-company reconciliation.
//!
//! Supports the bulk form: pick one company, see every question linked to
//! it, and submit all answers at once.

use std::collections::HashMap;

use answerdesk_types::question::{Company, Question};
use answerdesk_types::record::RecordId;

/// Companies referenced by at least one question, in company-list order.
pub fn companies_with_questions(questions: &[Question], companies: &[Company]) -> Vec<Company> {
    companies
        .iter()
        .filter(|c| questions.iter().any(|q| q.is_linked_to_company(&c.id)))
        .cloned()
        .collect()
}

/// Questions linked to the given company, in fetch order.
pub fn questions_for_company(questions: Vec<Question>, company_id: &RecordId) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| q.is_linked_to_company(company_id))
        .collect()
}

/// One update per question: the edited answer, or the current one if the
/// operator left it untouched.
///
/// Edits for questions outside `questions` are ignored.
pub fn reconcile_answers(
    questions: &[Question],
    edits: &HashMap<RecordId, String>,
) -> Vec<(RecordId, String)> {
    let stray = edits
        .keys()
        .filter(|id| !questions.iter().any(|q| &q.id == *id))
        .count();
    if stray > 0 {
        tracing::debug!(stray, "ignoring edits for questions outside the company");
    }

    questions
        .iter()
        .map(|q| {
            let answer = edits.get(&q.id).unwrap_or(&q.answer);
            (q.id.clone(), answer.clone())
        })
        .collect()
}
