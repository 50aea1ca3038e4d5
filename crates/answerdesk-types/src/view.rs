//! Request and view shapes of the data-entry flows.
//!
//! These are what a front-end exchanges with the service: the current
//! question with its dropdown options, the Save payload, and the bulk
//! per-company forms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::question::Question;
use crate::record::RecordId;

/// How an operator picked a linked record.
///
/// `Name` re-derives the record from its display string (first match wins on
/// duplicates). `Id` carries the record id straight from the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkChoice {
    Id(RecordId),
    Name(String),
}

impl LinkChoice {
    /// The empty dropdown option.
    pub fn is_blank(&self) -> bool {
        match self {
            LinkChoice::Id(id) => id.as_str().is_empty(),
            LinkChoice::Name(name) => name.is_empty(),
        }
    }
}

/// Body of a Save action on the current question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Free-text answer. Empty is a valid overwrite.
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub company: Option<LinkChoice>,
    #[serde(default)]
    pub robot: Option<LinkChoice>,
    #[serde(default)]
    pub robotic_system: String,
    /// Question the operator was looking at; rejected if no longer current.
    #[serde(default)]
    pub question_id: Option<RecordId>,
}

/// Company entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOption {
    pub id: RecordId,
    pub name: String,
}

/// Robot entry of a dropdown; `robotic_system` pre-fills the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotOption {
    pub id: RecordId,
    pub name: String,
    pub robotic_system: String,
}

/// Choices offered next to the current question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub companies: Vec<CompanyOption>,
    pub robots: Vec<RobotOption>,
    pub robotic_systems: Vec<String>,
}

/// The question shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_id: RecordId,
    pub text: String,
    /// Zero-based cursor index within the unanswered list.
    pub index: usize,
    /// Size of the unanswered list at fetch time.
    pub unanswered: usize,
    pub linked_company: Option<String>,
    pub linked_robot: Option<String>,
    pub robotic_system: String,
    /// System name of the linked robot when no tag is stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_robotic_system: Option<String>,
}

/// What the form shows for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CurrentView {
    /// The unanswered list is empty.
    AllAnswered,
    /// The cursor moved past the end of the unanswered list.
    SessionFinished { handled: usize },
    Question {
        question: QuestionView,
        options: FormOptions,
    },
}

impl CurrentView {
    /// Message shown for the terminal states.
    pub fn completion_message(&self) -> Option<&'static str> {
        match self {
            CurrentView::AllAnswered => Some("All questions have already been answered."),
            CurrentView::SessionFinished { .. } => Some("You have handled all questions."),
            CurrentView::Question { .. } => None,
        }
    }

    pub fn question(&self) -> Option<&QuestionView> {
        match self {
            CurrentView::Question { question, .. } => Some(question),
            _ => None,
        }
    }
}

/// Result of a successful Save.
///
/// The answer is written once this exists. `next` is `None` when the view
/// could not be rebuilt afterwards; `warning` then says why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub saved: RecordId,
    pub next: Option<CurrentView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// A question as listed in the per-company bulk form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyQuestion {
    pub id: RecordId,
    pub text: String,
    pub answer: String,
    pub robotic_system: String,
}

impl From<&Question> for CompanyQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.display_text().to_string(),
            answer: q.answer.clone(),
            robotic_system: q.robotic_system.clone(),
        }
    }
}

/// Body of the per-company "save all" submission.
///
/// Questions missing from `answers` keep (and resubmit) their current answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyAnswersRequest {
    #[serde(default)]
    pub answers: HashMap<RecordId, String>,
}

/// Result of the per-company "save all" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSaveReport {
    pub company_id: RecordId,
    pub saved: usize,
}

/// Body of the "new question for this company" sub-form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestionRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub robotic_system: Option<String>,
}

/// Body of the feedback form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub submitted_by: Option<String>,
}

/// Overview of the hosted base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub total_questions: usize,
    pub unanswered: usize,
    pub companies: usize,
    pub companies_with_questions: usize,
    pub robots: usize,
    pub robotic_systems: Vec<String>,
    pub duplicate_company_names: Vec<String>,
    pub duplicate_robot_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_choice_wire_shape() {
        let by_id: LinkChoice = serde_json::from_value(json!({"id": "c1"})).unwrap();
        assert_eq!(by_id, LinkChoice::Id(RecordId::from("c1")));
        let by_name: LinkChoice = serde_json::from_value(json!({"name": "Acme"})).unwrap();
        assert_eq!(by_name, LinkChoice::Name("Acme".to_string()));
    }

    #[test]
    fn test_link_choice_blank() {
        assert!(LinkChoice::Name(String::new()).is_blank());
        assert!(LinkChoice::Id(RecordId::from("")).is_blank());
        assert!(!LinkChoice::Name("Acme".to_string()).is_blank());
    }

    #[test]
    fn test_save_request_defaults() {
        let req: SaveRequest = serde_json::from_value(json!({"answer": "42"})).unwrap();
        assert_eq!(req.answer, "42");
        assert!(req.company.is_none());
        assert!(req.robot.is_none());
        assert_eq!(req.robotic_system, "");
        assert!(req.question_id.is_none());
    }

    #[test]
    fn test_current_view_tagging() {
        let value = serde_json::to_value(CurrentView::SessionFinished { handled: 3 }).unwrap();
        assert_eq!(value, json!({"state": "session_finished", "handled": 3}));
        let value = serde_json::to_value(CurrentView::AllAnswered).unwrap();
        assert_eq!(value, json!({"state": "all_answered"}));
    }

    #[test]
    fn test_completion_messages() {
        assert!(CurrentView::AllAnswered.completion_message().is_some());
        assert!(
            CurrentView::SessionFinished { handled: 1 }
                .completion_message()
                .is_some()
        );
    }

    #[test]
    fn test_company_answers_request_keys() {
        let req: CompanyAnswersRequest =
            serde_json::from_value(json!({"answers": {"q1": "a2"}})).unwrap();
        assert_eq!(req.answers.get(&RecordId::from("q1")).map(String::as_str), Some("a2"));
    }
}
