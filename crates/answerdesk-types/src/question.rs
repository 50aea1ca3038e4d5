//! Typed views over the Questions, Companies and Robots tables.

use serde::{Deserialize, Serialize};

use crate::config::FieldNames;
use crate::record::{Record, RecordId};

/// Shown in place of a question that has no text.
pub const NO_QUESTION_TEXT: &str = "(no question text)";

/// Returned when a linked id has no matching record.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A row of the Questions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: RecordId,
    /// Raw question text; empty when the column is blank.
    pub text: String,
    /// Current answer; empty means unanswered.
    pub answer: String,
    pub company_refs: Vec<RecordId>,
    pub robot_refs: Vec<RecordId>,
    pub robotic_system: String,
}

impl Question {
    pub fn from_record(record: &Record, fields: &FieldNames) -> Self {
        Self {
            id: record.id.clone(),
            text: record.text_or_empty(&fields.question_text).to_string(),
            answer: record.text_or_empty(&fields.answer).to_string(),
            company_refs: record.links(&fields.question_company),
            robot_refs: record.links(&fields.question_robot),
            robotic_system: record.text_or_empty(&fields.robotic_system).to_string(),
        }
    }

    /// A question is answered as soon as its answer is non-empty.
    ///
    /// Whitespace-only answers count as answered.
    pub fn is_answered(&self) -> bool {
        !self.answer.is_empty()
    }

    /// Question text with the placeholder applied.
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            NO_QUESTION_TEXT
        } else {
            &self.text
        }
    }

    /// The linked company (first element of the link field).
    pub fn company_ref(&self) -> Option<&RecordId> {
        self.company_refs.first()
    }

    /// The linked robot (first element of the link field).
    pub fn robot_ref(&self) -> Option<&RecordId> {
        self.robot_refs.first()
    }

    pub fn is_linked_to_company(&self, company_id: &RecordId) -> bool {
        self.company_refs.contains(company_id)
    }
}

/// A row of the Companies table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    pub name: String,
}

impl Company {
    pub fn from_record(record: &Record, fields: &FieldNames) -> Self {
        Self {
            id: record.id.clone(),
            name: record.text_or_empty(&fields.company_name).to_string(),
        }
    }
}

/// A row of the Robots table.
///
/// `robotic_system_name` may repeat across rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RecordId,
    pub robotic_system_name: String,
}

impl Robot {
    pub fn from_record(record: &Record, fields: &FieldNames) -> Self {
        Self {
            id: record.id.clone(),
            robotic_system_name: record.text_or_empty(&fields.robot_name).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, fields: serde_json::Value) -> Record {
        match fields {
            serde_json::Value::Object(map) => Record::new(id, map),
            _ => panic!("fields must be an object"),
        }
    }

    #[test]
    fn test_question_from_full_record() {
        let r = record(
            "q1",
            json!({
                "Question": "Which arm?",
                "Answers": "Left",
                "Company": ["c1"],
                "Robot": ["r1"],
                "Robotic System": "Hugo"
            }),
        );
        let q = Question::from_record(&r, &FieldNames::default());
        assert_eq!(q.id, RecordId::from("q1"));
        assert_eq!(q.text, "Which arm?");
        assert_eq!(q.answer, "Left");
        assert_eq!(q.company_ref(), Some(&RecordId::from("c1")));
        assert_eq!(q.robot_ref(), Some(&RecordId::from("r1")));
        assert_eq!(q.robotic_system, "Hugo");
        assert!(q.is_answered());
    }

    #[test]
    fn test_question_from_sparse_record() {
        let q = Question::from_record(&record("q2", json!({})), &FieldNames::default());
        assert!(!q.is_answered());
        assert_eq!(q.display_text(), NO_QUESTION_TEXT);
        assert!(q.company_ref().is_none());
        assert!(q.robot_ref().is_none());
        assert_eq!(q.robotic_system, "");
    }

    #[test]
    fn test_whitespace_answer_counts_as_answered() {
        let q = Question::from_record(&record("q3", json!({"Answers": " "})), &FieldNames::default());
        assert!(q.is_answered());
    }

    #[test]
    fn test_custom_field_names() {
        let fields = FieldNames {
            question_text: "Vraag".to_string(),
            answer: "Antwoord".to_string(),
            ..FieldNames::default()
        };
        let q = Question::from_record(&record("q4", json!({"Vraag": "V", "Antwoord": "A"})), &fields);
        assert_eq!(q.text, "V");
        assert_eq!(q.answer, "A");
    }

    #[test]
    fn test_company_and_robot_from_record() {
        let fields = FieldNames::default();
        let c = Company::from_record(&record("c1", json!({"Name": "Acme"})), &fields);
        assert_eq!(c.name, "Acme");
        let r = Robot::from_record(&record("r1", json!({"Name": "Da Vinci"})), &fields);
        assert_eq!(r.robotic_system_name, "Da Vinci");
    }

    #[test]
    fn test_is_linked_to_any_company_ref() {
        let q = Question::from_record(
            &record("q5", json!({"Company": ["c1", "c2"]})),
            &FieldNames::default(),
        );
        assert!(q.is_linked_to_company(&RecordId::from("c2")));
        assert!(!q.is_linked_to_company(&RecordId::from("c3")));
    }
}
