//! Update payload assembly.
//!
//! Builds the field maps sent to the hosted store. Link fields carry a
//! one-element list of ids; a link that does not resolve is left out of the
//! payload rather than reported.

use answerdesk_types::config::FieldNames;
use answerdesk_types::record::{Fields, Record, RecordId, link_value};
use answerdesk_types::view::SaveRequest;
use serde_json::Value;

use crate::linker::resolve_choice;

/// Payload of a Save on the current question.
///
/// `answer` and `robotic_system` are always present (empty values overwrite).
/// `company`/`robot` are added only when the choice resolves against the
/// given lists.
pub fn answer_update(
    request: &SaveRequest,
    companies: &[Record],
    robots: &[Record],
    fields: &FieldNames,
) -> Fields {
    let mut payload = Fields::new();
    payload.insert(fields.answer.clone(), Value::String(request.answer.clone()));
    payload.insert(
        fields.robotic_system.clone(),
        Value::String(request.robotic_system.clone()),
    );

    if let Some(choice) = &request.company {
        match resolve_choice(companies, choice, &fields.company_name) {
            Some(id) => {
                payload.insert(fields.question_company.clone(), link_value(&id));
            }
            None if !choice.is_blank() => {
                tracing::debug!(?choice, "company choice did not resolve, leaving link out");
            }
            None => {}
        }
    }

    if let Some(choice) = &request.robot {
        match resolve_choice(robots, choice, &fields.robot_name) {
            Some(id) => {
                payload.insert(fields.question_robot.clone(), link_value(&id));
            }
            None if !choice.is_blank() => {
                tracing::debug!(?choice, "robot choice did not resolve, leaving link out");
            }
            None => {}
        }
    }

    payload
}

/// Payload of one row of the per-company "save all": only the answer.
pub fn answer_only_update(answer: &str, fields: &FieldNames) -> Fields {
    let mut payload = Fields::new();
    payload.insert(fields.answer.clone(), Value::String(answer.to_string()));
    payload
}

/// Fields of a question created from the per-company sub-form.
pub fn new_question_fields(
    company_id: &RecordId,
    text: &str,
    robotic_system: Option<&str>,
    fields: &FieldNames,
) -> Fields {
    let mut payload = Fields::new();
    payload.insert(fields.question_text.clone(), Value::String(text.to_string()));
    payload.insert(fields.question_company.clone(), link_value(company_id));
    if let Some(system) = robotic_system.filter(|s| !s.is_empty()) {
        payload.insert(fields.robotic_system.clone(), Value::String(system.to_string()));
    }
    payload
}

/// Fields of a feedback record.
pub fn feedback_fields(message: &str, submitted_by: Option<&str>, fields: &FieldNames) -> Fields {
    let mut payload = Fields::new();
    payload.insert(fields.feedback_message.clone(), Value::String(message.to_string()));
    if let Some(name) = submitted_by.map(str::trim).filter(|s| !s.is_empty()) {
        payload.insert(fields.feedback_name.clone(), Value::String(name.to_string()));
    }
    payload
}
