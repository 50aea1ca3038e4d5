//! Per-company bulk form HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/companies                 - Companies that have questions
//! - GET  /api/v1/companies/{id}/questions  - Questions linked to a company
//! - PUT  /api/v1/companies/{id}/answers    - Save every answer of a company
//! - POST /api/v1/companies/{id}/questions  - Add a question to a company

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use answerdesk_types::question::{Company, Question};
use answerdesk_types::record::RecordId;
use answerdesk_types::view::{
    BulkSaveReport, CompanyAnswersRequest, CompanyQuestion, NewQuestionRequest,
};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, elapsed_ms, request_id};
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Company>>>, AppError> {
    let start = Instant::now();

    let companies = state.answer_service.companies_with_questions().await?;

    let resp = ApiResponse::success(companies, request_id(), elapsed_ms(start))
        .with_link("self", "/api/v1/companies");
    Ok(Json(resp))
}

/// GET /api/v1/companies/{id}/questions
pub async fn list_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CompanyQuestion>>>, AppError> {
    let start = Instant::now();
    let company_id = RecordId::from(id);

    let questions = state.answer_service.questions_for_company(&company_id).await?;

    let resp = ApiResponse::success(questions, request_id(), elapsed_ms(start))
        .with_link("self", &format!("/api/v1/companies/{company_id}/questions"))
        .with_link("answers", &format!("/api/v1/companies/{company_id}/answers"));
    Ok(Json(resp))
}

/// PUT /api/v1/companies/{id}/answers
pub async fn save_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CompanyAnswersRequest>,
) -> Result<Json<ApiResponse<BulkSaveReport>>, AppError> {
    let start = Instant::now();
    let company_id = RecordId::from(id);

    let report = state
        .answer_service
        .save_company_answers(&company_id, request)
        .await?;

    let resp = ApiResponse::success(report, request_id(), elapsed_ms(start))
        .with_link("questions", &format!("/api/v1/companies/{company_id}/questions"));
    Ok(Json(resp))
}

/// POST /api/v1/companies/{id}/questions
pub async fn create_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Question>>), AppError> {
    let start = Instant::now();
    let company_id = RecordId::from(id);

    let question = state
        .answer_service
        .create_company_question(&company_id, request)
        .await?;

    let resp = ApiResponse::success(question, request_id(), elapsed_ms(start))
        .with_link("questions", &format!("/api/v1/companies/{company_id}/questions"));
    Ok((StatusCode::CREATED, Json(resp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use answerdesk_types::error::AnswerError;

    use crate::http::handlers::test_support::demo_state;

    async fn company_id(state: &AppState, name: &str) -> RecordId {
        let Json(resp) = list_companies(State(state.clone())).await.unwrap();
        resp.data
            .unwrap()
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_only_companies_with_questions_listed() {
        let state = demo_state().await;
        let Json(resp) = list_companies(State(state)).await.unwrap();
        let names: Vec<String> = resp.data.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Acme Medical".to_string(),
                "Globex Surgical".to_string(),
                "Initech Clinics".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_bulk_save_then_list() {
        let state = demo_state().await;
        let acme = company_id(&state, "Acme Medical").await;

        let Json(listed) = list_questions(State(state.clone()), Path(acme.to_string()))
            .await
            .unwrap();
        let questions = listed.data.unwrap();
        assert_eq!(questions.len(), 2);

        let mut answers = HashMap::new();
        answers.insert(questions[0].id.clone(), "3".to_string());
        let Json(report) = save_answers(
            State(state.clone()),
            Path(acme.to_string()),
            Json(CompanyAnswersRequest { answers }),
        )
        .await
        .unwrap();
        assert_eq!(report.data.unwrap().saved, 2);

        let Json(after) = list_questions(State(state), Path(acme.to_string()))
            .await
            .unwrap();
        let after = after.data.unwrap();
        assert_eq!(after[0].answer, "3");
        assert_eq!(after[1].answer, "Urology");
    }

    #[tokio::test]
    async fn test_create_question_created_status() {
        let state = demo_state().await;
        let initech = company_id(&state, "Initech Clinics").await;

        let (status, Json(resp)) = create_question(
            State(state),
            Path(initech.to_string()),
            Json(NewQuestionRequest {
                question: "Is there a training center?".to_string(),
                robotic_system: Some("Hugo".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let question = resp.data.unwrap();
        assert_eq!(question.company_ref(), Some(&initech));
        assert_eq!(question.robotic_system, "Hugo");
    }

    #[tokio::test]
    async fn test_create_question_unknown_company() {
        let state = demo_state().await;
        let result = create_question(
            State(state),
            Path("recNope".to_string()),
            Json(NewQuestionRequest {
                question: "Q".to_string(),
                robotic_system: None,
            }),
        )
        .await;
        assert!(matches!(
            result,
            Err(AppError::Answer(AnswerError::UnknownCompany(_)))
        ));
    }
}
