//! Status endpoint.
//!
//! GET /api/v1/status - Counts and naming problems across the hosted base.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use answerdesk_types::view::StatusReport;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, elapsed_ms, request_id};
use crate::state::AppState;

/// GET /api/v1/status
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatusReport>>, AppError> {
    let start = Instant::now();

    let report = state.answer_service.status().await?;

    let resp = ApiResponse::success(report, request_id(), elapsed_ms(start))
        .with_link("self", "/api/v1/status")
        .with_link("companies", "/api/v1/companies");
    Ok(Json(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handlers::test_support::demo_state;

    #[tokio::test]
    async fn test_status_reports_demo_base() {
        let state = demo_state().await;
        let Json(resp) = get_status(State(state)).await.unwrap();
        let report = resp.data.unwrap();

        assert_eq!(report.total_questions, 7);
        assert_eq!(report.unanswered, 6);
        assert_eq!(report.companies, 4);
        assert_eq!(report.companies_with_questions, 3);
        assert_eq!(report.duplicate_company_names, vec!["Acme Medical".to_string()]);
        assert_eq!(report.duplicate_robot_names, vec!["Hugo".to_string()]);
        assert_eq!(
            report.robotic_systems,
            vec!["Da Vinci".to_string(), "Hugo".to_string(), "Symani".to_string()]
        );
    }
}
