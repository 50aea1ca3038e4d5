//! Data-entry service.
//!
//! Orchestrates one interaction at a time: re-fetch what the interaction
//! needs, derive the view, optionally write, and hand back a fresh view.
//! Every remote write returns a `Result`; the cursor only moves after a
//! write succeeded, so a failed save never skips a question.

use answerdesk_types::config::FieldNames;
use answerdesk_types::error::AnswerError;
use answerdesk_types::question::{Company, Question, Robot};
use answerdesk_types::record::{Record, RecordId};
use answerdesk_types::session::SessionKey;
use answerdesk_types::view::{
    BulkSaveReport, CompanyAnswersRequest, CompanyOption, CompanyQuestion, CurrentView,
    FeedbackRequest, FormOptions, LinkChoice, NewQuestionRequest, QuestionView, RobotOption,
    SaveOutcome, SaveRequest, StatusReport,
};

use crate::bulk;
use crate::cursor::{QuestionCursor, unanswered};
use crate::linker;
use crate::payload;
use crate::repository::cursor::CursorStore;
use crate::repository::table::{RecordTable, Tables};

/// Service behind the one-question form, the per-company bulk form and the
/// feedback form.
///
/// Generic over the table and cursor-store ports; answerdesk-api pins them
/// to the concrete infra implementations.
pub struct AnswerService<T: RecordTable, C: CursorStore> {
    tables: Tables<T>,
    cursors: C,
    fields: FieldNames,
    robotic_systems: Vec<String>,
}

impl<T: RecordTable, C: CursorStore> AnswerService<T, C> {
    /// Create a new AnswerService.
    ///
    /// - `tables`: the hosted Questions/Companies/Robots/Feedback tables
    /// - `cursors`: per-session cursor persistence
    /// - `fields`: column names of the hosted base
    /// - `robotic_systems`: vocabulary used when the Robots table has no names
    pub fn new(
        tables: Tables<T>,
        cursors: C,
        fields: FieldNames,
        robotic_systems: Vec<String>,
    ) -> Self {
        Self {
            tables,
            cursors,
            fields,
            robotic_systems,
        }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    // -----------------------------------------------------------------------
    // One-question form
    // -----------------------------------------------------------------------

    /// What the form shows for `session` right now.
    pub async fn current(&self, session: &SessionKey) -> Result<CurrentView, AnswerError> {
        let open = unanswered(self.fetch_questions().await?);
        let cursor = QuestionCursor::at(self.cursors.load(session).await?);
        self.render(&open, cursor).await
    }

    /// Skip the current question without writing anything.
    pub async fn skip(&self, session: &SessionKey) -> Result<CurrentView, AnswerError> {
        let open = unanswered(self.fetch_questions().await?);
        let mut cursor = QuestionCursor::at(self.cursors.load(session).await?);

        let Some(skipped) = cursor.current(&open) else {
            return Err(AnswerError::NothingToDo);
        };
        tracing::debug!(session = %session, question = %skipped.id, "question skipped");

        cursor.advance();
        self.cursors.save(session, cursor.index()).await?;
        self.render(&open, cursor).await
    }

    /// Write the operator's answer to the current question.
    ///
    /// On success the cursor advances and the returned view is rebuilt from
    /// a fresh fetch. On a write failure the error is returned and the
    /// cursor stays where it was. Once the write succeeded the result is
    /// always `Ok`; a failed cursor save or refresh only sets `warning`.
    pub async fn save(
        &self,
        session: &SessionKey,
        request: SaveRequest,
    ) -> Result<SaveOutcome, AnswerError> {
        let open = unanswered(self.fetch_questions().await?);
        let mut cursor = QuestionCursor::at(self.cursors.load(session).await?);

        let Some(question) = cursor.current(&open) else {
            return Err(AnswerError::NothingToDo);
        };
        if let Some(submitted) = &request.question_id {
            if submitted != &question.id {
                return Err(AnswerError::StaleQuestion {
                    submitted: submitted.clone(),
                    current: question.id.clone(),
                });
            }
        }

        let companies = if wants_link(request.company.as_ref()) {
            self.fetch_records(&self.tables.companies).await?
        } else {
            Vec::new()
        };
        let robots = if wants_link(request.robot.as_ref()) {
            self.fetch_records(&self.tables.robots).await?
        } else {
            Vec::new()
        };

        let update = payload::answer_update(&request, &companies, &robots, &self.fields);
        let question_id = question.id.clone();

        self.tables
            .questions
            .update(&question_id, update)
            .await
            .map_err(|e| {
                tracing::error!(session = %session, question = %question_id, error = %e, "saving answer failed");
                AnswerError::Write(e)
            })?;
        tracing::info!(session = %session, question = %question_id, "answer saved");

        // The write went through; from here on failures only degrade the
        // outcome, they never turn it into an error.
        cursor.advance();
        let mut warning = None;
        if let Err(e) = self.cursors.save(session, cursor.index()).await {
            tracing::error!(session = %session, error = %e, "cursor not persisted after save");
            warning = Some(format!("cursor not persisted: {e}"));
        }

        let next = match self.refreshed_view(cursor).await {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::warn!(session = %session, error = %e, "view refresh after save failed");
                if warning.is_none() {
                    warning = Some(format!("next question could not be loaded: {e}"));
                }
                None
            }
        };

        Ok(SaveOutcome {
            saved: question_id,
            next,
            warning,
        })
    }

    async fn refreshed_view(&self, cursor: QuestionCursor) -> Result<CurrentView, AnswerError> {
        let open = unanswered(self.fetch_questions().await?);
        self.render(&open, cursor).await
    }

    /// Start the session over at the first unanswered question.
    pub async fn reset(&self, session: &SessionKey) -> Result<CurrentView, AnswerError> {
        self.cursors.reset(session).await?;
        tracing::info!(session = %session, "cursor reset");
        self.current(session).await
    }

    async fn render(
        &self,
        open: &[Question],
        cursor: QuestionCursor,
    ) -> Result<CurrentView, AnswerError> {
        if open.is_empty() {
            return Ok(CurrentView::AllAnswered);
        }
        let Some(question) = cursor.current(open) else {
            return Ok(CurrentView::SessionFinished {
                handled: cursor.index(),
            });
        };

        let companies = self.fetch_records(&self.tables.companies).await?;
        let robots = self.fetch_records(&self.tables.robots).await?;

        let view = QuestionView {
            question_id: question.id.clone(),
            text: question.display_text().to_string(),
            index: cursor.index(),
            unanswered: open.len(),
            linked_company: question
                .company_ref()
                .map(|id| linker::resolve_name_by_id(&companies, id, &self.fields.company_name)),
            linked_robot: question
                .robot_ref()
                .map(|id| linker::resolve_name_by_id(&robots, id, &self.fields.robot_name)),
            robotic_system: question.robotic_system.clone(),
            suggested_robotic_system: question
                .robot_ref()
                .filter(|_| question.robotic_system.is_empty())
                .and_then(|id| {
                    linker::robotic_system_for_robot(
                        &robots,
                        &LinkChoice::Id(id.clone()),
                        &self.fields.robot_name,
                    )
                }),
        };

        Ok(CurrentView::Question {
            question: view,
            options: self.form_options(&companies, &robots),
        })
    }

    fn form_options(&self, companies: &[Record], robots: &[Record]) -> FormOptions {
        let companies = companies
            .iter()
            .map(|r| Company::from_record(r, &self.fields))
            .map(|c| CompanyOption {
                id: c.id,
                name: c.name,
            })
            .collect();
        let robot_options = robots
            .iter()
            .map(|r| Robot::from_record(r, &self.fields))
            .map(|r| RobotOption {
                id: r.id,
                name: r.robotic_system_name.clone(),
                robotic_system: r.robotic_system_name,
            })
            .collect();

        FormOptions {
            companies,
            robots: robot_options,
            robotic_systems: linker::distinct_names(
                robots,
                &self.fields.robot_name,
                &self.robotic_systems,
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Per-company bulk form
    // -----------------------------------------------------------------------

    /// Companies that have at least one question.
    pub async fn companies_with_questions(&self) -> Result<Vec<Company>, AnswerError> {
        let questions = self.fetch_questions().await?;
        let companies: Vec<Company> = self
            .fetch_records(&self.tables.companies)
            .await?
            .iter()
            .map(|r| Company::from_record(r, &self.fields))
            .collect();
        Ok(bulk::companies_with_questions(&questions, &companies))
    }

    /// Questions linked to a company, from a fresh fetch.
    pub async fn questions_for_company(
        &self,
        company_id: &RecordId,
    ) -> Result<Vec<CompanyQuestion>, AnswerError> {
        let questions = bulk::questions_for_company(self.fetch_questions().await?, company_id);
        Ok(questions.iter().map(CompanyQuestion::from).collect())
    }

    /// Save every answer of a company's questions, one update per question.
    ///
    /// Only the answer column is written. Questions without an edit resubmit
    /// their current answer. Writes run in order and stop at the first
    /// failure.
    pub async fn save_company_answers(
        &self,
        company_id: &RecordId,
        request: CompanyAnswersRequest,
    ) -> Result<BulkSaveReport, AnswerError> {
        let questions = bulk::questions_for_company(self.fetch_questions().await?, company_id);
        let plan = bulk::reconcile_answers(&questions, &request.answers);

        let mut saved = 0;
        for (question_id, answer) in plan {
            let update = payload::answer_only_update(&answer, &self.fields);
            if let Err(source) = self.tables.questions.update(&question_id, update).await {
                tracing::error!(company = %company_id, question = %question_id, saved, error = %source, "bulk save stopped");
                return Err(AnswerError::PartialSave {
                    saved,
                    failed_id: question_id,
                    source,
                });
            }
            saved += 1;
        }

        tracing::info!(company = %company_id, saved, "company answers saved");
        Ok(BulkSaveReport {
            company_id: company_id.clone(),
            saved,
        })
    }

    /// Create a new question tied to a company.
    pub async fn create_company_question(
        &self,
        company_id: &RecordId,
        request: NewQuestionRequest,
    ) -> Result<Question, AnswerError> {
        let text = request.question.trim();
        if text.is_empty() {
            return Err(AnswerError::Validation(
                "question text is required".to_string(),
            ));
        }

        let companies = self.fetch_records(&self.tables.companies).await?;
        if !companies.iter().any(|c| &c.id == company_id) {
            return Err(AnswerError::UnknownCompany(company_id.clone()));
        }

        let fields = payload::new_question_fields(
            company_id,
            text,
            request.robotic_system.as_deref().map(str::trim),
            &self.fields,
        );
        let created = self
            .tables
            .questions
            .create(fields)
            .await
            .map_err(AnswerError::Write)?;
        tracing::info!(company = %company_id, question = %created.id, "question created");

        Ok(Question::from_record(&created, &self.fields))
    }

    // -----------------------------------------------------------------------
    // Feedback and status
    // -----------------------------------------------------------------------

    /// File a feedback message.
    pub async fn submit_feedback(&self, request: FeedbackRequest) -> Result<RecordId, AnswerError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AnswerError::Validation(
                "feedback message is required".to_string(),
            ));
        }

        let fields = payload::feedback_fields(message, request.submitted_by.as_deref(), &self.fields);
        let created = self
            .tables
            .feedback
            .create(fields)
            .await
            .map_err(AnswerError::Write)?;
        tracing::info!(feedback = %created.id, "feedback submitted");

        Ok(created.id)
    }

    /// Counts and naming problems across the hosted base.
    pub async fn status(&self) -> Result<StatusReport, AnswerError> {
        let questions = self.fetch_questions().await?;
        let company_records = self.fetch_records(&self.tables.companies).await?;
        let robot_records = self.fetch_records(&self.tables.robots).await?;

        let companies: Vec<Company> = company_records
            .iter()
            .map(|r| Company::from_record(r, &self.fields))
            .collect();

        Ok(StatusReport {
            total_questions: questions.len(),
            unanswered: questions.iter().filter(|q| !q.is_answered()).count(),
            companies: companies.len(),
            companies_with_questions: bulk::companies_with_questions(&questions, &companies).len(),
            robots: robot_records.len(),
            robotic_systems: linker::distinct_names(
                &robot_records,
                &self.fields.robot_name,
                &self.robotic_systems,
            ),
            duplicate_company_names: linker::duplicate_names(
                &company_records,
                &self.fields.company_name,
            ),
            duplicate_robot_names: linker::duplicate_names(&robot_records, &self.fields.robot_name),
        })
    }

    // -----------------------------------------------------------------------
    // Fetch helpers
    // -----------------------------------------------------------------------

    async fn fetch_questions(&self) -> Result<Vec<Question>, AnswerError> {
        let records = self.fetch_records(&self.tables.questions).await?;
        Ok(records
            .iter()
            .map(|r| Question::from_record(r, &self.fields))
            .collect())
    }

    async fn fetch_records(&self, table: &T) -> Result<Vec<Record>, AnswerError> {
        table.list_all().await.map_err(|e| {
            tracing::warn!(error = %e, "fetching records failed");
            AnswerError::Fetch(e)
        })
    }
}

fn wants_link(choice: Option<&LinkChoice>) -> bool {
    choice.is_some_and(|c| !c.is_blank())
}
