use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use assess_core::model::{AnswerSheet, EvaluationTarget, QuestionId, UserId};

use crate::api::{AssessmentApi, CompletionFlag};
use crate::error::SubmissionError;

/// One answer write that did not reach the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAnswer {
    pub question_id: QuestionId,
    pub error: String,
}

/// What happened to the completion flag at the end of the saga.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagUpdate {
    /// Not attempted because at least one answer failed.
    Skipped,
    Succeeded,
    Failed(String),
}

/// Outcome of a submission attempt.
///
/// The legacy client silently dropped failed answer writes and advanced
/// anyway; this report makes the partial outcomes explicit so callers can
/// retry or surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub written: Vec<QuestionId>,
    pub failed: Vec<FailedAnswer>,
    pub flag_update: FlagUpdate,
}

impl SubmissionReport {
    /// Every answer landed and, when requested, the flag was set.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && !matches!(self.flag_update, FlagUpdate::Failed(_))
    }
}

/// Runs the two-phase submission: every answer first, the completion flag
/// only after all of them succeed.
#[derive(Clone)]
pub struct SubmissionWorkflow {
    api: Arc<dyn AssessmentApi>,
}

impl SubmissionWorkflow {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// Validates the sheet against `questions`, posts one answer per
    /// question concurrently, then sets `flag` if every write succeeded.
    ///
    /// `flag` is `None` on intermediate section screens, where only the
    /// final section's submission marks the assessment complete.
    pub async fn submit(
        &self,
        sheet: &AnswerSheet,
        questions: &[QuestionId],
        submitter: UserId,
        target: EvaluationTarget,
        flag: Option<CompletionFlag>,
    ) -> Result<SubmissionReport, SubmissionError> {
        let unanswered = sheet.unanswered(questions);
        if !unanswered.is_empty() {
            return Err(SubmissionError::Incomplete { unanswered });
        }

        let submissions = sheet.submissions(submitter, target);
        let outcomes = join_all(submissions.iter().map(|answer| async move {
            let result = self.api.submit_answer(answer).await;
            (answer.question_id, result)
        }))
        .await;

        let mut written = Vec::new();
        let mut failed = Vec::new();
        for (question_id, result) in outcomes {
            match result {
                Ok(()) => written.push(question_id),
                Err(error) => {
                    warn!(%question_id, %error, "answer submission failed");
                    failed.push(FailedAnswer {
                        question_id,
                        error: error.to_string(),
                    });
                }
            }
        }

        // The flag belongs to whoever was assessed, not to whoever typed.
        let flag_subject = target.flag_subject(submitter);
        let flag_update = match (flag, failed.is_empty()) {
            (None, _) | (Some(_), false) => FlagUpdate::Skipped,
            (Some(flag), true) => match self.api.set_completion_flag(flag_subject, flag).await {
                Ok(()) => {
                    info!(user_id = %flag_subject, field = flag.field_name(), "completion flag set");
                    FlagUpdate::Succeeded
                }
                Err(error) => {
                    warn!(user_id = %flag_subject, %error, "completion flag update failed");
                    FlagUpdate::Failed(error.to_string())
                }
            },
        };

        Ok(SubmissionReport {
            written,
            failed,
            flag_update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::ChoiceId;
    use crate::api::FakeApi;

    fn answered_sheet(questions: &[QuestionId]) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for (i, question) in questions.iter().enumerate() {
            sheet.select(*question, ChoiceId::new(100 + i as u64));
        }
        sheet
    }

    #[tokio::test]
    async fn incomplete_sheet_is_rejected_before_any_request() {
        let api = FakeApi::new();
        let workflow = SubmissionWorkflow::new(Arc::new(api.clone()));
        let questions = vec![QuestionId::new(1), QuestionId::new(2)];
        let mut sheet = AnswerSheet::new();
        sheet.select(QuestionId::new(1), ChoiceId::new(10));

        let err = workflow
            .submit(
                &sheet,
                &questions,
                UserId::new(5),
                EvaluationTarget::SelfAssessment,
                Some(CompletionFlag::SelfAssessment),
            )
            .await
            .unwrap_err();

        let SubmissionError::Incomplete { unanswered } = err;
        assert_eq!(unanswered, vec![QuestionId::new(2)]);
        assert!(api.events().is_empty());
    }

    #[tokio::test]
    async fn flag_written_only_after_every_answer() {
        let api = FakeApi::new();
        let workflow = SubmissionWorkflow::new(Arc::new(api.clone()));
        let questions = vec![QuestionId::new(1), QuestionId::new(2), QuestionId::new(3)];
        let sheet = answered_sheet(&questions);

        let report = workflow
            .submit(
                &sheet,
                &questions,
                UserId::new(5),
                EvaluationTarget::SelfAssessment,
                Some(CompletionFlag::SelfAssessment),
            )
            .await
            .unwrap();

        assert!(report.is_complete_success());
        assert_eq!(report.written.len(), 3);
        assert_eq!(report.flag_update, FlagUpdate::Succeeded);

        let events = api.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[3],
            crate::api::FakeEvent::FlagUpdate(UserId::new(5), CompletionFlag::SelfAssessment)
        );
        assert_eq!(api.recorded_answers().len(), 3);
    }

    #[tokio::test]
    async fn failed_answer_skips_the_flag() {
        let api = FakeApi::new();
        api.fail_answers_for(QuestionId::new(2));
        let workflow = SubmissionWorkflow::new(Arc::new(api.clone()));
        let questions = vec![QuestionId::new(1), QuestionId::new(2)];
        let sheet = answered_sheet(&questions);

        let report = workflow
            .submit(
                &sheet,
                &questions,
                UserId::new(5),
                EvaluationTarget::SelfAssessment,
                Some(CompletionFlag::SelfAssessment),
            )
            .await
            .unwrap();

        assert!(!report.is_complete_success());
        assert_eq!(report.written, vec![QuestionId::new(1)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].question_id, QuestionId::new(2));
        assert_eq!(report.flag_update, FlagUpdate::Skipped);
        assert!(
            !api.events()
                .iter()
                .any(|e| matches!(e, crate::api::FakeEvent::FlagUpdate(..)))
        );
    }

    #[tokio::test]
    async fn manager_flow_flags_the_evaluated_employee() {
        let api = FakeApi::new();
        let workflow = SubmissionWorkflow::new(Arc::new(api.clone()));
        let questions = vec![QuestionId::new(1)];
        let sheet = answered_sheet(&questions);
        let manager = UserId::new(1);
        let employee = UserId::new(9);

        let report = workflow
            .submit(
                &sheet,
                &questions,
                manager,
                EvaluationTarget::Employee(employee),
                Some(CompletionFlag::ManagerAssessment),
            )
            .await
            .unwrap();

        assert_eq!(report.flag_update, FlagUpdate::Succeeded);
        let flags: Vec<_> = api
            .events()
            .into_iter()
            .filter(|e| matches!(e, crate::api::FakeEvent::FlagUpdate(..)))
            .collect();
        assert_eq!(
            flags,
            vec![crate::api::FakeEvent::FlagUpdate(
                employee,
                CompletionFlag::ManagerAssessment
            )]
        );
    }

    #[tokio::test]
    async fn intermediate_sections_never_touch_the_flag() {
        let api = FakeApi::new();
        let workflow = SubmissionWorkflow::new(Arc::new(api.clone()));
        let questions = vec![QuestionId::new(1)];
        let sheet = answered_sheet(&questions);

        let report = workflow
            .submit(
                &sheet,
                &questions,
                UserId::new(5),
                EvaluationTarget::Employee(UserId::new(9)),
                None,
            )
            .await
            .unwrap();

        assert_eq!(report.flag_update, FlagUpdate::Skipped);
        assert_eq!(api.recorded_answers()[0].target_user_id, 9);
    }
}
