use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{ChoiceId, QuestionId, UserId};

/// Who an answer batch evaluates.
///
/// The wire format encodes self-assessment as `target_user_id = 0` and a
/// manager evaluation as the evaluated employee's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationTarget {
    SelfAssessment,
    Employee(UserId),
}

impl EvaluationTarget {
    /// The `target_user_id` wire value.
    #[must_use]
    pub fn wire_value(&self) -> u64 {
        match self {
            EvaluationTarget::SelfAssessment => 0,
            EvaluationTarget::Employee(id) => id.value(),
        }
    }

    /// Whose completion flag a submission under this target updates.
    ///
    /// A self assessment flags the submitter; a manager evaluation flags the
    /// evaluated employee, not the manager filling it in.
    #[must_use]
    pub fn flag_subject(&self, submitter: UserId) -> UserId {
        match self {
            EvaluationTarget::SelfAssessment => submitter,
            EvaluationTarget::Employee(id) => *id,
        }
    }
}

/// A single answer ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    pub target_user_id: u64,
}

/// Accumulates one selected choice per question.
///
/// Selection follows radio-button semantics: last write wins, at most one
/// choice per question id at a time. The sheet is created empty per quiz
/// screen and discarded after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: BTreeMap<QuestionId, ChoiceId>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a choice for a question, replacing any prior selection.
    pub fn select(&mut self, question: QuestionId, choice: ChoiceId) {
        self.selections.insert(question, choice);
    }

    /// The currently selected choice for a question, if any.
    #[must_use]
    pub fn selected(&self, question: QuestionId) -> Option<ChoiceId> {
        self.selections.get(&question).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Question ids from `questions` that have no selection yet, in input
    /// order. An empty return means the sheet is complete for that set.
    #[must_use]
    pub fn unanswered(&self, questions: &[QuestionId]) -> Vec<QuestionId> {
        questions
            .iter()
            .filter(|id| !self.selections.contains_key(id))
            .copied()
            .collect()
    }

    /// Whether every question in `questions` has a selection.
    #[must_use]
    pub fn is_complete(&self, questions: &[QuestionId]) -> bool {
        self.unanswered(questions).is_empty()
    }

    /// Expands the sheet into per-question submissions for the given
    /// submitter and target.
    #[must_use]
    pub fn submissions(&self, user: UserId, target: EvaluationTarget) -> Vec<AnswerSubmission> {
        self.selections
            .iter()
            .map(|(question_id, choice_id)| AnswerSubmission {
                user_id: user,
                question_id: *question_id,
                choice_id: *choice_id,
                target_user_id: target.wire_value(),
            })
            .collect()
    }
}
