use std::sync::Arc;

use tracing::warn;

use assess_core::flow::QuizPlan;
use assess_core::model::{SectionId, SubSectionGroup, group_for_section};

use crate::api::AssessmentApi;

/// Builds quiz plans and section question screens from the REST data.
///
/// Fetch failures degrade rather than abort: a failed sections fetch falls
/// back to a placeholder plan (self flow) or an empty plan (manager flow),
/// and a failed question fetch renders an empty screen.
#[derive(Clone)]
pub struct QuizService {
    api: Arc<dyn AssessmentApi>,
}

impl QuizService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// The self-assessment flow for a user, filtered by manager status.
    pub async fn self_assessment_plan(&self, user_is_manager: bool) -> QuizPlan {
        match self.api.sections().await {
            Ok(sections) => QuizPlan::self_assessment(&sections, user_is_manager),
            Err(error) => {
                warn!(%error, "sections fetch failed, using placeholder flow");
                QuizPlan::fallback_self_assessment()
            }
        }
    }

    /// The manager-evaluation flow. A failed fetch leaves only the terminal
    /// results step.
    pub async fn manager_evaluation_plan(&self) -> QuizPlan {
        match self.api.sections().await {
            Ok(sections) => QuizPlan::manager_evaluation(&sections),
            Err(error) => {
                warn!(%error, "sections fetch failed, manager flow is empty");
                QuizPlan::manager_evaluation(&[])
            }
        }
    }

    /// Everything one section screen needs: its sub-sections with their
    /// questions and choices, in API order. Any failed fetch yields an
    /// empty screen.
    pub async fn section_questions(&self, section: SectionId) -> Vec<SubSectionGroup> {
        let (sub_sections, questions, choices) = futures::join!(
            self.api.sub_sections(),
            self.api.questions(),
            self.api.choices(),
        );
        let (sub_sections, questions, choices) = match (sub_sections, questions, choices) {
            (Ok(s), Ok(q), Ok(c)) => (s, q, c),
            (s, q, c) => {
                for error in [s.err(), q.err(), c.err()].into_iter().flatten() {
                    warn!(%section, %error, "question data fetch failed");
                }
                return Vec::new();
            }
        };
        group_for_section(section, &sub_sections, &questions, &choices)
    }
}
