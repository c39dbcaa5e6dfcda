use std::sync::Arc;

use tracing::warn;

use assess_core::model::{
    SectionAverage, SectionResults, UserId, compute_averages, group_by_section,
};

use crate::api::AssessmentApi;

/// Per-section detail plus the section averages, ready for the dashboards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsOverview {
    pub sections: Vec<SectionResults>,
    pub averages: Vec<SectionAverage>,
}

impl ResultsOverview {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Fetches result rows and shapes them for the results screens.
///
/// Fetch failures degrade to an empty overview so the dashboard renders its
/// empty state instead of an error page.
#[derive(Clone)]
pub struct ResultsService {
    api: Arc<dyn AssessmentApi>,
}

impl ResultsService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// The manager's evaluation results for one employee.
    pub async fn manager_overview(&self, employee: UserId) -> ResultsOverview {
        match self.api.manager_subsection_results(employee).await {
            Ok(rows) => overview_from_rows(rows),
            Err(error) => {
                warn!(user_id = %employee, %error, "manager results fetch failed");
                empty_overview()
            }
        }
    }

    /// The combined final results for one employee, available once both
    /// assessments are complete.
    pub async fn final_overview(&self, employee: UserId) -> ResultsOverview {
        match self.api.final_results(employee).await {
            Ok(rows) => overview_from_rows(rows),
            Err(error) => {
                warn!(user_id = %employee, %error, "final results fetch failed");
                empty_overview()
            }
        }
    }
}

fn overview_from_rows(rows: Vec<assess_core::model::SubsectionResult>) -> ResultsOverview {
    ResultsOverview {
        sections: group_by_section(&rows),
        averages: compute_averages(&rows),
    }
}

fn empty_overview() -> ResultsOverview {
    ResultsOverview {
        sections: Vec::new(),
        averages: Vec::new(),
    }
}
