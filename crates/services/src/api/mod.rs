//! Typed REST API boundary.
//!
//! All responses are deserialized into typed structs at this boundary;
//! malformed payloads surface as structured [`ApiError`] values instead of
//! propagating loose values through the joins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use assess_core::model::{
    AnswerSubmission, Choice, EmployeeRecord, OrganizationId, Question, Section, SubSection,
    SubsectionResult, UserId, UserProfile,
};

use crate::error::ApiError;

mod fake;
mod http;

pub use fake::{FakeApi, FakeEvent};
pub use http::HttpApi;

/// Completion flag written on a user record after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFlag {
    SelfAssessment,
    ManagerAssessment,
}

impl CompletionFlag {
    /// Wire field name for the partial user update.
    ///
    /// The legacy client also sent an all-lowercase manager variant from one
    /// call site; this client standardizes on the camel-case spelling (see
    /// DESIGN.md).
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            CompletionFlag::SelfAssessment => "assessment_completed",
            CompletionFlag::ManagerAssessment => "managerAssessment_completed",
        }
    }
}

/// Query parameters for the paginated course search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub city: Option<String>,
    pub duration: Option<String>,
    pub search: Option<String>,
    pub competencies: Vec<String>,
    pub page: u32,
    pub limit: u32,
}

impl CourseQuery {
    /// First page with the default page size.
    #[must_use]
    pub fn first_page() -> Self {
        Self {
            page: 1,
            limit: 25,
            ..Self::default()
        }
    }

    /// Expands the query into URL parameters, skipping unset filters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(sub_category) = &self.sub_category {
            params.push(("subCategory", sub_category.clone()));
        }
        if let Some(city) = &self.city {
            params.push(("city", city.clone()));
        }
        if let Some(duration) = &self.duration {
            params.push(("duration", duration.clone()));
        }
        if let Some(search) = &self.search {
            if !search.is_empty() {
                params.push(("search", search.clone()));
            }
        }
        if !self.competencies.is_empty() {
            // The backend expects the competency list as a JSON array string.
            if let Ok(encoded) = serde_json::to_string(&self.competencies) {
                params.push(("competencies", encoded));
            }
        }
        params.push(("page", self.page.max(1).to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// One catalog course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub duration: String,
}

/// A page of course results plus pagination totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    pub courses: Vec<Course>,
    pub total_pages: u32,
    pub total_courses: u32,
}

/// A browsable course category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// A published blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
}

/// Contact details shown alongside the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// The REST API consumed by every workflow.
///
/// The HTTP implementation is [`HttpApi`]; [`FakeApi`] backs tests and
/// prototyping, mirroring how storage swaps between SQLite and in-memory.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// `GET /api/sections`. Unfiltered; visibility is applied client-side.
    async fn sections(&self) -> Result<Vec<Section>, ApiError>;

    /// `GET /api/sub-sections`
    async fn sub_sections(&self) -> Result<Vec<SubSection>, ApiError>;

    /// `GET /api/questions`
    async fn questions(&self) -> Result<Vec<Question>, ApiError>;

    /// `GET /api/choices`
    async fn choices(&self) -> Result<Vec<Choice>, ApiError>;

    /// `GET /api/user_info/{user_id}`. `None` when no profile exists yet.
    async fn user_profile(&self, user: UserId) -> Result<Option<UserProfile>, ApiError>;

    /// `POST /api/user_info`
    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), ApiError>;

    /// `POST /api/answers`. Create-or-update for one question.
    async fn submit_answer(&self, answer: &AnswerSubmission) -> Result<(), ApiError>;

    /// `PUT /api/users/{user_id}`. Partial update setting one completion
    /// flag.
    async fn set_completion_flag(
        &self,
        user: UserId,
        flag: CompletionFlag,
    ) -> Result<(), ApiError>;

    /// `GET /api/sections/{user_id}/manager/subsection-results`
    async fn manager_subsection_results(
        &self,
        user: UserId,
    ) -> Result<Vec<SubsectionResult>, ApiError>;

    /// `GET /api/sections/finalResults/{user_id}`
    async fn final_results(&self, user: UserId) -> Result<Vec<SubsectionResult>, ApiError>;

    /// `GET /api/users/managers/{manager_id}/{organization_id}`
    async fn employees(
        &self,
        manager: UserId,
        organization: OrganizationId,
    ) -> Result<Vec<EmployeeRecord>, ApiError>;

    /// `GET /api/users/tips/{user_id}`. `None` when nothing is saved.
    async fn saved_tips(&self, user: UserId) -> Result<Option<String>, ApiError>;

    /// `POST /api/users/{user_id}/saveTips`
    async fn save_tips(&self, user: UserId, tips: &str) -> Result<(), ApiError>;

    /// `GET /api/courses` with filter/search/pagination parameters.
    async fn courses(&self, query: &CourseQuery) -> Result<CoursePage, ApiError>;

    /// `GET /api/courses/main-category`
    async fn main_categories(&self) -> Result<Vec<String>, ApiError>;

    /// `GET /api/courses/category/{name}`. Sub-categories of one category.
    async fn sub_categories(&self, category: &str) -> Result<Vec<String>, ApiError>;

    /// `GET /api/courses/competencies/{category}`
    async fn competencies(&self, category: &str) -> Result<Vec<String>, ApiError>;

    /// `GET /api/popular-courses`
    async fn popular_courses(&self) -> Result<Vec<Course>, ApiError>;

    /// `GET /api/categories`
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// `GET /api/blogs`
    async fn blogs(&self) -> Result<Vec<BlogPost>, ApiError>;

    /// `GET /api/contact`
    async fn contact(&self) -> Result<ContactInfo, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_query_skips_unset_filters() {
        let query = CourseQuery::first_page();
        let params = query.to_params();
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("limit", "25".to_string())]
        );
    }

    #[test]
    fn course_query_encodes_competencies_as_json() {
        let query = CourseQuery {
            competencies: vec!["planning".into(), "delegation".into()],
            page: 2,
            limit: 25,
            ..CourseQuery::default()
        };
        let params = query.to_params();
        assert!(
            params
                .iter()
                .any(|(k, v)| *k == "competencies" && v == r#"["planning","delegation"]"#)
        );
        assert!(params.iter().any(|(k, v)| *k == "page" && v == "2"));
    }

    #[test]
    fn manager_flag_uses_canonical_spelling() {
        assert_eq!(
            CompletionFlag::ManagerAssessment.field_name(),
            "managerAssessment_completed"
        );
    }
}
