use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use assess_core::model::{
    AnswerSubmission, Choice, EmployeeRecord, OrganizationId, Question, Section, SubSection,
    SubsectionResult, UserId, UserProfile,
};

use super::{
    AssessmentApi, BlogPost, Category, CompletionFlag, ContactInfo, Course, CoursePage,
    CourseQuery,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `reqwest`-backed implementation of [`AssessmentApi`].
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn send_checked(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}

/// Paginated shape of `GET /api/courses`; the endpoint may also answer with
/// a bare array, handled in [`HttpApi::courses`].
#[derive(Debug, Deserialize)]
struct PaginatedCourses {
    courses: Vec<Course>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(rename = "totalPages", default)]
    total_pages: u32,
    #[serde(rename = "totalCourses", default)]
    total_courses: u32,
}

#[derive(Debug, Deserialize)]
struct MainCategoryRow {
    category: String,
}

#[derive(Debug, Deserialize)]
struct SubCategoryRow {
    sub_category: String,
}

#[derive(Debug, Deserialize)]
struct SavedTips {
    #[serde(default)]
    tips: Option<String>,
}

#[async_trait]
impl AssessmentApi for HttpApi {
    async fn sections(&self) -> Result<Vec<Section>, ApiError> {
        self.get_json("api/sections").await
    }

    async fn sub_sections(&self) -> Result<Vec<SubSection>, ApiError> {
        self.get_json("api/sub-sections").await
    }

    async fn questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get_json("api/questions").await
    }

    async fn choices(&self) -> Result<Vec<Choice>, ApiError> {
        self.get_json("api/choices").await
    }

    async fn user_profile(&self, user: UserId) -> Result<Option<UserProfile>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("api/user_info/{user}")))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        // The endpoint answers an empty object when no profile exists yet.
        let value: Value = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        match &value {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            _ => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| ApiError::Decode(err.to_string())),
        }
    }

    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        self.send_checked(
            self.client
                .post(self.config.endpoint("api/user_info"))
                .json(profile),
        )
        .await
    }

    async fn submit_answer(&self, answer: &AnswerSubmission) -> Result<(), ApiError> {
        self.send_checked(
            self.client
                .post(self.config.endpoint("api/answers"))
                .json(answer),
        )
        .await
    }

    async fn set_completion_flag(
        &self,
        user: UserId,
        flag: CompletionFlag,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ flag.field_name(): 1 });
        self.send_checked(
            self.client
                .put(self.config.endpoint(&format!("api/users/{user}")))
                .json(&body),
        )
        .await
    }

    async fn manager_subsection_results(
        &self,
        user: UserId,
    ) -> Result<Vec<SubsectionResult>, ApiError> {
        self.get_json(&format!("api/sections/{user}/manager/subsection-results"))
            .await
    }

    async fn final_results(&self, user: UserId) -> Result<Vec<SubsectionResult>, ApiError> {
        self.get_json(&format!("api/sections/finalResults/{user}"))
            .await
    }

    async fn employees(
        &self,
        manager: UserId,
        organization: OrganizationId,
    ) -> Result<Vec<EmployeeRecord>, ApiError> {
        self.get_json(&format!("api/users/managers/{manager}/{organization}"))
            .await
    }

    async fn saved_tips(&self, user: UserId) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("api/users/tips/{user}")))
            .send()
            .await?;
        if !response.status().is_success() {
            // No saved tips yet is not an error for the caller.
            return Ok(None);
        }
        let saved: SavedTips = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(saved.tips.filter(|tips| !tips.trim().is_empty()))
    }

    async fn save_tips(&self, user: UserId, tips: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "tips": tips });
        self.send_checked(
            self.client
                .post(self.config.endpoint(&format!("api/users/{user}/saveTips")))
                .json(&body),
        )
        .await
    }

    async fn courses(&self, query: &CourseQuery) -> Result<CoursePage, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("api/courses"))
            .query(&query.to_params())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;

        // Paginated and bare-array responses both occur in the wild.
        if value.is_array() {
            let courses: Vec<Course> = serde_json::from_value(value)
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            let total = u32::try_from(courses.len()).unwrap_or(u32::MAX);
            return Ok(CoursePage {
                courses,
                total_pages: 1,
                total_courses: total,
            });
        }

        let paginated: PaginatedCourses = serde_json::from_value(value)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let total_courses = if paginated.pagination.total_courses == 0 {
            u32::try_from(paginated.courses.len()).unwrap_or(u32::MAX)
        } else {
            paginated.pagination.total_courses
        };
        Ok(CoursePage {
            courses: paginated.courses,
            total_pages: paginated.pagination.total_pages.max(1),
            total_courses,
        })
    }

    async fn main_categories(&self) -> Result<Vec<String>, ApiError> {
        let rows: Vec<MainCategoryRow> = self.get_json("api/courses/main-category").await?;
        Ok(rows.into_iter().map(|row| row.category).collect())
    }

    async fn sub_categories(&self, category: &str) -> Result<Vec<String>, ApiError> {
        let rows: Vec<SubCategoryRow> = self
            .get_json(&format!("api/courses/category/{category}"))
            .await?;
        Ok(rows.into_iter().map(|row| row.sub_category).collect())
    }

    async fn competencies(&self, category: &str) -> Result<Vec<String>, ApiError> {
        self.get_json(&format!("api/courses/competencies/{category}"))
            .await
    }

    async fn popular_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_json("api/popular-courses").await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("api/categories").await
    }

    async fn blogs(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.get_json("api/blogs").await
    }

    async fn contact(&self) -> Result<ContactInfo, ApiError> {
        self.get_json("api/contact").await
    }
}
