use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use assess_core::model::{
    AnswerSubmission, Choice, EmployeeRecord, OrganizationId, Question, QuestionId, Section,
    SubSection, SubsectionResult, UserId, UserProfile,
};

use super::{
    AssessmentApi, BlogPost, Category, CompletionFlag, ContactInfo, Course, CoursePage,
    CourseQuery,
};
use crate::error::ApiError;

/// A recorded interaction, in call order. Useful for asserting that the
/// completion flag is written only after every answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    Answer(QuestionId),
    FlagUpdate(UserId, CompletionFlag),
}

#[derive(Default)]
struct FakeState {
    sections: Vec<Section>,
    sub_sections: Vec<SubSection>,
    questions: Vec<Question>,
    choices: Vec<Choice>,
    profiles: HashMap<u64, UserProfile>,
    answers: Vec<AnswerSubmission>,
    events: Vec<FakeEvent>,
    fail_answers_for: HashSet<QuestionId>,
    fail_sections: bool,
    fail_roster: bool,
    subsection_results: HashMap<u64, Vec<SubsectionResult>>,
    final_results: HashMap<u64, Vec<SubsectionResult>>,
    roster: Vec<EmployeeRecord>,
    tips: HashMap<u64, String>,
    courses: Vec<Course>,
    main_categories: Vec<String>,
    sub_categories: HashMap<String, Vec<String>>,
    competencies: HashMap<String, Vec<String>>,
    categories: Vec<Category>,
    blogs: Vec<BlogPost>,
    contact: ContactInfo,
}

/// In-memory implementation of [`AssessmentApi`] for tests and prototyping.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn set_reference_data(
        &self,
        sections: Vec<Section>,
        sub_sections: Vec<SubSection>,
        questions: Vec<Question>,
        choices: Vec<Choice>,
    ) {
        let mut state = self.state.lock().expect("fake state poisoned");
        state.sections = sections;
        state.sub_sections = sub_sections;
        state.questions = questions;
        state.choices = choices;
    }

    /// Makes the sections fetch fail, to exercise fallback plans.
    pub fn fail_sections(&self) {
        self.state.lock().expect("fake state poisoned").fail_sections = true;
    }

    /// Makes answer submissions for one question fail.
    pub fn fail_answers_for(&self, question: QuestionId) {
        self.state
            .lock()
            .expect("fake state poisoned")
            .fail_answers_for
            .insert(question);
    }

    /// Makes the roster fetch fail, to exercise the offline cache.
    pub fn fail_roster(&self) {
        self.state.lock().expect("fake state poisoned").fail_roster = true;
    }

    pub fn set_roster(&self, roster: Vec<EmployeeRecord>) {
        self.state.lock().expect("fake state poisoned").roster = roster;
    }

    pub fn set_final_results(&self, user: UserId, rows: Vec<SubsectionResult>) {
        self.state
            .lock()
            .expect("fake state poisoned")
            .final_results
            .insert(user.value(), rows);
    }

    pub fn set_subsection_results(&self, user: UserId, rows: Vec<SubsectionResult>) {
        self.state
            .lock()
            .expect("fake state poisoned")
            .subsection_results
            .insert(user.value(), rows);
    }

    pub fn set_courses(&self, courses: Vec<Course>) {
        self.state.lock().expect("fake state poisoned").courses = courses;
    }

    pub fn set_main_categories(&self, categories: Vec<String>) {
        self.state
            .lock()
            .expect("fake state poisoned")
            .main_categories = categories;
    }

    pub fn set_sub_categories(&self, category: &str, subs: Vec<String>) {
        self.state
            .lock()
            .expect("fake state poisoned")
            .sub_categories
            .insert(category.to_string(), subs);
    }

    #[must_use]
    pub fn recorded_answers(&self) -> Vec<AnswerSubmission> {
        self.state.lock().expect("fake state poisoned").answers.clone()
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn events(&self) -> Vec<FakeEvent> {
        self.state.lock().expect("fake state poisoned").events.clone()
    }

    #[must_use]
    pub fn saved_tips_for(&self, user: UserId) -> Option<String> {
        self.state
            .lock()
            .expect("fake state poisoned")
            .tips
            .get(&user.value())
            .cloned()
    }
}

#[async_trait]
impl AssessmentApi for FakeApi {
    async fn sections(&self) -> Result<Vec<Section>, ApiError> {
        let state = self.lock()?;
        if state.fail_sections {
            return Err(ApiError::Decode("sections unavailable".into()));
        }
        Ok(state.sections.clone())
    }

    async fn sub_sections(&self) -> Result<Vec<SubSection>, ApiError> {
        Ok(self.lock()?.sub_sections.clone())
    }

    async fn questions(&self) -> Result<Vec<Question>, ApiError> {
        Ok(self.lock()?.questions.clone())
    }

    async fn choices(&self) -> Result<Vec<Choice>, ApiError> {
        Ok(self.lock()?.choices.clone())
    }

    async fn user_profile(&self, user: UserId) -> Result<Option<UserProfile>, ApiError> {
        Ok(self.lock()?.profiles.get(&user.value()).cloned())
    }

    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        self.lock()?
            .profiles
            .insert(profile.user_id.value(), profile.clone());
        Ok(())
    }

    async fn submit_answer(&self, answer: &AnswerSubmission) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        if state.fail_answers_for.contains(&answer.question_id) {
            return Err(ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        // Create-or-update, keyed by submitter/question/target.
        state.answers.retain(|existing| {
            !(existing.user_id == answer.user_id
                && existing.question_id == answer.question_id
                && existing.target_user_id == answer.target_user_id)
        });
        state.answers.push(answer.clone());
        state.events.push(FakeEvent::Answer(answer.question_id));
        Ok(())
    }

    async fn set_completion_flag(
        &self,
        user: UserId,
        flag: CompletionFlag,
    ) -> Result<(), ApiError> {
        self.lock()?.events.push(FakeEvent::FlagUpdate(user, flag));
        Ok(())
    }

    async fn manager_subsection_results(
        &self,
        user: UserId,
    ) -> Result<Vec<SubsectionResult>, ApiError> {
        Ok(self
            .lock()?
            .subsection_results
            .get(&user.value())
            .cloned()
            .unwrap_or_default())
    }

    async fn final_results(&self, user: UserId) -> Result<Vec<SubsectionResult>, ApiError> {
        Ok(self
            .lock()?
            .final_results
            .get(&user.value())
            .cloned()
            .unwrap_or_default())
    }

    async fn employees(
        &self,
        _manager: UserId,
        _organization: OrganizationId,
    ) -> Result<Vec<EmployeeRecord>, ApiError> {
        let state = self.lock()?;
        if state.fail_roster {
            return Err(ApiError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(state.roster.clone())
    }

    async fn saved_tips(&self, user: UserId) -> Result<Option<String>, ApiError> {
        Ok(self
            .lock()?
            .tips
            .get(&user.value())
            .filter(|tips| !tips.trim().is_empty())
            .cloned())
    }

    async fn save_tips(&self, user: UserId, tips: &str) -> Result<(), ApiError> {
        self.lock()?.tips.insert(user.value(), tips.to_string());
        Ok(())
    }

    async fn courses(&self, query: &CourseQuery) -> Result<CoursePage, ApiError> {
        let state = self.lock()?;
        let filtered: Vec<Course> = state
            .courses
            .iter()
            .filter(|course| {
                query
                    .category
                    .as_ref()
                    .is_none_or(|category| &course.category == category)
                    && query
                        .sub_category
                        .as_ref()
                        .is_none_or(|sub| &course.sub_category == sub)
                    && query.city.as_ref().is_none_or(|city| &course.city == city)
                    && query
                        .duration
                        .as_ref()
                        .is_none_or(|duration| &course.duration == duration)
                    && query.search.as_ref().is_none_or(|needle| {
                        course
                            .title
                            .to_lowercase()
                            .contains(&needle.to_lowercase())
                    })
            })
            .cloned()
            .collect();
        let total = u32::try_from(filtered.len()).unwrap_or(u32::MAX);
        let limit = query.limit.max(1);
        Ok(CoursePage {
            courses: filtered,
            total_pages: total.div_ceil(limit).max(1),
            total_courses: total,
        })
    }

    async fn main_categories(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.lock()?.main_categories.clone())
    }

    async fn sub_categories(&self, category: &str) -> Result<Vec<String>, ApiError> {
        Ok(self
            .lock()?
            .sub_categories
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn competencies(&self, category: &str) -> Result<Vec<String>, ApiError> {
        Ok(self
            .lock()?
            .competencies
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn popular_courses(&self) -> Result<Vec<Course>, ApiError> {
        Ok(self.lock()?.courses.iter().take(6).cloned().collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.lock()?.categories.clone())
    }

    async fn blogs(&self) -> Result<Vec<BlogPost>, ApiError> {
        Ok(self.lock()?.blogs.clone())
    }

    async fn contact(&self) -> Result<ContactInfo, ApiError> {
        Ok(self.lock()?.contact.clone())
    }
}
