use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::{AssessmentApi, FakeApi, HttpApi};
use crate::catalog_service::CatalogService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;
use crate::registration_service::RegistrationService;
use crate::results_service::ResultsService;
use crate::roster_service::RosterService;
use crate::session_store::SessionStore;
use crate::submission::SubmissionWorkflow;
use crate::tips_service::TipsService;

/// Assembles app-facing services around one API client and one storage
/// backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    sessions: SessionStore,
    quiz: Arc<QuizService>,
    submission: Arc<SubmissionWorkflow>,
    results: Arc<ResultsService>,
    registration: Arc<RegistrationService>,
    roster: Arc<RosterService>,
    tips: Arc<TipsService>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Builds services backed by `SQLite` storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api_config: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn AssessmentApi> = Arc::new(HttpApi::new(api_config));
        Self::assemble(storage, api, clock).await
    }

    /// Builds services over in-memory storage and the in-memory API, for
    /// tests and prototyping.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the session store cannot start.
    pub async fn new_in_memory(api: FakeApi, clock: Clock) -> Result<Self, AppServicesError> {
        Self::assemble(Storage::in_memory(), Arc::new(api), clock).await
    }

    async fn assemble(
        storage: Storage,
        api: Arc<dyn AssessmentApi>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let sessions = SessionStore::open(Arc::clone(&storage.sessions)).await?;

        let quiz = Arc::new(QuizService::new(Arc::clone(&api)));
        let submission = Arc::new(SubmissionWorkflow::new(Arc::clone(&api)));
        let results = Arc::new(ResultsService::new(Arc::clone(&api)));
        let registration = Arc::new(RegistrationService::new(Arc::clone(&api)));
        let roster = Arc::new(RosterService::new(Arc::clone(&api), sessions.clone()));
        let tips = Arc::new(TipsService::new(Arc::clone(&api)));
        let catalog = Arc::new(CatalogService::new(api));

        Ok(Self {
            clock,
            sessions,
            quiz,
            submission,
            results,
            registration,
            roster,
            tips,
            catalog,
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn sessions(&self) -> SessionStore {
        self.sessions.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn submission(&self) -> Arc<SubmissionWorkflow> {
        Arc::clone(&self.submission)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn registration(&self) -> Arc<RegistrationService> {
        Arc::clone(&self.registration)
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }

    #[must_use]
    pub fn tips(&self) -> Arc<TipsService> {
        Arc::clone(&self.tips)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
