use std::sync::Arc;

use services::{
    CatalogService, Clock, QuizService, RegistrationService, ResultsService, RosterService,
    SessionStore, SubmissionWorkflow, TipsService,
};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn sessions(&self) -> SessionStore;
    fn quiz(&self) -> Arc<QuizService>;
    fn submission(&self) -> Arc<SubmissionWorkflow>;
    fn results(&self) -> Arc<ResultsService>;
    fn registration(&self) -> Arc<RegistrationService>;
    fn roster(&self) -> Arc<RosterService>;
    fn tips(&self) -> Arc<TipsService>;
    fn catalog(&self) -> Arc<CatalogService>;
}

#[derive(Clone)]
pub struct AppContext {
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

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            sessions: app.sessions(),
            quiz: app.quiz(),
            submission: app.submission(),
            results: app.results(),
            registration: app.registration(),
            roster: app.roster(),
            tips: app.tips(),
            catalog: app.catalog(),
        }
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
