#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod quiz_service;
pub mod registration_service;
pub mod results_service;
pub mod roster_service;
pub mod session_store;
pub mod submission;
pub mod tips_service;

pub use assess_core::Clock;

pub use api::{AssessmentApi, CompletionFlag, CourseQuery, FakeApi, HttpApi};
pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use config::{ApiConfig, ConfigError};
pub use error::{
    ApiError, AppServicesError, CatalogError, RegistrationError, SessionStoreError,
    SubmissionError,
};
pub use quiz_service::QuizService;
pub use registration_service::RegistrationService;
pub use results_service::{ResultsOverview, ResultsService};
pub use roster_service::RosterService;
pub use session_store::SessionStore;
pub use submission::{FailedAnswer, FlagUpdate, SubmissionReport, SubmissionWorkflow};
pub use tips_service::TipsService;
