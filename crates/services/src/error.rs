//! Shared error types for the services crate.

use thiserror::Error;

use assess_core::model::QuestionId;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::config::ConfigError;

/// Errors emitted by the REST client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Errors emitted by the session store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the submission workflow before any request is sent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("{} question(s) are still unanswered", unanswered.len())]
    Incomplete { unanswered: Vec<QuestionId> },
}

/// Errors emitted by the registration service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by the course catalog service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}
