use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use assess_core::model::{EmployeeRow, UserSession};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for locally persisted session state.
///
/// This replaces the browser's `localStorage` keys (`user`,
/// `selectedEmployee`, `employees`) with an explicit, injected store. All
/// three slots survive restarts; the quiz answer sheet deliberately does
/// not.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the signed-in user, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failure.
    async fn load_session(&self) -> Result<Option<UserSession>, StorageError>;

    /// Persist or replace the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &UserSession) -> Result<(), StorageError>;

    /// Remove the stored user (sign-out).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection failure.
    async fn clear_session(&self) -> Result<(), StorageError>;

    /// Fetch the manager-flow target employee, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failure.
    async fn load_selected_employee(&self) -> Result<Option<EmployeeRow>, StorageError>;

    /// Persist or replace the manager-flow target employee.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn save_selected_employee(&self, employee: &EmployeeRow) -> Result<(), StorageError>;

    /// Fetch the cached roster, empty when nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failure.
    async fn load_roster(&self) -> Result<Vec<EmployeeRow>, StorageError>;

    /// Replace the cached roster wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the rows cannot be stored.
    async fn save_roster(&self, rows: &[EmployeeRow]) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    session: Arc<Mutex<Option<UserSession>>>,
    selected: Arc<Mutex<Option<EmployeeRow>>>,
    roster: Arc<Mutex<Vec<EmployeeRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<UserSession>, StorageError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_session(&self, session: &UserSession) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }

    async fn load_selected_employee(&self) -> Result<Option<EmployeeRow>, StorageError> {
        let guard = self
            .selected
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_selected_employee(&self, employee: &EmployeeRow) -> Result<(), StorageError> {
        let mut guard = self
            .selected
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(employee.clone());
        Ok(())
    }

    async fn load_roster(&self) -> Result<Vec<EmployeeRow>, StorageError> {
        let guard = self
            .roster
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_roster(&self, rows: &[EmployeeRow]) -> Result<(), StorageError> {
        let mut guard = self
            .roster
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = rows.to_vec();
        Ok(())
    }
}

/// Aggregates the session repository behind a trait object for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            sessions: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::{OrganizationId, UserId};

    #[tokio::test]
    async fn round_trips_session() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_session().await.unwrap().is_none());

        let session = UserSession::new(UserId::new(1), OrganizationId::new(2), 3);
        repo.save_session(&session).await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), Some(session));

        repo.clear_session().await.unwrap();
        assert!(repo.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn roster_replaces_wholesale() {
        let repo = InMemoryRepository::new();
        let row = EmployeeRow {
            position: 1,
            id: UserId::new(9),
            name: "Lina Haddad".into(),
            self_assessment_done: true,
            manager_assessment_done: false,
        };
        repo.save_roster(std::slice::from_ref(&row)).await.unwrap();
        assert_eq!(repo.load_roster().await.unwrap().len(), 1);

        repo.save_roster(&[]).await.unwrap();
        assert!(repo.load_roster().await.unwrap().is_empty());
    }
}
