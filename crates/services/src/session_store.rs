use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use assess_core::model::{EmployeeRow, UserId, UserSession};
use storage::repository::SessionRepository;

use crate::error::SessionStoreError;

/// Owner of the signed-in session and the manager's employee selection.
///
/// State lives in one place and is persisted through the repository; views
/// subscribe to the watch channel instead of polling, so a sign-out in one
/// window is observed by every other window.
#[derive(Clone)]
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    sender: watch::Sender<Option<UserSession>>,
}

impl SessionStore {
    /// Loads any persisted session and starts broadcasting from it.
    pub async fn open(
        repository: Arc<dyn SessionRepository>,
    ) -> Result<Self, SessionStoreError> {
        let current = repository.load_session().await?;
        let (sender, _) = watch::channel(current);
        Ok(Self { repository, sender })
    }

    /// The session as of now, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<UserSession> {
        self.sender.borrow().clone()
    }

    /// Subscribes to session changes. The receiver observes the current
    /// value immediately and every sign-in/sign-out after it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserSession>> {
        self.sender.subscribe()
    }

    /// Persists and broadcasts a new session.
    pub async fn sign_in(&self, session: UserSession) -> Result<(), SessionStoreError> {
        self.repository.save_session(&session).await?;
        info!(user_id = %session.user_id, role_id = session.role_id, "signed in");
        self.sender.send_replace(Some(session));
        Ok(())
    }

    /// Updates the stored session in place, e.g. after a completion flag
    /// changes. No-op when signed out.
    pub async fn update<F>(&self, mutate: F) -> Result<(), SessionStoreError>
    where
        F: FnOnce(&mut UserSession),
    {
        let Some(mut session) = self.current() else {
            return Ok(());
        };
        mutate(&mut session);
        self.repository.save_session(&session).await?;
        self.sender.send_replace(Some(session));
        Ok(())
    }

    /// Clears the persisted session and broadcasts the sign-out.
    pub async fn sign_out(&self) -> Result<(), SessionStoreError> {
        self.repository.clear_session().await?;
        info!("signed out");
        self.sender.send_replace(None);
        Ok(())
    }

    /// The employee a manager picked from the roster, if any.
    pub async fn selected_employee(&self) -> Result<Option<EmployeeRow>, SessionStoreError> {
        Ok(self.repository.load_selected_employee().await?)
    }

    /// Records which employee the manager is about to evaluate.
    pub async fn select_employee(&self, employee: &EmployeeRow) -> Result<(), SessionStoreError> {
        self.repository.save_selected_employee(employee).await?;
        Ok(())
    }

    /// Marks the selected employee as evaluated after the manager's final
    /// section lands. No-op when a different employee is selected.
    pub async fn mark_employee_evaluated(
        &self,
        employee: UserId,
    ) -> Result<(), SessionStoreError> {
        let Some(mut row) = self.selected_employee().await? else {
            return Ok(());
        };
        if row.id != employee {
            return Ok(());
        }
        row.manager_assessment_done = true;
        self.repository.save_selected_employee(&row).await?;
        Ok(())
    }

    pub async fn cached_roster(&self) -> Result<Vec<EmployeeRow>, SessionStoreError> {
        Ok(self.repository.load_roster().await?)
    }

    pub async fn cache_roster(&self, roster: &[EmployeeRow]) -> Result<(), SessionStoreError> {
        self.repository.save_roster(roster).await?;
        Ok(())
    }
}
