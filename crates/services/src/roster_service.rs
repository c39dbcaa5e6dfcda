use std::sync::Arc;

use tracing::warn;

use assess_core::model::{EmployeeRow, OrganizationId, UserId};

use crate::api::AssessmentApi;
use crate::session_store::SessionStore;

/// The manager's employee roster, with an offline cache.
///
/// Each successful fetch replaces the cached rows; a failed fetch falls back
/// to whatever was cached last, so the roster screen keeps working through
/// transient API outages.
#[derive(Clone)]
pub struct RosterService {
    api: Arc<dyn AssessmentApi>,
    sessions: SessionStore,
}

impl RosterService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Display rows for the manager's employees, numbered from 1 in API
    /// order.
    pub async fn employees(
        &self,
        manager: UserId,
        organization: OrganizationId,
    ) -> Vec<EmployeeRow> {
        match self.api.employees(manager, organization).await {
            Ok(records) => {
                let rows: Vec<EmployeeRow> = records
                    .iter()
                    .enumerate()
                    .map(|(i, record)| EmployeeRow::from_record(i + 1, record))
                    .collect();
                if let Err(error) = self.sessions.cache_roster(&rows).await {
                    warn!(%error, "roster cache write failed");
                }
                rows
            }
            Err(error) => {
                warn!(%error, "roster fetch failed, serving cached rows");
                self.sessions.cached_roster().await.unwrap_or_else(|error| {
                    warn!(%error, "roster cache read failed");
                    Vec::new()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::EmployeeRecord;
    use storage::repository::InMemoryRepository;
    use crate::api::FakeApi;

    fn record(id: u64, first: &str, done: u8) -> EmployeeRecord {
        EmployeeRecord {
            id: UserId::new(id),
            first_name: first.into(),
            last_name: "Doe".into(),
            assessment_completed: done,
            manager_assessment_completed: 0,
        }
    }

    #[tokio::test]
    async fn roster_rows_are_numbered_and_cached() {
        let api = FakeApi::new();
        api.set_roster(vec![record(10, "Anna", 1), record(11, "Ben", 0)]);
        let sessions = SessionStore::open(Arc::new(InMemoryRepository::new()))
            .await
            .unwrap();
        let service = RosterService::new(Arc::new(api.clone()), sessions.clone());

        let rows = service
            .employees(UserId::new(1), OrganizationId::new(1))
            .await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].name, "Anna Doe");
        assert!(rows[0].self_assessment_done);
        assert_eq!(rows[1].position, 2);

        // A later fetch failure serves the cached rows.
        api.fail_roster();
        let cached = service
            .employees(UserId::new(1), OrganizationId::new(1))
            .await;
        assert_eq!(cached, rows);
    }

    #[tokio::test]
    async fn failed_fetch_without_cache_is_empty() {
        let api = FakeApi::new();
        api.fail_roster();
        let sessions = SessionStore::open(Arc::new(InMemoryRepository::new()))
            .await
            .unwrap();
        let service = RosterService::new(Arc::new(api), sessions);

        let rows = service
            .employees(UserId::new(1), OrganizationId::new(1))
            .await;
        assert!(rows.is_empty());
    }
}
