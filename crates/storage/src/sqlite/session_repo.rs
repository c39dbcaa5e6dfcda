use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use assess_core::model::{EmployeeRow, UserId, UserSession};

use super::SqliteRepository;
use crate::repository::{SessionRepository, StorageError};

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<UserSession>, StorageError> {
        let row = sqlx::query("SELECT payload FROM local_session WHERE id = 1")
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_session(&self, session: &UserSession) -> Result<(), StorageError> {
        let payload = serde_json::to_string(session)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        sqlx::query(
            r"
            INSERT INTO local_session (id, payload, updated_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(payload)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_session WHERE id = 1")
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn load_selected_employee(&self) -> Result<Option<EmployeeRow>, StorageError> {
        let row = sqlx::query("SELECT payload FROM selected_employee WHERE id = 1")
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_selected_employee(&self, employee: &EmployeeRow) -> Result<(), StorageError> {
        let payload = serde_json::to_string(employee)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        sqlx::query(
            r"
            INSERT INTO selected_employee (id, payload, updated_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(payload)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn load_roster(&self) -> Result<Vec<EmployeeRow>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT employee_id, position, name,
                   self_assessment_done, manager_assessment_done
            FROM roster_cache
            ORDER BY position
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let employee_id: i64 = row
                    .try_get("employee_id")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let position: i64 = row
                    .try_get("position")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let name: String = row
                    .try_get("name")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let self_done: i64 = row
                    .try_get("self_assessment_done")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let manager_done: i64 = row
                    .try_get("manager_assessment_done")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;

                let employee_id = u64::try_from(employee_id).map_err(|_| {
                    StorageError::Serialization("negative employee id".into())
                })?;
                let position = usize::try_from(position)
                    .map_err(|_| StorageError::Serialization("negative position".into()))?;

                Ok(EmployeeRow {
                    position,
                    id: UserId::new(employee_id),
                    name,
                    self_assessment_done: self_done == 1,
                    manager_assessment_done: manager_done == 1,
                })
            })
            .collect()
    }

    async fn save_roster(&self, rows: &[EmployeeRow]) -> Result<(), StorageError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM roster_cache")
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let now = Utc::now();
        for row in rows {
            let employee_id = i64::try_from(row.id.value())
                .map_err(|_| StorageError::Serialization("employee id overflow".into()))?;
            let position = i64::try_from(row.position)
                .map_err(|_| StorageError::Serialization("position overflow".into()))?;
            sqlx::query(
                r"
                INSERT INTO roster_cache (
                    employee_id, position, name,
                    self_assessment_done, manager_assessment_done, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(employee_id)
            .bind(position)
            .bind(&row.name)
            .bind(i64::from(row.self_assessment_done))
            .bind(i64::from(row.manager_assessment_done))
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
