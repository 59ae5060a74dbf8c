//! Wizard session repository for database operations.
//!
//! Sessions live in the public schema and hold only transient signup
//! progress; finalization clears the payload in the same transaction that
//! creates the durable user and pending-website rows.

use chrono::{Duration, Utc};
use domain::models::wizard::WizardData;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::wizard_session::WizardSessionEntity;

const SESSION_COLUMNS: &str =
    "id, token_hash, data, current_step, created_at, updated_at, expires_at, completed_at";

/// Wizard sessions expire after 24 hours of first contact.
const SESSION_TTL_HOURS: i64 = 24;

/// Repository for signup wizard sessions.
#[derive(Clone)]
pub struct WizardSessionRepository {
    pool: PgPool,
}

impl WizardSessionRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a fresh session for a hashed token.
    pub async fn create(&self, token_hash: &str) -> Result<WizardSessionEntity, sqlx::Error> {
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        let sql = format!(
            "INSERT INTO wizard_sessions (token_hash, data, current_step, expires_at) \
             VALUES ($1, '{{}}', 1, $2) RETURNING {}",
            SESSION_COLUMNS
        );
        sqlx::query_as::<_, WizardSessionEntity>(&sql)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await
    }

    /// Find a live (unexpired, uncompleted) session by its hashed token.
    pub async fn find_live_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<WizardSessionEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM wizard_sessions \
             WHERE token_hash = $1 AND completed_at IS NULL AND expires_at > NOW()",
            SESSION_COLUMNS
        );
        sqlx::query_as::<_, WizardSessionEntity>(&sql)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
    }

    /// Persist accumulated data and the session's position.
    ///
    /// Concurrent submissions of the same step race last-write-wins;
    /// that is accepted behavior for a per-browser-session record.
    pub async fn save_progress(
        &self,
        id: Uuid,
        data: &WizardData,
        current_step: i16,
    ) -> Result<(), sqlx::Error> {
        let payload = serde_json::to_value(data)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        sqlx::query(
            "UPDATE wizard_sessions SET data = $2, current_step = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(payload)
        .bind(current_step)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Drop expired sessions. Returns how many were removed.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM wizard_sessions WHERE expires_at <= NOW() AND completed_at IS NULL",
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
