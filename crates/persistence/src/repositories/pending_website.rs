//! Pending website repository for database operations.

use domain::models::wizard::PendingWebsite;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::wizard_session::PendingWebsiteEntity;

const PENDING_COLUMNS: &str = "id, user_id, business_name, business_category, \
     business_description, selected_domain, custom_domain, design_style, color_scheme, \
     additional_requests, status, created_at";

/// Repository for pending website creation records.
///
/// Rows are inserted by wizard finalization (inside its transaction) and
/// consumed by the site generation pipeline.
#[derive(Clone)]
pub struct PendingWebsiteRepository {
    pool: PgPool,
}

impl PendingWebsiteRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a pending record by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PendingWebsite>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM pending_website_requests WHERE id = $1",
            PENDING_COLUMNS
        );
        let entity = sqlx::query_as::<_, PendingWebsiteEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// The most recent pending record for a user.
    pub async fn find_latest_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PendingWebsite>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM pending_website_requests \
             WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
            PENDING_COLUMNS
        );
        let entity = sqlx::query_as::<_, PendingWebsiteEntity>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Move a pending record to a new pipeline status.
    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pending_website_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
