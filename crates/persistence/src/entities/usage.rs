//! API usage entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the api_usage table.
///
/// One row per (tenant, period); the period is a YYYY-MM string so the
/// monthly AI budget resets naturally at the month boundary.
#[derive(Debug, Clone, FromRow)]
pub struct ApiUsageEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub period: String,
    pub ai_requests_count: i32,
    pub storage_used_mb: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
