//! AI tool repository for database operations (tenant-scoped).

use chrono::{DateTime, Utc};
use domain::models::ai_tool::{AiRequest, AiRequestStatus, AiTool, AiToolType};
use serde_json::Value as JsonValue;
use shared::pagination::PageQuery;
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::ai_tool::{AiRequestEntity, AiRequestStatusDb, AiToolEntity, AiToolTypeDb};

const TOOL_COLUMNS: &str = "id, name, tool_type, description, is_active, max_requests_per_hour, \
     max_requests_per_day, created_at";
const REQUEST_COLUMNS: &str = "id, tool_id, prompt, parameters, response_data, output_text, \
     status, tokens_used, error_message, created_at, completed_at";

/// Repository for AI tools and their recorded invocations.
#[derive(Clone)]
pub struct AiToolRepository {
    pool: PgPool,
}

impl AiToolRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register an AI tool for the tenant.
    pub async fn create_tool(
        &self,
        ctx: &TenantContext,
        name: &str,
        tool_type: AiToolType,
        description: &str,
    ) -> Result<AiTool, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {schema}.ai_tools (name, tool_type, description) \
             VALUES ($1, $2, $3) RETURNING {columns}",
            schema = ctx.schema(),
            columns = TOOL_COLUMNS
        );
        let entity = sqlx::query_as::<_, AiToolEntity>(&sql)
            .bind(name)
            .bind(AiToolTypeDb::from(tool_type))
            .bind(description)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find a tool by ID.
    pub async fn find_tool_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<AiTool>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.ai_tools WHERE id = $1",
            TOOL_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, AiToolEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All active tools, by name.
    pub async fn list_tools(&self, ctx: &TenantContext) -> Result<Vec<AiTool>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.ai_tools WHERE is_active = true ORDER BY name",
            TOOL_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, AiToolEntity>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Record a new (pending) AI request.
    pub async fn create_request(
        &self,
        ctx: &TenantContext,
        tool_id: Uuid,
        prompt: &str,
        parameters: &JsonValue,
    ) -> Result<AiRequest, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {schema}.ai_requests (tool_id, prompt, parameters) \
             VALUES ($1, $2, $3) RETURNING {columns}",
            schema = ctx.schema(),
            columns = REQUEST_COLUMNS
        );
        let entity = sqlx::query_as::<_, AiRequestEntity>(&sql)
            .bind(tool_id)
            .bind(prompt)
            .bind(parameters)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Move a request to a terminal state with its output.
    pub async fn complete_request(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        status: AiRequestStatus,
        response_data: &JsonValue,
        output_text: &str,
        tokens_used: i32,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<AiRequest>, sqlx::Error> {
        let sql = format!(
            "UPDATE {schema}.ai_requests SET \
                status = $2, response_data = $3, output_text = $4, tokens_used = $5, \
                completed_at = $6 \
             WHERE id = $1 RETURNING {columns}",
            schema = ctx.schema(),
            columns = REQUEST_COLUMNS
        );
        let entity = sqlx::query_as::<_, AiRequestEntity>(&sql)
            .bind(id)
            .bind(AiRequestStatusDb::from(status))
            .bind(response_data)
            .bind(output_text)
            .bind(tokens_used)
            .bind(completed_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// List recorded requests, newest first.
    pub async fn list_requests(
        &self,
        ctx: &TenantContext,
        query: &PageQuery,
    ) -> Result<(Vec<AiRequest>, i64), sqlx::Error> {
        let count_sql = format!("SELECT COUNT(*) FROM {}.ai_requests", ctx.schema());
        let total: i64 = sqlx::query_scalar(&count_sql).fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {} FROM {}.ai_requests ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            REQUEST_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, AiRequestEntity>(&list_sql)
            .bind(query.per_page() as i64)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }
}
