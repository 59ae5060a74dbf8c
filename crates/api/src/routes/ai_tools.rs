//! AI tooling placeholder routes (tenant-scoped).
//!
//! Generation endpoints record an AiRequest, debit the tenant's monthly
//! AI budget and answer with canned content; the real model backend is an
//! external collaborator these placeholders stand in for.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;
use domain::models::ai_tool::{AiRequestStatus, AiToolType, GenerateRequest};
use persistence::repositories::{AiToolRepository, ApiUsageRepository};
use shared::pagination::{PageInfo, PageQuery};

/// GET /api/v1/ai/tools
pub async fn list_tools(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
) -> Result<impl IntoResponse, ApiError> {
    let tools = AiToolRepository::new(state.pool.clone());
    let items = tools.list_tools(&resolved.context).await?;
    Ok(Json(serde_json::json!({ "data": items })))
}

/// GET /api/v1/ai/requests
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tools = AiToolRepository::new(state.pool.clone());
    let (requests, total) = tools.list_requests(&resolved.context, &query).await?;

    Ok(Json(serde_json::json!({
        "data": requests,
        "pagination": PageInfo::new(&query, total),
    })))
}

/// POST /api/v1/ai/generate/content
pub async fn generate_content(
    state: State<AppState>,
    resolved: Extension<ResolvedTenant>,
    request: Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    generate(state, resolved, request, AiToolType::ContentGenerator).await
}

/// POST /api/v1/ai/generate/image
pub async fn generate_image(
    state: State<AppState>,
    resolved: Extension<ResolvedTenant>,
    request: Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    generate(state, resolved, request, AiToolType::ImageGenerator).await
}

async fn generate(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<GenerateRequest>,
    expected_type: AiToolType,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    if !resolved.tenant.ai_tools_enabled {
        return Err(ApiError::Forbidden(format!(
            "AI tools are not included in the {} plan",
            resolved.tenant.subscription_plan
        )));
    }

    let tools = AiToolRepository::new(state.pool.clone());
    let Some(tool) = tools.find_tool_by_id(&resolved.context, request.tool_id).await? else {
        return Err(ApiError::NotFound("AI tool not found".to_string()));
    };
    if tool.tool_type != expected_type || !tool.is_active {
        return Err(ApiError::Validation(format!(
            "tool_id: tool is not an active {}",
            expected_type
        )));
    }

    // Debit the monthly budget before doing any work; the upsert is
    // atomic so concurrent requests cannot overdraw.
    let period = Utc::now().format("%Y-%m").to_string();
    let usage = ApiUsageRepository::new(state.pool.clone());
    let allowed = usage
        .try_consume_ai_request(
            resolved.tenant.id,
            &period,
            resolved.tenant.max_monthly_ai_requests,
        )
        .await?;
    if !allowed {
        return Err(ApiError::Conflict(format!(
            "Monthly AI request limit of {} reached",
            resolved.tenant.max_monthly_ai_requests
        )));
    }

    let parameters = request.parameters.clone().unwrap_or(serde_json::json!({}));
    let pending = tools
        .create_request(&resolved.context, tool.id, &request.prompt, &parameters)
        .await?;

    // Placeholder output until the model backend is wired up.
    let output_text = placeholder_output(expected_type, &request.prompt);
    let response_data = serde_json::json!({ "placeholder": true });
    let completed = tools
        .complete_request(
            &resolved.context,
            pending.id,
            AiRequestStatus::Completed,
            &response_data,
            &output_text,
            0,
            Utc::now(),
        )
        .await?
        .ok_or_else(|| ApiError::Internal("AI request vanished mid-flight".into()))?;

    info!(
        tenant_id = %resolved.tenant.id,
        tool_id = %tool.id,
        request_id = %completed.id,
        "Recorded AI generation request"
    );

    Ok((StatusCode::OK, Json(completed)))
}

fn placeholder_output(tool_type: AiToolType, prompt: &str) -> String {
    match tool_type {
        AiToolType::ImageGenerator => {
            format!("A generated image for \"{}\" will appear here.", prompt)
        }
        _ => format!("Generated content for \"{}\" will appear here.", prompt),
    }
}

/// POST /api/v1/ai/tools
///
/// Register a tool for the tenant.
#[derive(Debug, serde::Deserialize, Validate)]
pub struct CreateToolRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub tool_type: AiToolType,
    #[serde(default)]
    pub description: String,
}

pub async fn create_tool(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<CreateToolRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let tools = AiToolRepository::new(state.pool.clone());
    let tool = tools
        .create_tool(
            &resolved.context,
            &request.name,
            request.tool_type,
            &request.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_output_mentions_prompt() {
        let text = placeholder_output(AiToolType::ContentGenerator, "a tagline");
        assert!(text.contains("a tagline"));

        let image = placeholder_output(AiToolType::ImageGenerator, "a logo");
        assert!(image.contains("image"));
    }
}
