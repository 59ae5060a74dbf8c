//! AI tooling entities (database row mappings).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ai_tool::{AiRequestStatus, AiToolType};

/// Database enum for ai_tool_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "ai_tool_type", rename_all = "snake_case")]
pub enum AiToolTypeDb {
    ContentGenerator,
    ImageGenerator,
    SeoOptimizer,
    TextImprover,
    Translator,
    CodeGenerator,
    DesignAssistant,
}

impl From<AiToolTypeDb> for AiToolType {
    fn from(db: AiToolTypeDb) -> Self {
        match db {
            AiToolTypeDb::ContentGenerator => Self::ContentGenerator,
            AiToolTypeDb::ImageGenerator => Self::ImageGenerator,
            AiToolTypeDb::SeoOptimizer => Self::SeoOptimizer,
            AiToolTypeDb::TextImprover => Self::TextImprover,
            AiToolTypeDb::Translator => Self::Translator,
            AiToolTypeDb::CodeGenerator => Self::CodeGenerator,
            AiToolTypeDb::DesignAssistant => Self::DesignAssistant,
        }
    }
}

impl From<AiToolType> for AiToolTypeDb {
    fn from(t: AiToolType) -> Self {
        match t {
            AiToolType::ContentGenerator => Self::ContentGenerator,
            AiToolType::ImageGenerator => Self::ImageGenerator,
            AiToolType::SeoOptimizer => Self::SeoOptimizer,
            AiToolType::TextImprover => Self::TextImprover,
            AiToolType::Translator => Self::Translator,
            AiToolType::CodeGenerator => Self::CodeGenerator,
            AiToolType::DesignAssistant => Self::DesignAssistant,
        }
    }
}

/// Database enum for ai_request_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "ai_request_status", rename_all = "lowercase")]
pub enum AiRequestStatusDb {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl From<AiRequestStatusDb> for AiRequestStatus {
    fn from(db: AiRequestStatusDb) -> Self {
        match db {
            AiRequestStatusDb::Pending => Self::Pending,
            AiRequestStatusDb::Processing => Self::Processing,
            AiRequestStatusDb::Completed => Self::Completed,
            AiRequestStatusDb::Failed => Self::Failed,
            AiRequestStatusDb::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AiRequestStatus> for AiRequestStatusDb {
    fn from(s: AiRequestStatus) -> Self {
        match s {
            AiRequestStatus::Pending => Self::Pending,
            AiRequestStatus::Processing => Self::Processing,
            AiRequestStatus::Completed => Self::Completed,
            AiRequestStatus::Failed => Self::Failed,
            AiRequestStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Database row mapping for the per-tenant ai_tools table.
#[derive(Debug, Clone, FromRow)]
pub struct AiToolEntity {
    pub id: Uuid,
    pub name: String,
    pub tool_type: AiToolTypeDb,
    pub description: String,
    pub is_active: bool,
    pub max_requests_per_hour: i32,
    pub max_requests_per_day: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AiToolEntity> for domain::models::ai_tool::AiTool {
    fn from(entity: AiToolEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            tool_type: entity.tool_type.into(),
            description: entity.description,
            is_active: entity.is_active,
            max_requests_per_hour: entity.max_requests_per_hour,
            max_requests_per_day: entity.max_requests_per_day,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the per-tenant ai_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct AiRequestEntity {
    pub id: Uuid,
    pub tool_id: Uuid,
    pub prompt: String,
    pub parameters: JsonValue,
    pub response_data: JsonValue,
    pub output_text: String,
    pub status: AiRequestStatusDb,
    pub tokens_used: i32,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<AiRequestEntity> for domain::models::ai_tool::AiRequest {
    fn from(entity: AiRequestEntity) -> Self {
        Self {
            id: entity.id,
            tool_id: entity.tool_id,
            prompt: entity.prompt,
            parameters: entity.parameters,
            response_data: entity.response_data,
            output_text: entity.output_text,
            status: entity.status.into(),
            tokens_used: entity.tokens_used,
            error_message: entity.error_message,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        }
    }
}
