//! AI tooling placeholder models (tenant-scoped).
//!
//! Generation endpoints record an `AiRequest` and debit the tenant's
//! monthly AI budget; actual model calls are an external collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kinds of AI tools the platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiToolType {
    ContentGenerator,
    ImageGenerator,
    SeoOptimizer,
    TextImprover,
    Translator,
    CodeGenerator,
    DesignAssistant,
}

impl FromStr for AiToolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content_generator" => Ok(AiToolType::ContentGenerator),
            "image_generator" => Ok(AiToolType::ImageGenerator),
            "seo_optimizer" => Ok(AiToolType::SeoOptimizer),
            "text_improver" => Ok(AiToolType::TextImprover),
            "translator" => Ok(AiToolType::Translator),
            "code_generator" => Ok(AiToolType::CodeGenerator),
            "design_assistant" => Ok(AiToolType::DesignAssistant),
            _ => Err(format!("Unknown AI tool type: {}", s)),
        }
    }
}

impl std::fmt::Display for AiToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AiToolType::ContentGenerator => "content_generator",
            AiToolType::ImageGenerator => "image_generator",
            AiToolType::SeoOptimizer => "seo_optimizer",
            AiToolType::TextImprover => "text_improver",
            AiToolType::Translator => "translator",
            AiToolType::CodeGenerator => "code_generator",
            AiToolType::DesignAssistant => "design_assistant",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of an AI request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiRequestStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for AiRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AiRequestStatus::Pending => "pending",
            AiRequestStatus::Processing => "processing",
            AiRequestStatus::Completed => "completed",
            AiRequestStatus::Failed => "failed",
            AiRequestStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// An available AI tool and its configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AiTool {
    pub id: Uuid,
    pub name: String,
    pub tool_type: AiToolType,
    pub description: String,
    pub is_active: bool,
    pub max_requests_per_hour: i32,
    pub max_requests_per_day: i32,
    pub created_at: DateTime<Utc>,
}

/// A recorded AI tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AiRequest {
    pub id: Uuid,
    pub tool_id: Uuid,
    pub prompt: String,
    pub parameters: JsonValue,
    pub response_data: JsonValue,
    pub output_text: String,
    pub status: AiRequestStatus,
    pub tokens_used: i32,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request body for the generation placeholder endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GenerateRequest {
    pub tool_id: Uuid,
    #[validate(length(min = 1, max = 4000, message = "Prompt must be 1-4000 characters"))]
    pub prompt: String,
    #[serde(default)]
    pub parameters: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_type_serde() {
        assert_eq!(
            serde_json::to_string(&AiToolType::ContentGenerator).unwrap(),
            "\"content_generator\""
        );
        let t: AiToolType = serde_json::from_str("\"seo_optimizer\"").unwrap();
        assert_eq!(t, AiToolType::SeoOptimizer);
        assert!(AiToolType::from_str("chatbot").is_err());
    }

    #[test]
    fn test_generate_request_validation() {
        let valid = GenerateRequest {
            tool_id: Uuid::nil(),
            prompt: "Write a tagline".to_string(),
            parameters: None,
        };
        assert!(valid.validate().is_ok());

        let empty_prompt = GenerateRequest {
            prompt: String::new(),
            ..valid
        };
        assert!(empty_prompt.validate().is_err());
    }
}
