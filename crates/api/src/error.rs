use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::services::wizard_flow::WizardFlowError;
use persistence::provisioning::ProvisioningError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::InvalidState(msg) => (StatusCode::CONFLICT, "invalid_state", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests. Please try again later.".into(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                })
            })
            .collect();

        let message = if details.len() == 1 {
            format!("{}: {}", details[0].field, details[0].message)
        } else {
            format!("{} validation errors", details.len())
        };

        ApiError::Validation(message)
    }
}

impl From<WizardFlowError> for ApiError {
    fn from(err: WizardFlowError) -> Self {
        ApiError::InvalidState(err.to_string())
    }
}

impl From<ProvisioningError> for ApiError {
    fn from(err: ProvisioningError) -> Self {
        match err {
            ProvisioningError::SchemaExists(_) | ProvisioningError::DomainExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            ProvisioningError::InvalidSchemaKey(_) => ApiError::Validation(err.to_string()),
            ProvisioningError::Database(e) => e.into(),
        }
    }
}

impl From<shared::password::PasswordError> for ApiError {
    fn from(err: shared::password::PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<shared::jwt::JwtError> for ApiError {
    fn from(err: shared::jwt::JwtError) -> Self {
        match err {
            shared::jwt::JwtError::TokenExpired | shared::jwt::JwtError::InvalidToken => {
                ApiError::Unauthorized("Invalid or expired token".into())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_statuses() {
        let cases = [
            (
                ApiError::Unauthorized("x".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("x".into()).into_response().status(),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("x".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("x".into()).into_response().status(),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::InvalidState("x".into()).into_response().status(),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Validation("x".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::RateLimited.into_response().status(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ApiError::Internal("x".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_from_wizard_flow_error() {
        let error: ApiError = WizardFlowError::StepNotReachable {
            requested: 3,
            current: 1,
        }
        .into();
        assert!(matches!(error, ApiError::InvalidState(_)));

        let error: ApiError = WizardFlowError::AlreadyCompleted.into();
        assert!(matches!(error, ApiError::InvalidState(_)));
    }

    #[test]
    fn test_from_provisioning_error() {
        let error: ApiError = ProvisioningError::SchemaExists("acme".into()).into();
        assert!(matches!(error, ApiError::Conflict(_)));

        let error: ApiError = ProvisioningError::InvalidSchemaKey("A B".into()).into();
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::InvalidState("wizard is at step 1".to_string())),
            "Invalid state: wizard is at step 1"
        );
        assert_eq!(format!("{}", ApiError::RateLimited), "Rate limited");
    }
}
