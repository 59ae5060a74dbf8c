//! User JWT authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information extracted from a JWT, stored in request
/// extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub jti: String,
}

/// Middleware that requires a valid Bearer access token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return ApiError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response();
        }
    };

    let claims = match state.jwt.validate_access_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            return ApiError::Unauthorized("Invalid or expired token".into()).into_response();
        }
    };

    let user_id = match shared::jwt::extract_user_id(&claims) {
        Ok(id) => id,
        Err(_) => {
            return ApiError::Unauthorized("Invalid user ID in token".into()).into_response();
        }
    };

    req.extensions_mut().insert(UserAuth {
        user_id,
        jti: claims.jti,
    });
    next.run(req).await
}
