//! Authentication routes.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::user::{LoginRequest, RefreshRequest, TokenPairResponse};
use persistence::repositories::UserRepository;
use shared::password::verify_password;

/// POST /api/v1/auth/login
///
/// Email/password login issuing a JWT pair.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());

    let Some(user) = users.find_entity_by_email(&request.email).await? else {
        // Indistinguishable from a wrong password on purpose.
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    };

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is disabled".into()));
    }

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    }

    let (access_token, _) = state.jwt.generate_access_token(user.id)?;
    let (refresh_token, _) = state.jwt.generate_refresh_token(user.id)?;

    users.update_last_login(user.id, Utc::now()).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.access_token_expiry_secs,
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a fresh pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let claims = state.jwt.validate_refresh_token(&request.refresh_token)?;
    let user_id = shared::jwt::extract_user_id(&claims)?;

    let users = UserRepository::new(state.pool.clone());
    let Some(user) = users.find_by_id(user_id).await? else {
        return Err(ApiError::Unauthorized("Account no longer exists".into()));
    };
    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is disabled".into()));
    }

    let (access_token, _) = state.jwt.generate_access_token(user_id)?;
    let (refresh_token, _) = state.jwt.generate_refresh_token(user_id)?;

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.access_token_expiry_secs,
    }))
}
