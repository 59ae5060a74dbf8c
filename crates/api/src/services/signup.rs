//! Wizard finalization.
//!
//! Step 4's accepted submission is the wizard's only durable side effect:
//! one transaction creates the user, writes the pending-website record and
//! clears the session. Either all three land or none do; no
//! user-without-website state is ever observable.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::record_signup_completed;
use domain::models::user::TokenPairResponse;
use domain::models::wizard::{Step4PreviewRequest, WizardData};
use domain::services::wizard_flow::{finalize_profile, SignupProfile};
use shared::jwt::JwtConfig;
use shared::password::hash_password;

/// Result of a finalized signup.
#[derive(Debug)]
pub struct SignupOutcome {
    pub user_id: Uuid,
    pub first_name: String,
    pub business_name: String,
    pub selected_domain: String,
    pub pending_website_id: Uuid,
    pub tokens: TokenPairResponse,
}

/// Finalize the wizard: create the user and pending-website record, mark
/// the session completed and log the caller in.
pub async fn finalize_signup(
    pool: &PgPool,
    jwt: &JwtConfig,
    session_id: Uuid,
    data: &WizardData,
    step4: &Step4PreviewRequest,
) -> Result<SignupOutcome, ApiError> {
    let profile: SignupProfile = finalize_profile(data)?;
    let password_hash = hash_password(&profile.password)?;

    let mut tx = pool.begin().await?;

    let user_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, first_name, last_name, company) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(&profile.email)
    .bind(&password_hash)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.business_name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            ApiError::Conflict("An account with this email already exists".into())
        }
        _ => ApiError::from(e),
    })?;

    let pending_website_id: Uuid = sqlx::query_scalar(
        "INSERT INTO pending_website_requests \
         (user_id, business_name, business_category, business_description, selected_domain, \
          custom_domain, design_style, color_scheme, additional_requests) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
    )
    .bind(user_id)
    .bind(&profile.business_name)
    .bind(&profile.business_category)
    .bind(&profile.business_description)
    .bind(&profile.selected_domain)
    .bind(&profile.custom_domain)
    .bind(&step4.design_style)
    .bind(&step4.color_scheme)
    .bind(&step4.additional_requests)
    .fetch_one(&mut *tx)
    .await?;

    // The session payload held credentials; clear it the moment the
    // durable rows exist.
    sqlx::query(
        "UPDATE wizard_sessions \
         SET data = '{}', current_step = 5, completed_at = NOW(), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(session_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let (access_token, _) = jwt.generate_access_token(user_id)?;
    let (refresh_token, _) = jwt.generate_refresh_token(user_id)?;

    sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    record_signup_completed();
    info!(
        user_id = %user_id,
        pending_website_id = %pending_website_id,
        business = %profile.business_name,
        "Signup wizard finalized"
    );

    Ok(SignupOutcome {
        user_id,
        first_name: profile.first_name,
        business_name: profile.business_name,
        selected_domain: profile.selected_domain,
        pending_website_id,
        tokens: TokenPairResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs,
        },
    })
}
