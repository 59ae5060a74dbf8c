//! Signup wizard routes.
//!
//! Four session-backed steps: personal details, business details, domain
//! selection, preview + finalization. Step state lives in the
//! wizard_sessions table keyed by an httpOnly cookie token; accessing a
//! step ahead of the session's position is answered with an invalid_state
//! error rather than a silent redirect. Only step 4's accepted submission
//! writes durable records.

use axum::{
    extract::{Extension, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::wizard_session::{
    build_clear_wizard_cookie, build_wizard_cookie, WizardSessionToken,
};
use crate::middleware::user_auth::UserAuth;
use crate::services::signup::finalize_signup;
use domain::models::user::TokenPairResponse;
use domain::models::wizard::{
    DomainSuggestion, Step1PersonalRequest, Step2BusinessRequest, Step3DomainRequest,
    Step4PreviewRequest, WizardData, BUSINESS_CATEGORIES, COLOR_SCHEMES, DESIGN_STYLES,
};
use domain::models::WizardStep;
use domain::services::domain_suggestions::suggest;
use domain::services::site_preview::{generate_preview, SitePreview};
use domain::services::wizard_flow::{advance_after, ensure_reachable};
use persistence::entities::wizard_session::WizardSessionEntity;
use persistence::repositories::{PendingWebsiteRepository, UserRepository, WizardSessionRepository};
use shared::crypto::{generate_session_token, sha256_hex};

const TOTAL_STEPS: u8 = 4;

/// What a wizard step renders for the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
struct WizardStepView {
    current_step: u8,
    total_steps: u8,
    progress_percentage: f64,
    title: &'static str,
    subtitle: &'static str,
    step_title: &'static str,
    step_icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_categories: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_domains: Option<Vec<DomainSuggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    design_styles: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_schemes: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<SitePreview>,
}

/// Response after an accepted step 1-3 submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
struct StepAcceptedResponse {
    completed_step: u8,
    next_step: u8,
}

/// Response after finalization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
struct SignupCompleteResponse {
    message: String,
    business_name: String,
    domain: String,
    pending_website_id: uuid::Uuid,
    tokens: TokenPairResponse,
}

fn step_meta(step: WizardStep) -> (&'static str, &'static str, &'static str, &'static str) {
    match step {
        WizardStep::Step1Personal => (
            "Welcome! Let's Get Started",
            "Create your account to begin building your website",
            "Personal Information",
            "person-circle",
        ),
        WizardStep::Step2Business => (
            "Tell Us About Your Business",
            "Help us understand your business to create the perfect website",
            "Business Details",
            "building",
        ),
        WizardStep::Step3Domain => (
            "Choose Your Perfect Domain",
            "We've suggested some great domain names for your business",
            "Domain Selection",
            "globe",
        ),
        WizardStep::Step4Preview | WizardStep::Completed => (
            "Preview Your Website",
            "Here's what we've created for you",
            "Preview",
            "eye",
        ),
    }
}

fn step_from_position(position: i16) -> WizardStep {
    WizardStep::from_number(position.clamp(1, 4) as u8).unwrap_or(WizardStep::Step1Personal)
}

fn parse_step(step_number: u8) -> Result<WizardStep, ApiError> {
    WizardStep::from_number(step_number)
        .ok_or_else(|| ApiError::NotFound(format!("No wizard step {}", step_number)))
}

fn session_data(session: &WizardSessionEntity) -> Result<WizardData, ApiError> {
    serde_json::from_value(session.data.clone())
        .map_err(|e| ApiError::Internal(format!("Corrupt wizard session payload: {}", e)))
}

async fn load_session(
    state: &AppState,
    token: &Option<String>,
) -> Result<Option<WizardSessionEntity>, ApiError> {
    let Some(token) = token else {
        return Ok(None);
    };
    let sessions = WizardSessionRepository::new(state.pool.clone());
    Ok(sessions.find_live_by_token_hash(&sha256_hex(token)).await?)
}

/// GET /signup-wizard/:step
pub async fn view_step(
    State(state): State<AppState>,
    Path(step_number): Path<u8>,
    WizardSessionToken(token): WizardSessionToken,
) -> Result<impl IntoResponse, ApiError> {
    let step = parse_step(step_number)?;
    let session = load_session(&state, &token).await?;

    let (current, data) = match &session {
        Some(session) => (
            if session.is_completed() {
                WizardStep::Completed
            } else {
                step_from_position(session.current_step)
            },
            session_data(session)?,
        ),
        None => (WizardStep::Step1Personal, WizardData::default()),
    };

    if session.is_none() && step != WizardStep::Step1Personal {
        return Err(ApiError::InvalidState(
            "The signup wizard starts at step 1".into(),
        ));
    }
    ensure_reachable(current, step)?;

    let (title, subtitle, step_title, step_icon) = step_meta(step);
    let mut view = WizardStepView {
        current_step: step.number(),
        total_steps: TOTAL_STEPS,
        progress_percentage: (step.number() as f64 / TOTAL_STEPS as f64) * 100.0,
        title,
        subtitle,
        step_title,
        step_icon,
        business_categories: None,
        business_name: None,
        suggested_domains: None,
        design_styles: None,
        color_schemes: None,
        preview: None,
    };

    match step {
        WizardStep::Step2Business => {
            view.business_categories = Some(BUSINESS_CATEGORIES);
        }
        WizardStep::Step3Domain => {
            let business_name = data.business_name.clone().unwrap_or_default();
            let category = data.business_category.clone().unwrap_or_default();
            let suggestions = suggest(&business_name, &category, state.domain_lookup.as_ref())
                .await
                .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;
            view.business_name = Some(business_name);
            view.suggested_domains = Some(suggestions);
        }
        WizardStep::Step4Preview => {
            view.design_styles = Some(DESIGN_STYLES);
            view.color_schemes = Some(COLOR_SCHEMES);
            view.preview = Some(generate_preview(
                data.business_name.as_deref().unwrap_or(""),
                data.business_category.as_deref().unwrap_or(""),
                data.business_description.as_deref().unwrap_or(""),
                data.city.as_deref().unwrap_or(""),
                data.state.as_deref().unwrap_or(""),
            ));
        }
        _ => {}
    }

    Ok(Json(view))
}

/// POST /signup-wizard/:step
pub async fn submit_step(
    State(state): State<AppState>,
    Path(step_number): Path<u8>,
    WizardSessionToken(token): WizardSessionToken,
    Json(body): Json<JsonValue>,
) -> Result<impl IntoResponse, ApiError> {
    let step = parse_step(step_number)?;
    let sessions = WizardSessionRepository::new(state.pool.clone());

    // Resolve the session; a missing one is only acceptable on step 1,
    // and even then it is not created until the submission validates.
    let existing = load_session(&state, &token).await?;
    if existing.is_none() && step != WizardStep::Step1Personal {
        return Err(ApiError::InvalidState(
            "The signup wizard starts at step 1".into(),
        ));
    }

    let current = match &existing {
        Some(session) if session.is_completed() => WizardStep::Completed,
        Some(session) => step_from_position(session.current_step),
        None => WizardStep::Step1Personal,
    };
    ensure_reachable(current, step)?;

    let mut data = match &existing {
        Some(session) => session_data(session)?,
        None => WizardData::default(),
    };

    let mut response_headers = HeaderMap::new();

    // Validation failures return before any session row exists or moves.
    match step {
        WizardStep::Step1Personal => {
            let request: Step1PersonalRequest = parse_body(body)?;
            request.validate()?;

            let users = UserRepository::new(state.pool.clone());
            if users.email_exists(&request.email).await? {
                return Err(ApiError::Validation(
                    "email: an account with this email already exists".into(),
                ));
            }

            data.apply_step1(&request);
        }
        WizardStep::Step2Business => {
            let request: Step2BusinessRequest = parse_body(body)?;
            request.validate()?;
            data.apply_step2(&request);
        }
        WizardStep::Step3Domain => {
            let request: Step3DomainRequest = parse_body(body)?;
            request.validate()?;
            data.apply_step3(&request);
        }
        WizardStep::Step4Preview => {
            let request: Step4PreviewRequest = parse_body(body)?;
            request.validate()?;
            data.apply_step4(&request);

            // Steps 2-4 cannot run without a session; the guard above
            // already bounced that case.
            let session = existing
                .as_ref()
                .ok_or_else(|| ApiError::InvalidState("The signup wizard starts at step 1".into()))?;

            let outcome =
                finalize_signup(&state.pool, &state.jwt, session.id, &data, &request).await?;

            if let Ok(value) = HeaderValue::from_str(&build_clear_wizard_cookie()) {
                response_headers.insert(header::SET_COOKIE, value);
            }

            let body = SignupCompleteResponse {
                message: format!(
                    "Welcome {}! Your account has been created.",
                    outcome.first_name
                ),
                business_name: outcome.business_name,
                domain: outcome.selected_domain,
                pending_website_id: outcome.pending_website_id,
                tokens: outcome.tokens,
            };
            return Ok((StatusCode::CREATED, response_headers, Json(body)).into_response());
        }
        WizardStep::Completed => unreachable!("guarded by ensure_reachable"),
    }

    // The submission is valid; persist it, creating the session (and
    // issuing its cookie) on a first-time step 1.
    let session_id = match &existing {
        Some(session) => session.id,
        None => {
            // Opportunistic cleanup: expired sessions are dropped when a
            // new signup begins, keeping the table bounded without a
            // background job.
            let dropped = sessions.delete_expired().await?;
            if dropped > 0 {
                tracing::debug!(dropped, "Dropped expired wizard sessions");
            }

            let new_token = generate_session_token();
            let session = sessions.create(&sha256_hex(&new_token)).await?;
            if let Ok(value) = HeaderValue::from_str(&build_wizard_cookie(&new_token)) {
                response_headers.insert(header::SET_COOKIE, value);
            }
            session.id
        }
    };

    let next = advance_after(current, step);
    sessions
        .save_progress(session_id, &data, i16::from(next.number()))
        .await?;

    let body = StepAcceptedResponse {
        completed_step: step.number(),
        next_step: next.number(),
    };
    Ok((StatusCode::OK, response_headers, Json(body)).into_response())
}

fn parse_body<T: serde::de::DeserializeOwned>(body: JsonValue) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(e.to_string()))
}

/// GET /website-creation-success
///
/// Post-signup summary for the logged-in user.
pub async fn creation_success(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let pending = PendingWebsiteRepository::new(state.pool.clone());
    let Some(record) = pending.find_latest_for_user(auth.user_id).await? else {
        return Err(ApiError::NotFound("No website creation in progress".into()));
    };

    Ok(Json(serde_json::json!({
        "title": format!("{} is Being Created!", record.business_name),
        "subtitle": "We're setting up your professional website with AI-generated content.",
        "business_name": record.business_name,
        "domain": record.selected_domain,
        "status": record.status,
        "pending_website_id": record.id,
    })))
}
