//! Wizard session cookie extractor.
//!
//! The signup wizard keys its session on an opaque token carried in an
//! httpOnly cookie. The extractor only reads the cookie; issuing and
//! validating the token is the wizard route's job.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

/// Cookie name carrying the wizard session token.
pub const WIZARD_COOKIE_NAME: &str = "sf_wizard";

/// The wizard session token from the request cookie, if any.
#[derive(Debug, Clone)]
pub struct WizardSessionToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for WizardSessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(find_wizard_cookie);

        Ok(WizardSessionToken(token))
    }
}

fn find_wizard_cookie(cookie_header: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == WIZARD_COOKIE_NAME && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Builds the Set-Cookie value installing a wizard session token.
pub fn build_wizard_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400",
        WIZARD_COOKIE_NAME, token
    )
}

/// Builds the Set-Cookie value clearing the wizard session token.
pub fn build_clear_wizard_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", WIZARD_COOKIE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_wizard_cookie() {
        assert_eq!(
            find_wizard_cookie("sf_wizard=sfw_abc123"),
            Some("sfw_abc123".to_string())
        );
        assert_eq!(
            find_wizard_cookie("theme=dark; sf_wizard=sfw_abc123; lang=en"),
            Some("sfw_abc123".to_string())
        );
    }

    #[test]
    fn test_find_wizard_cookie_absent() {
        assert_eq!(find_wizard_cookie("theme=dark; lang=en"), None);
        assert_eq!(find_wizard_cookie(""), None);
        assert_eq!(find_wizard_cookie("sf_wizard="), None);
    }

    #[test]
    fn test_build_wizard_cookie() {
        let cookie = build_wizard_cookie("sfw_token");
        assert!(cookie.starts_with("sf_wizard=sfw_token;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_build_clear_wizard_cookie() {
        assert!(build_clear_wizard_cookie().contains("Max-Age=0"));
    }
}
