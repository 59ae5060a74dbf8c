//! Rate limiting middleware.
//!
//! Per-client rate limiting keyed by remote address. The signup wizard and
//! auth endpoints are unauthenticated, so the key is the client IP taken
//! from X-Forwarded-For (first hop) when present.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::app::AppState;

type ClientRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests, one limiter per client.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<String, Arc<ClientRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    fn get_or_create_limiter(&self, client: &str) -> Arc<ClientRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(client) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();
        if let Some(limiter) = limiters.get(client) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::new(100).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(client.to_string(), limiter.clone());
        limiter
    }

    /// Check whether a request from the client is allowed. Returns the
    /// retry-after seconds when rate limited.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(client);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// The rate-limit key for a request: first X-Forwarded-For hop, falling
/// back to a shared bucket when no address is known.
fn client_key(req: &Request<Body>) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware applying per-client rate limiting.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = &state.rate_limiter else {
        return next.run(req).await;
    };

    let client = client_key(&req);
    match limiter.check(&client) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            tracing::debug!(client = %client, retry_after, "Rate limited request");
            let body = Json(json!({
                "error": "rate_limited",
                "message": "Too many requests. Please try again later.",
            }));
            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_allows_within_quota() {
        let state = RateLimiterState::new(10);
        for _ in 0..10 {
            assert!(state.check("1.2.3.4").is_ok());
        }
    }

    #[test]
    fn test_rate_limiter_blocks_over_quota() {
        let state = RateLimiterState::new(2);
        assert!(state.check("1.2.3.4").is_ok());
        assert!(state.check("1.2.3.4").is_ok());
        let retry_after = state.check("1.2.3.4").unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_rate_limiter_keys_are_independent() {
        let state = RateLimiterState::new(1);
        assert!(state.check("1.1.1.1").is_ok());
        assert!(state.check("2.2.2.2").is_ok());
        assert!(state.check("1.1.1.1").is_err());
    }
}
