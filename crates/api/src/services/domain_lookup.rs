//! Domain availability lookup providers.
//!
//! The wizard's step 3 quotes each candidate domain through the
//! `DomainAvailability` trait. The http provider talks to a registrar
//! endpoint; the mock provider answers deterministically and is the
//! default for development.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DomainLookupConfig;
use domain::services::domain_suggestions::{
    DomainAvailability, DomainLookupError, DomainQuote, MockDomainAvailability,
};

/// Registrar-backed availability lookup.
pub struct HttpDomainAvailability {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    available: bool,
    price: String,
}

impl HttpDomainAvailability {
    pub fn new(base_url: String, timeout_ms: u64) -> Result<Self, DomainLookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| DomainLookupError::LookupFailed(e.to_string()))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl DomainAvailability for HttpDomainAvailability {
    async fn quote(&self, domain: &str) -> Result<DomainQuote, DomainLookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("domain", domain)])
            .send()
            .await
            .map_err(|e| DomainLookupError::LookupFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainLookupError::LookupFailed(e.to_string()))?;

        let quote: QuoteResponse = response
            .json()
            .await
            .map_err(|e| DomainLookupError::LookupFailed(e.to_string()))?;

        Ok(DomainQuote {
            available: quote.available,
            price: quote.price,
        })
    }
}

/// Build the configured lookup provider.
///
/// Unknown providers fall back to the mock with a warning rather than
/// refusing to boot; suggestions are advisory either way.
pub fn build_domain_lookup(
    config: &DomainLookupConfig,
) -> Result<Arc<dyn DomainAvailability>, DomainLookupError> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpDomainAvailability::new(
            config.url.clone(),
            config.timeout_ms,
        )?)),
        "mock" => Ok(Arc::new(MockDomainAvailability)),
        other => {
            tracing::warn!(provider = %other, "Unknown domain lookup provider, using mock");
            Ok(Arc::new(MockDomainAvailability))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_mock_lookup() {
        let config = DomainLookupConfig {
            provider: "mock".to_string(),
            url: String::new(),
            timeout_ms: 5000,
        };
        let lookup = build_domain_lookup(&config).unwrap();
        let quote = lookup.quote("example.com").await.unwrap();
        assert!(!quote.price.is_empty());
    }

    #[test]
    fn test_build_unknown_provider_falls_back() {
        let config = DomainLookupConfig {
            provider: "carrier-pigeon".to_string(),
            url: String::new(),
            timeout_ms: 5000,
        };
        assert!(build_domain_lookup(&config).is_ok());
    }
}
