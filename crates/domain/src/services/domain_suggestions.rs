//! Domain-name suggestion generation for wizard step 3.
//!
//! The candidate set is a pure function of (business name, category):
//! category-specific suffixes first, then generic candidates, capped at
//! six. Availability and price come from the `DomainAvailability` lookup,
//! which is pluggable; production wires an HTTP registrar client, tests
//! and development use the deterministic mock.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::wizard::DomainSuggestion;
use shared::slug::domain_label;

/// Maximum number of suggestions returned to the caller.
const MAX_SUGGESTIONS: usize = 6;

/// How many leading suggestions are flagged as recommended.
const RECOMMENDED_COUNT: usize = 2;

/// Error from the availability lookup.
#[derive(Debug, Error)]
pub enum DomainLookupError {
    #[error("Domain availability lookup failed: {0}")]
    LookupFailed(String),
}

/// Advisory availability and price for one candidate domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainQuote {
    pub available: bool,
    pub price: String,
}

/// Pluggable external domain-availability lookup.
#[async_trait]
pub trait DomainAvailability: Send + Sync {
    async fn quote(&self, domain: &str) -> Result<DomainQuote, DomainLookupError>;
}

/// Category-specific domain suffixes.
fn category_suffixes(category: &str) -> &'static [&'static str] {
    match category {
        "restaurant" => &["eats", "kitchen", "bistro", "cafe"],
        "retail" => &["shop", "store", "market", "boutique"],
        "professional" => &["services", "solutions", "consulting", "experts"],
        "healthcare" => &["health", "care", "medical", "clinic"],
        "beauty" => &["beauty", "salon", "spa", "style"],
        "fitness" => &["fitness", "gym", "training", "wellness"],
        _ => &[],
    }
}

/// Generates the deterministic candidate set for a business.
///
/// Returns an empty set when the business name has no usable characters.
pub fn generate_candidates(business_name: &str, category: &str) -> Vec<String> {
    let label = domain_label(business_name);
    if label.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<String> = category_suffixes(category)
        .iter()
        .map(|suffix| format!("{}{}.com", label, suffix))
        .collect();

    // Generic candidates fill the remaining slots.
    candidates.push(format!("{}.com", label));
    candidates.push(format!("{}online.com", label));
    candidates.push(format!("{}pro.com", label));

    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

/// Builds the full suggestion list, quoting each candidate through the
/// configured lookup. The first two candidates are flagged recommended.
pub async fn suggest(
    business_name: &str,
    category: &str,
    lookup: &dyn DomainAvailability,
) -> Result<Vec<DomainSuggestion>, DomainLookupError> {
    let mut suggestions = Vec::new();

    for (index, domain) in generate_candidates(business_name, category)
        .into_iter()
        .enumerate()
    {
        let quote = lookup.quote(&domain).await?;
        suggestions.push(DomainSuggestion {
            domain,
            available: quote.available,
            price: quote.price,
            recommended: index < RECOMMENDED_COUNT,
        });
    }

    Ok(suggestions)
}

/// Deterministic mock lookup for development and tests.
///
/// Availability and price are derived from a checksum of the domain name,
/// so repeated calls for the same candidate always agree.
#[derive(Debug, Clone, Default)]
pub struct MockDomainAvailability;

const MOCK_PRICES: &[&str] = &["$12.99", "$15.99", "$19.99"];

#[async_trait]
impl DomainAvailability for MockDomainAvailability {
    async fn quote(&self, domain: &str) -> Result<DomainQuote, DomainLookupError> {
        let checksum: u32 = domain.bytes().map(u32::from).sum();
        Ok(DomainQuote {
            available: checksum % 3 != 0,
            price: MOCK_PRICES[(checksum as usize) % MOCK_PRICES.len()].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_restaurant() {
        let candidates = generate_candidates("Joe's Cafe", "restaurant");
        assert_eq!(
            candidates,
            vec![
                "joescafeeats.com",
                "joescafekitchen.com",
                "joescafebistro.com",
                "joescafecafe.com",
                "joescafe.com",
                "joescafeonline.com",
            ]
        );
    }

    #[test]
    fn test_candidates_unknown_category_generic_only() {
        let candidates = generate_candidates("Joe's Cafe", "other");
        assert_eq!(
            candidates,
            vec!["joescafe.com", "joescafeonline.com", "joescafepro.com"]
        );
    }

    #[test]
    fn test_candidates_capped_at_six() {
        assert!(generate_candidates("Acme", "retail").len() <= 6);
    }

    #[test]
    fn test_candidates_deterministic() {
        assert_eq!(
            generate_candidates("Joe's Cafe", "restaurant"),
            generate_candidates("Joe's Cafe", "restaurant")
        );
    }

    #[test]
    fn test_candidates_empty_name() {
        assert!(generate_candidates("", "restaurant").is_empty());
        assert!(generate_candidates("!!!", "restaurant").is_empty());
    }

    #[tokio::test]
    async fn test_suggest_marks_first_two_recommended() {
        let lookup = MockDomainAvailability;
        let suggestions = suggest("Joe's Cafe", "restaurant", &lookup).await.unwrap();

        assert_eq!(suggestions.len(), 6);
        assert!(suggestions[0].recommended);
        assert!(suggestions[1].recommended);
        assert!(suggestions[2..].iter().all(|s| !s.recommended));
    }

    #[tokio::test]
    async fn test_mock_lookup_deterministic() {
        let lookup = MockDomainAvailability;
        let a = lookup.quote("joescafe.com").await.unwrap();
        let b = lookup.quote("joescafe.com").await.unwrap();
        assert_eq!(a, b);
        assert!(MOCK_PRICES.contains(&a.price.as_str()));
    }
}
