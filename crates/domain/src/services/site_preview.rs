//! Website preview content for wizard step 4.
//!
//! Produces canned, category-keyed copy for the preview screen. A
//! user-supplied business description overrides the generated about text.

use serde::{Deserialize, Serialize};

/// Preview copy shown before the user approves their site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SitePreview {
    pub headline: String,
    pub tagline: String,
    pub services: Vec<String>,
    pub about: String,
}

/// Generates preview content for a business.
pub fn generate_preview(
    business_name: &str,
    category: &str,
    description: &str,
    city: &str,
    state: &str,
) -> SitePreview {
    let name = if business_name.is_empty() {
        "Your Business"
    } else {
        business_name
    };
    let location = format!("{}, {}", city, state);

    let mut preview = match category {
        "restaurant" => SitePreview {
            headline: format!("Welcome to {}", name),
            tagline: "Delicious food, unforgettable experiences".to_string(),
            services: vec![
                "Fine Dining".to_string(),
                "Takeout & Delivery".to_string(),
                "Catering".to_string(),
                "Private Events".to_string(),
            ],
            about: format!(
                "{} brings you the finest culinary experience in {}. Our passionate chefs create memorable dishes using the freshest ingredients.",
                name, location
            ),
        },
        "professional" => SitePreview {
            headline: format!("Professional Excellence at {}", name),
            tagline: "Your trusted partner for success".to_string(),
            services: vec![
                "Consulting".to_string(),
                "Strategic Planning".to_string(),
                "Expert Analysis".to_string(),
                "Custom Solutions".to_string(),
            ],
            about: format!(
                "{} provides top-tier professional services in {}. We help businesses achieve their goals with expert guidance and proven strategies.",
                name, location
            ),
        },
        "retail" => SitePreview {
            headline: format!("Shop the Best at {}", name),
            tagline: "Quality products, exceptional service".to_string(),
            services: vec![
                "Online Shopping".to_string(),
                "In-Store Experience".to_string(),
                "Customer Support".to_string(),
                "Fast Delivery".to_string(),
            ],
            about: format!(
                "{} is your premier shopping destination in {}. We offer carefully curated products and outstanding customer service.",
                name, location
            ),
        },
        _ => SitePreview {
            headline: format!("Welcome to {}", name),
            tagline: "Excellence in everything we do".to_string(),
            services: vec![
                "Quality Service".to_string(),
                "Expert Team".to_string(),
                "Customer Focus".to_string(),
                "Reliable Solutions".to_string(),
            ],
            about: format!(
                "{} is a trusted business serving {}. We pride ourselves on delivering exceptional service and building lasting relationships with our customers.",
                name, location
            ),
        },
    };

    if !description.is_empty() {
        preview.about = description.to_string();
    }

    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_preview() {
        let preview = generate_preview("Joe's Cafe", "restaurant", "", "Springfield", "IL");
        assert_eq!(preview.headline, "Welcome to Joe's Cafe");
        assert!(preview.services.contains(&"Catering".to_string()));
        assert!(preview.about.contains("Springfield, IL"));
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let preview = generate_preview("Acme", "automotive", "", "Austin", "TX");
        assert_eq!(preview.headline, "Welcome to Acme");
        assert_eq!(preview.tagline, "Excellence in everything we do");
    }

    #[test]
    fn test_description_overrides_about() {
        let preview = generate_preview(
            "Acme",
            "retail",
            "Family-run since 1950.",
            "Austin",
            "TX",
        );
        assert_eq!(preview.about, "Family-run since 1950.");
    }

    #[test]
    fn test_empty_business_name_placeholder() {
        let preview = generate_preview("", "retail", "", "Austin", "TX");
        assert!(preview.headline.contains("Your Business"));
    }

    #[test]
    fn test_preview_deterministic() {
        let a = generate_preview("Acme", "professional", "", "Austin", "TX");
        let b = generate_preview("Acme", "professional", "", "Austin", "TX");
        assert_eq!(a, b);
    }
}
