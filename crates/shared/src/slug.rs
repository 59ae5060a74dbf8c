//! Slug and schema-key derivation.
//!
//! Three normalizations with different separators are used across the
//! platform:
//! - `slugify`: website subdomains and page slugs ("About Us" -> "about-us")
//! - `schema_key`: tenant schema names ("My-Shop Co" -> "my_shop_co")
//! - `domain_label`: domain-name candidates ("Joe's Cafe" -> "joescafe")

/// Derives a URL slug from free text: lowercase alphanumeric runs joined
/// by single hyphens, no leading or trailing hyphen.
pub fn slugify(input: &str) -> String {
    join_alnum_runs(input, '-')
}

/// Derives a tenant schema key from a subdomain token: lowercase
/// alphanumeric runs joined by single underscores. Spaces and hyphens both
/// normalize to the separator so "my-shop" and "my shop" collide rather
/// than silently producing two tenants.
pub fn schema_key(input: &str) -> String {
    join_alnum_runs(input, '_')
}

/// Strips free text down to its lowercase alphanumerics, dropping
/// everything else. Used for domain-name candidate generation.
pub fn domain_label(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn join_alnum_runs(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Shop"), "my-shop");
        assert_eq!(slugify("About Us"), "about-us");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Hello --  World"), "hello-world");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Joe's Cafe!"), "joe-s-cafe");
        assert_eq!(slugify("100% Natural"), "100-natural");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_schema_key_basic() {
        assert_eq!(schema_key("customer"), "customer");
        assert_eq!(schema_key("My-Shop Co"), "my_shop_co");
    }

    #[test]
    fn test_schema_key_hyphen_and_space_collide() {
        assert_eq!(schema_key("my-shop"), schema_key("my shop"));
    }

    #[test]
    fn test_schema_key_uppercase() {
        assert_eq!(schema_key("ACME"), "acme");
    }

    #[test]
    fn test_domain_label() {
        assert_eq!(domain_label("Joe's Cafe"), "joescafe");
        assert_eq!(domain_label("My Shop 24/7"), "myshop247");
        assert_eq!(domain_label("---"), "");
    }
}
