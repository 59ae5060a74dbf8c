//! Common validation utilities.

use validator::ValidationError;

// Postgres identifiers are capped at 63 bytes; schema keys must also never
// collide with reserved schemas.
const MAX_SCHEMA_KEY_LENGTH: usize = 63;
const RESERVED_SCHEMA_KEYS: &[&str] = &["pg_catalog", "information_schema", "pg_toast"];

lazy_static::lazy_static! {
    /// Lowercase alphanumeric with hyphens, no leading/trailing hyphen.
    pub static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap();

    /// Valid tenant schema key: starts with a letter, then lowercase
    /// alphanumerics and underscores.
    pub static ref SCHEMA_KEY_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();

    /// Hex color in #rrggbb form.
    pub static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();

    /// Hostname: dot-separated labels of letters, digits and hyphens.
    pub static ref HOSTNAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$").unwrap();
}

/// Validates slug format: lowercase alphanumeric with hyphens, no
/// leading/trailing hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some(
            "Slug must be lowercase alphanumeric with hyphens, no leading/trailing hyphens".into(),
        );
        Err(err)
    }
}

/// Validates a tenant schema key.
///
/// Schema keys are interpolated into SQL as schema qualifiers, so anything
/// outside `[a-z][a-z0-9_]*` is rejected outright.
pub fn validate_schema_key(key: &str) -> Result<(), ValidationError> {
    if key.len() > MAX_SCHEMA_KEY_LENGTH {
        let mut err = ValidationError::new("schema_key_length");
        err.message = Some("Schema key must be at most 63 characters".into());
        return Err(err);
    }
    if RESERVED_SCHEMA_KEYS.contains(&key) {
        let mut err = ValidationError::new("schema_key_reserved");
        err.message = Some("Schema key is reserved".into());
        return Err(err);
    }
    if SCHEMA_KEY_REGEX.is_match(key) {
        Ok(())
    } else {
        let mut err = ValidationError::new("schema_key_format");
        err.message =
            Some("Schema key must start with a letter and contain only a-z, 0-9 and _".into());
        Err(err)
    }
}

/// Validates a hex color in #rrggbb form.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be a hex value like #007bff".into());
        Err(err)
    }
}

/// Validates a hostname (lowercased, at least two labels).
pub fn validate_hostname(host: &str) -> Result<(), ValidationError> {
    if host.len() <= 253 && HOSTNAME_REGEX.is_match(host) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hostname");
        err.message = Some("Hostname must be a valid lowercase domain name".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("acme-corp").is_ok());
        assert!(validate_slug("test123").is_ok());
        assert!(validate_slug("Acme-Corp").is_err()); // uppercase
        assert!(validate_slug("-acme").is_err()); // leading hyphen
        assert!(validate_slug("acme-").is_err()); // trailing hyphen
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_schema_key() {
        assert!(validate_schema_key("customer").is_ok());
        assert!(validate_schema_key("my_shop_co").is_ok());
        assert!(validate_schema_key("t2_store").is_ok());
        assert!(validate_schema_key("2shop").is_err()); // starts with digit
        assert!(validate_schema_key("my-shop").is_err()); // hyphen
        assert!(validate_schema_key("My_Shop").is_err()); // uppercase
        assert!(validate_schema_key("").is_err());
    }

    #[test]
    fn test_validate_schema_key_injection_attempts() {
        assert!(validate_schema_key("public; drop table users").is_err());
        assert!(validate_schema_key("a\"b").is_err());
        assert!(validate_schema_key("a.b").is_err());
    }

    #[test]
    fn test_validate_schema_key_length() {
        let long = "a".repeat(64);
        assert!(validate_schema_key(&long).is_err());
        let ok = "a".repeat(63);
        assert!(validate_schema_key(&ok).is_ok());
    }

    #[test]
    fn test_validate_schema_key_reserved() {
        assert!(validate_schema_key("pg_catalog").is_err());
        assert!(validate_schema_key("information_schema").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#007bff").is_ok());
        assert!(validate_hex_color("#ABCDEF").is_ok());
        assert!(validate_hex_color("007bff").is_err());
        assert!(validate_hex_color("#07bff").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_validate_hostname() {
        assert!(validate_hostname("acme.siteforge.app").is_ok());
        assert!(validate_hostname("my-shop.example.com").is_ok());
        assert!(validate_hostname("localhost").is_err()); // single label
        assert!(validate_hostname("UPPER.example.com").is_err());
        assert!(validate_hostname("-bad.example.com").is_err());
    }
}
