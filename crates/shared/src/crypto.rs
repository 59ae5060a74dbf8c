//! Opaque token generation and hashing for wizard sessions.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Alphabet used for generated tokens. Alphanumeric only so tokens are
/// safe in cookies, URLs and log lines without escaping.
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random portion of a session token.
const TOKEN_LENGTH: usize = 40;

/// Generates a new opaque session token with the `sfw_` prefix.
pub fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect();
    format!("sfw_{}", body)
}

/// Computes SHA-256 of the input and returns it as a hex string.
///
/// Session tokens are stored hashed so a database leak does not expose
/// live sessions.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extracts the loggable prefix of a session token (first 8 characters
/// after `sfw_`). Returns None for foreign or truncated tokens.
pub fn token_prefix(token: &str) -> Option<&str> {
    if token.starts_with("sfw_") && token.len() >= 12 {
        Some(&token[4..12])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token_format() {
        let token = generate_session_token();
        assert!(token.starts_with("sfw_"));
        assert_eq!(token.len(), 4 + TOKEN_LENGTH);
        assert!(token[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_session_token_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same_input"), sha256_hex("same_input"));
        assert_ne!(sha256_hex("input1"), sha256_hex("input2"));
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("sfw_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(token_prefix("sfw_short"), None);
        assert_eq!(token_prefix("pm_abcdefgh12345"), None);
        assert_eq!(token_prefix(""), None);
    }

    #[test]
    fn test_token_prefix_of_generated_token() {
        let token = generate_session_token();
        assert_eq!(token_prefix(&token).unwrap().len(), 8);
    }
}
