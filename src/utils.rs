use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Length of the verifier generated for every authorization attempt.
pub const VERIFIER_LENGTH: usize = 128;

/// Builds a PKCE code verifier of exactly `length` characters.
///
/// Every character is drawn independently and uniformly from the 62-character
/// alphanumeric alphabet (`A-Z`, `a-z`, `0-9`).
pub fn generate_code_verifier(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Derives the S256 code challenge for `verifier`.
///
/// SHA-256 over the UTF-8 bytes, encoded as URL-safe base64 without padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Escapes text for use inside HTML element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
