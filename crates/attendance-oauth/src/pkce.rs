//! PKCE and CSRF-state token generation (RFC 7636, S256 method).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate the CSRF `state` parameter: 20 CSPRNG bytes, URL-safe base64
/// without padding.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 20];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate the PKCE code verifier: 32 CSPRNG bytes, URL-safe base64
/// without padding (43 characters, within the RFC 7636 43..=128 window).
pub fn generate_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Derive the S256 code challenge: base64url(SHA-256(verifier ASCII)).
pub fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_url_safe(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn test_state_shape() {
        let state = generate_state();
        // 20 bytes -> ceil(20 * 4 / 3) = 27 chars unpadded
        assert_eq!(state.len(), 27);
        assert!(is_url_safe(&state));
    }

    #[test]
    fn test_verifier_shape() {
        let verifier = generate_verifier();
        // 32 bytes -> 43 chars unpadded
        assert_eq!(verifier.len(), 43);
        assert!(is_url_safe(&verifier));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_state(), generate_state());
        assert_ne!(generate_verifier(), generate_verifier());
    }

    #[test]
    fn test_challenge_matches_rfc7636_vector() {
        // Appendix B of RFC 7636.
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            code_challenge(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_challenge_is_url_safe_and_unpadded() {
        let challenge = code_challenge(&generate_verifier());
        assert_eq!(challenge.len(), 43);
        assert!(is_url_safe(&challenge));
    }
}
