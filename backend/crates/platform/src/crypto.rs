//! Cryptographic Utilities
//!
//! Hashing, random bytes, and the HMAC-signed token format used for
//! session cookies (`<uuid>.<base64url signature>`).

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    // HMAC: H((K XOR opad) || H((K XOR ipad) || message))
    let mut o_key_pad = [0x5cu8; 64];
    let mut i_key_pad = [0x36u8; 64];

    for i in 0..32 {
        o_key_pad[i] ^= key[i];
        i_key_pad[i] ^= key[i];
    }

    let mut inner_hash = Sha256::new();
    inner_hash.update(i_key_pad);
    inner_hash.update(data);
    let inner_result = inner_hash.finalize();

    let mut outer_hash = Sha256::new();
    outer_hash.update(o_key_pad);
    outer_hash.update(inner_result);
    outer_hash.finalize().into()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Sign a session ID into a cookie token: `<uuid>.<base64url sig>`
pub fn sign_session_token(session_id: Uuid, secret: &[u8; 32]) -> String {
    let id_str = session_id.to_string();
    let sig = hmac_sha256(secret, id_str.as_bytes());
    let sig_b64 = general_purpose::URL_SAFE_NO_PAD.encode(sig);
    format!("{id_str}.{sig_b64}")
}

/// Verify a session cookie token and return the embedded session ID
///
/// Returns `None` for malformed tokens, bad signatures, or non-UUID IDs.
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<Uuid> {
    let (id_str, sig_b64) = token.split_once('.')?;

    let provided = general_purpose::URL_SAFE_NO_PAD.decode(sig_b64).ok()?;
    let expected = hmac_sha256(secret, id_str.as_bytes());

    if !constant_time_eq(&provided, &expected) {
        return None;
    }

    id_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        // SHA-256 of empty string
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        // SHA-256 of "hello"
        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_hmac_consistency() {
        let key = [42u8; 32];
        let data = b"test message";
        let mac1 = hmac_sha256(&key, data);
        let mac2 = hmac_sha256(&key, data);
        assert_eq!(mac1, mac2);

        let other_key = [43u8; 32];
        assert_ne!(mac1, hmac_sha256(&other_key, data));
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1u8, 2, 3, 4];
        let b = [1u8, 2, 3, 4];
        let c = [1u8, 2, 3, 5];
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
    }

    #[test]
    fn test_session_token_roundtrip() {
        let secret = [7u8; 32];
        let id = Uuid::new_v4();

        let token = sign_session_token(id, &secret);
        assert_eq!(verify_session_token(&token, &secret), Some(id));
    }

    #[test]
    fn test_session_token_rejects_tampering() {
        let secret = [7u8; 32];
        let id = Uuid::new_v4();
        let token = sign_session_token(id, &secret);

        // Wrong secret
        assert_eq!(verify_session_token(&token, &[8u8; 32]), None);

        // Swapped session ID keeps the old signature
        let other = Uuid::new_v4();
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{other}.{sig}");
        assert_eq!(verify_session_token(&forged, &secret), None);

        // Malformed token
        assert_eq!(verify_session_token("no-dot-here", &secret), None);
    }
}
