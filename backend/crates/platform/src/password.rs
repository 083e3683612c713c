//! Password Hashing
//!
//! Argon2id hashing with an optional application-wide pepper.
//! Hash format is the standard PHC string, so parameters can be
//! upgraded without a migration.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

/// Error from password hashing or verification
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed")]
    Hash,
    #[error("Stored password hash is malformed")]
    MalformedHash,
}

fn argon2_context(pepper: Option<&[u8]>) -> Result<Argon2<'_>, PasswordError> {
    let params = Params::default();
    match pepper {
        Some(secret) => Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, params)
            .map_err(|_| PasswordError::Hash),
        None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
    }
}

/// Hash a password into a PHC string
pub fn hash_password(password: &str, pepper: Option<&[u8]>) -> Result<String, PasswordError> {
    let password = Zeroizing::new(password.as_bytes().to_vec());
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let argon2 = argon2_context(pepper)?;
    let hash = argon2
        .hash_password(&password, &salt)
        .map_err(|_| PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string
pub fn verify_password(
    password: &str,
    stored_hash: &str,
    pepper: Option<&[u8]>,
) -> Result<bool, PasswordError> {
    let password = Zeroizing::new(password.as_bytes().to_vec());
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::MalformedHash)?;

    let argon2 = argon2_context(pepper)?;
    Ok(argon2.verify_password(&password, &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse battery staple", None).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password("correct horse battery staple", &hash, None).unwrap());
        assert!(!verify_password("wrong password", &hash, None).unwrap());
    }

    #[test]
    fn test_pepper_changes_outcome() {
        let pepper = b"application-pepper";
        let hash = hash_password("secret", Some(pepper)).unwrap();

        assert!(verify_password("secret", &hash, Some(pepper)).unwrap());
        // Without the pepper the hash must not verify
        assert!(!verify_password("secret", &hash, None).unwrap());
    }

    #[test]
    fn test_unique_salts() {
        let a = hash_password("same password", None).unwrap();
        let b = hash_password("same password", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash() {
        let result = verify_password("secret", "not-a-phc-string", None);
        assert!(matches!(result, Err(PasswordError::MalformedHash)));
    }
}
