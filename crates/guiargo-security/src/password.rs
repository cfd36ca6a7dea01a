//! Password hashing with Argon2, plus verification of legacy bcrypt hashes

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

const BCRYPT_PREFIXES: [&str; 4] = ["$2y$", "$2b$", "$2a$", "$2x$"];

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if Self::is_legacy(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string()));
        }

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hashes imported from the PHP panel use bcrypt and should be
    /// replaced with Argon2 after the next successful login.
    pub fn is_legacy(hash: &str) -> bool {
        BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("s3creto!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!PasswordService::is_legacy(&hash));
        assert!(PasswordService::verify("s3creto!", &hash).unwrap());
        assert!(!PasswordService::verify("otro", &hash).unwrap());
    }

    #[test]
    fn test_legacy_bcrypt_hash_is_accepted() {
        let hash = bcrypt::hash("colaborador123", 4).unwrap();
        let php_style = hash.replacen("$2b$", "$2y$", 1);

        assert!(PasswordService::is_legacy(&php_style));
        assert!(PasswordService::verify("colaborador123", &php_style).unwrap());
        assert!(!PasswordService::verify("admin123", &php_style).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            PasswordService::verify("x", "not-a-hash"),
            Err(PasswordError::HashError(_))
        ));
    }
}
