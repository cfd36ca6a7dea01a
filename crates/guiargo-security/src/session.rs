//! Signed session tokens carried in the session cookie

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session creation failed: {0}")]
    CreationError(String),
    #[error("Session validation failed: {0}")]
    ValidationError(String),
    #[error("Session expired")]
    Expired,
}

/// Identity written into a fresh session.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub usuario_id: i32,
    pub username: String,
    pub rol: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl SessionService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Builds a service with a random per-process secret. Sessions will not
    /// survive a restart.
    pub fn with_ephemeral_secret(expiry_hours: i64) -> Self {
        warn!("No session secret configured, generating an ephemeral one");
        let bytes: [u8; 32] = rand::random();
        Self::new(&hex::encode(bytes), expiry_hours)
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_hours * 3600
    }

    pub fn issue(&self, identity: &SessionIdentity) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: identity.user_id.to_string(),
            usuario_id: identity.user_id,
            username: identity.username.clone(),
            rol: identity.role.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::CreationError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            user_id: 7,
            username: "maria".to_string(),
            role: "colaborador".to_string(),
            email: "maria@guiargo.mx".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = SessionService::new("test-secret", 1);
        let token = service.issue(&identity()).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.usuario_id, 7);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.rol, "colaborador");
        assert_eq!(service.expiry_seconds(), 3600);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = SessionService::new("secret-a", 1);
        let verifier = SessionService::new("secret-b", 1);
        let token = issuer.issue(&identity()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(SessionError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = SessionService::new("test-secret", -2);
        let token = service.issue(&identity()).unwrap();

        assert!(matches!(service.verify(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = SessionService::new("test-secret", 1);
        let mut token = service.issue(&identity()).unwrap();
        token.push('x');

        assert!(service.verify(&token).is_err());
    }
}
