use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: i64, email: String, name: String, role: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub,
            email,
            name,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    TokenGeneration(String),
    TokenInvalid(String),
    HashFailure(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            AuthError::TokenInvalid(msg) => write!(f, "invalid JWT token: {}", msg),
            AuthError::HashFailure(msg) => write!(f, "password hash error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry against the configured secret.
pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashFailure(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_round_trip() {
        let claims = Claims::new(1, "a@b.com".into(), "Admin".into(), "admin".into());
        let token = generate_jwt(&claims).expect("encode");
        let decoded = validate_jwt(&token).expect("decode");
        assert_eq!(decoded.sub, 1);
        assert_eq!(decoded.email, "a@b.com");
        assert_eq!(decoded.role, "admin");
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = Claims::new(1, "a@b.com".into(), "Admin".into(), "admin".into());
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = generate_jwt(&claims).expect("encode");
        assert!(validate_jwt(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_jwt("not-a-jwt").is_err());
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("Admin@123").expect("hash");
        assert!(verify_password("Admin@123", &hash));
        assert!(!verify_password("Admin@124", &hash));
        assert!(!verify_password("Admin@123", "not-a-phc-string"));
    }
}
