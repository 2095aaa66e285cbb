//! Admin authentication: bcrypt credentials and HS256 bearer tokens.

pub mod credentials;
pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_JWT_EXPIRY_HOURS;
use crate::database::StorageError;

pub use credentials::{provision_admin, verify_credentials, Provisioned};
pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and checks admin tokens with the server secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: Duration::hours(expiry_hours.min(MAX_JWT_EXPIRY_HOURS) as i64),
        }
    }

    pub fn issue_token(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue_token_at(user_id, Utc::now())
    }

    /// Token as if issued at `issued_at`.
    pub fn issue_token_at(&self, user_id: i32, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.lifetime).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Account id for a valid, unexpired token. Every failure is `None`.
    pub fn verify_token(&self, token: &str) -> Option<i32> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.user_id),
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                None
            }
        }
    }
}
