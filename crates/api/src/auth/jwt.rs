//! Session tokens.
//!
//! An access token is an HS256 JWT whose subject is the user id. A refresh
//! token is an opaque random string handed to the client once; the
//! `user_sessions` table keeps only its SHA-256 digest.

use chrono::{DateTime, Duration, Utc};
use journey_core::types::DbId;
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 1440;
pub const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;

/// Access token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issued_now(user_id: DbId, lifetime: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            sub: user_id,
            exp: (issued_at + lifetime).timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Seconds an access token stays valid, as reported in `expires_in`.
    pub fn access_token_lifetime_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Expiry of a refresh session created at `now`.
    pub fn refresh_expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.refresh_token_expiry_days)
    }

    /// Sign a fresh access token for `user_id`.
    pub fn issue_access_token(&self, user_id: DbId) -> Result<String, JwtError> {
        let claims = Claims::issued_now(user_id, Duration::minutes(self.access_token_expiry_mins));
        encode(&Header::default(), &claims, &self.encoding_key())
    }

    /// Verify signature and expiry, returning the claims.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key(), &Validation::default()).map(|d| d.claims)
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// A newly minted refresh token and the digest to persist.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

/// Lowercase hex SHA-256 of a refresh token, the form stored in the database.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
