//! Password hashing, session tokens and the authenticated-user extractor.
//!
//! Passwords are stored as Argon2id PHC strings. Session tokens have the form
//! `base64url(claims) "." base64url(HMAC-SHA256(secret, base64url(claims)))`
//! where claims are `{"sub": user_id, "iat": unix_secs, "exp": unix_secs}`.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use daybook_core::{defaults, Error, Result, UserRepository};

use crate::{error::ApiError, state::AppState};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// PASSWORDS
// =============================================================================

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

// =============================================================================
// TOKENS
// =============================================================================

/// Signed session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

/// Issues and verifies HMAC-signed session tokens.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Arc<Vec<u8>>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Signer with the given key and the default lifetime.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            ttl: Duration::days(defaults::TOKEN_TTL_DAYS),
        }
    }

    /// Signer with a freshly generated random key.
    ///
    /// Tokens do not survive a restart.
    pub fn random() -> Self {
        let mut secret = vec![0u8; defaults::TOKEN_SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::Internal(format!("Invalid token secret: {}", e)))
    }

    /// Issue a token for `user_id` valid from now.
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| Error::Internal(format!("Token lifetime {} out of range", self.ttl)))?;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let invalid = || Error::Unauthorized("Invalid token".to_string());

        let (payload, signature) = token.split_once('.').ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| invalid())?;

        let raw = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
        let claims: Claims = serde_json::from_slice(&raw).map_err(|_| invalid())?;

        if claims.exp <= now.timestamp() {
            return Err(Error::Unauthorized("Token expired".to_string()));
        }
        Ok(claims)
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// The caller identified by a valid `Authorization: Bearer` token.
///
/// Usage:
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> impl IntoResponse {
///     state.db.notes.list(auth.user_id, ...)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        // Tokens outlive deleted accounts.
        if !state.db.users.exists(claims.sub).await? {
            return Err(ApiError::Unauthorized(
                "Invalid or expired token".to_string(),
            ));
        }

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
