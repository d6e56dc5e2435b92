//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::identity::UserIdentity;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: ?Sized = dyn TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for storage operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        hash_token_with_secret(&self.signing_secret, token)
    }

    /// Resolves a raw token to the user it was issued for.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<UserIdentity, AppError> {
        let token_hash = self.hash_token(token);

        let Some(user_uid) = self.repository.find_owner(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(UserIdentity::new(user_uid))
    }

    /// Issues a token for `user_uid`, storing only its hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or token is already taken.
    pub async fn issue_token(
        &self,
        name: &str,
        user_uid: &str,
        raw_token: &str,
    ) -> Result<ApiToken, AppError> {
        let token_hash = self.hash_token(raw_token);
        self.repository
            .create_token(name, user_uid, &token_hash)
            .await
    }
}

/// Computes the HMAC-SHA256 of `token` keyed by `secret`, hex-encoded.
pub fn hash_token_with_secret(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
