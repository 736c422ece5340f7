//! Admission decision for protected routes.
//!
//! Every request runs the full check: bearer extraction, signature and expiry, then a
//! fresh user lookup. Nothing is cached between requests, and since tokens are not
//! revocable the lookup is what keeps a deleted user's tokens from working.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::HttpRequest;
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is case-insensitive. Anything else, including an empty token or extra
/// segments, yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}

pub struct TokenGate {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
}

impl TokenGate {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Resolves the caller of `req` to a stored user.
    ///
    /// Fails with `AppError::Unauthorized` when the header is missing or malformed, the
    /// token does not verify, or its subject no longer exists. Store failures pass
    /// through unchanged.
    pub async fn authenticate(&self, req: &HttpRequest) -> Result<User, AppError> {
        let token = bearer_token(req.headers())
            .ok_or_else(|| AppError::Unauthorized("Missing or malformed bearer token".into()))?;

        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Token subject no longer exists".into()))
    }
}
