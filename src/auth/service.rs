//! Registration and login.
//!
//! bcrypt work happens on actix's blocking pool so that a burst of logins never
//! stalls the async workers.

use actix_web::web;
use std::sync::Arc;
use validator::Validate;

use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::auth::token::TokenService;
use crate::auth::{normalize_email, AccessToken, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::{NewUser, PublicUser};
use crate::store::UserStore;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Validates the request, hashes the password and creates the user.
    ///
    /// A duplicate email is reported by the store as `AppError::Conflict`.
    pub async fn register(&self, mut request: RegisterRequest) -> Result<PublicUser, AppError> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let RegisterRequest {
            username,
            email,
            password,
        } = request;
        let password_hash = web::block(move || hash_password(&password)).await??;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        log::info!("Registered user {}", user.id);
        Ok(PublicUser::from(&user))
    }

    /// Checks the credentials and issues an access token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, mut request: LoginRequest) -> Result<AccessToken, AppError> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let LoginRequest { email, password } = request;
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                web::block(move || verify_against_dummy(&password)).await?;
                return Err(invalid_credentials());
            }
        };

        let stored_hash = user.password_hash.clone();
        let matches = web::block(move || verify_password(&password, &stored_hash)).await??;
        if !matches {
            return Err(invalid_credentials());
        }

        let access_token = self.tokens.issue(&user)?;
        log::info!("Issued access token for user {}", user.id);
        Ok(AccessToken::bearer(access_token, self.tokens.ttl()))
    }
}
