use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The identity `AuthMiddleware` resolved for the current request.
///
/// Use it as a handler argument on routes inside a scope wrapped by `AuthMiddleware`.
/// If no identity is present (the middleware did not run), extraction fails with the
/// generic 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                let err = AppError::Unauthorized(
                    "No authenticated identity on request; is AuthMiddleware applied?".into(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
