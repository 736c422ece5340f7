use crate::{
    auth::{CredentialVerifier, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new user account and returns its public fields.
///
/// ## Responses:
/// - `201 Created`: `{id, username, email}`.
/// - `400 Bad Request`: malformed JSON or invalid fields.
/// - `409 Conflict`: the email is already registered.
#[post("/register")]
pub async fn register(
    verifier: web::Data<CredentialVerifier>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = verifier.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Authenticates a user and returns an access token.
///
/// ## Responses:
/// - `200 OK`: `{access_token, token_type, expires_in}`.
/// - `400 Bad Request`: malformed JSON or invalid fields.
/// - `401 Unauthorized`: unknown email or wrong password, indistinguishably.
#[post("/login")]
pub async fn login(
    verifier: web::Data<CredentialVerifier>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = verifier.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(token))
}
