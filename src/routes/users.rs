use crate::{auth::AuthenticatedUser, models::PublicUser};
use actix_web::{get, HttpResponse, Responder};

/// Current user
///
/// Returns the public fields of the user the bearer token resolved to.
/// Must be mounted behind `AuthMiddleware`.
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(PublicUser::from(&user.0))
}
