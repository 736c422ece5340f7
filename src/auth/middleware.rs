use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::gate::TokenGate;
use crate::error::AppError;

/// Guards every route of the scope it wraps with `TokenGate::authenticate`.
///
/// Admitted requests carry an `AuthenticatedUser` in their extensions; rejected ones are
/// answered with the generic 401 without reaching the handler.
#[derive(Clone)]
pub struct AuthMiddleware {
    gate: Arc<TokenGate>,
}

impl AuthMiddleware {
    pub fn new(gate: Arc<TokenGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            gate: Arc::clone(&self.gate),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    gate: Arc<TokenGate>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);

        Box::pin(async move {
            match gate.authenticate(req.request()).await {
                Ok(user) => {
                    req.extensions_mut().insert(AuthenticatedUser(user));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log_rejection(&req, &err);
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

// Only the path and the internal reason are logged, never the header itself.
fn log_rejection(req: &ServiceRequest, err: &AppError) {
    match err {
        AppError::Unauthorized(reason) => {
            log::debug!("Rejected {} {}: {}", req.method(), req.path(), reason)
        }
        other => log::warn!("Authentication aborted for {}: {}", req.path(), other),
    }
}
