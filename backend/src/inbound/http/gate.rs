//! Authorization gate middleware.
//!
//! Runs before routing reaches any handler: excluded prefixes pass straight
//! through, everything else is judged by [`GatePolicy::evaluate`] using the
//! presence of a valid session. Denied requests get the standard
//! `401 Unauthorized` error payload.
//!
//! The gate reads the session, so it must be registered *inside* the session
//! middleware:
//!
//! ```text
//! App::new().wrap(AuthorizationGate::default()).wrap(session).wrap(Trace)
//! ```

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::Error as ActixError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{Decision, Error, GatePolicy};
use crate::inbound::http::session::has_session;

/// Middleware factory applying a [`GatePolicy`].
#[derive(Clone, Debug, Default)]
pub struct AuthorizationGate {
    policy: Rc<GatePolicy>,
}

impl AuthorizationGate {
    /// Gate using a custom policy.
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthorizationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AuthorizationGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationGateMiddleware {
            service,
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// Service produced by [`AuthorizationGate`].
pub struct AuthorizationGateMiddleware<S> {
    service: S,
    policy: Rc<GatePolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = self.policy.evaluate(req.path(), has_session(&req));

        match decision {
            Decision::Admit => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Decision::Deny => Box::pin(async move {
                debug!(path = req.path(), "request denied by authorization gate");
                // Built inside the future so the trace id scope applies.
                let err = Error::unauthorized("Unauthorized");
                Ok(req.error_response(err).map_into_right_body())
            }),
        }
    }
}
