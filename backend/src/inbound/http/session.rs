//! Session access for handlers and the authorization gate.
//!
//! Only the authenticated user's id is stored. A value that no longer parses
//! as a [`UserId`] is treated as if no session existed.

use actix_session::{Session, SessionExt};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Handler-facing view of the cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as the authenticated user and rotate the cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The authenticated user, if any.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        read_user_id(&self.0)
    }

    /// The authenticated user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("Unauthorized"))
    }
}

fn read_user_id(session: &Session) -> Result<Option<UserId>, Error> {
    let raw = session
        .get::<String>(USER_ID_KEY)
        .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
    Ok(raw.and_then(|value| match UserId::new(value) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(error = %err, "ignoring malformed user id in session cookie");
            None
        }
    }))
}

/// Whether the request carries a usable session, as seen by middleware.
///
/// Unreadable sessions count as absent.
pub(crate) fn has_session(req: &ServiceRequest) -> bool {
    matches!(read_user_id(&req.get_session()), Ok(Some(_)))
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
