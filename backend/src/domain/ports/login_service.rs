//! Driving port for the identity endpoints.
//!
//! Password storage and verification stay outside this crate. The fixture
//! below stands in for a real identity provider during development.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Checks credentials and names the authenticated user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the user id for valid credentials, or an unauthorized error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development user id issued by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Accepts `admin` / `password` and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_development_account() {
        let creds = LoginCredentials::try_from_parts("admin", "password").expect("shape");
        let id = FixtureLoginService.authenticate(&creds).await.expect("login");
        assert_eq!(id.as_ref(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[case("admin", "hunter2")]
    #[case("root", "password")]
    #[tokio::test]
    async fn fixture_rejects_anything_else(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("shape");
        let err = FixtureLoginService
            .authenticate(&creds)
            .await
            .expect_err("must reject");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
