//! Login credentials accepted by the identity endpoints.
//!
//! Handlers turn raw JSON into [`LoginCredentials`] before talking to the
//! [`LoginService`](crate::domain::ports::LoginService) port, so blank input
//! never reaches an authenticator.

use zeroize::Zeroizing;

/// Reasons a login payload is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password pair.
///
/// The username is trimmed; the password is kept verbatim and wiped from
/// memory on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("  \t", "pw", LoginValidationError::EmptyUsername)]
    #[case("creator", "", LoginValidationError::EmptyPassword)]
    fn blank_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn username_is_trimmed_but_password_is_not() {
        let creds = LoginCredentials::try_from_parts("  creator ", " pw ").expect("valid");
        assert_eq!(creds.username(), "creator");
        assert_eq!(creds.password(), " pw ");
    }
}
