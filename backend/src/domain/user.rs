//! Authenticated user identity carried in the session.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reasons a raw identifier cannot become a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier was not a canonical UUID string.
    #[error("user id must be a valid UUID")]
    Malformed,
}

/// Stable user identifier stored as a UUID.
///
/// The original string is kept alongside the parsed value so session cookies
/// round-trip byte for byte.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::new("123e4567-e89b-12d3-a456-426614174000").unwrap();
/// assert_eq!(id.as_ref(), "123e4567-e89b-12d3-a456-426614174000");
/// assert!(UserId::new(" not-a-uuid ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(UserIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdError::Malformed);
        }
        let parsed = Uuid::parse_str(&raw).map_err(|_| UserIdError::Malformed)?;
        Ok(Self(parsed, raw))
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.1
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdError::Empty)]
    #[case("abc", UserIdError::Malformed)]
    #[case(" 123e4567-e89b-12d3-a456-426614174000", UserIdError::Malformed)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserIdError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn serde_round_trips_as_plain_string() {
        let id = UserId::random();
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, format!("\"{id}\""));
        let back: UserId = serde_json::from_str(&json).expect("deserialise id");
        assert_eq!(back, id);
    }
}
