//! Route authorization policy.
//!
//! [`authorize`] is a pure function over the request path and whether the
//! caller holds a session. The HTTP gate middleware consults
//! [`GatePolicy::is_excluded`] first so static assets and probes bypass the
//! policy entirely.

/// Outcome of evaluating a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through to its handler.
    Admit,
    /// Reject the request as unauthenticated.
    Deny,
}

/// Namespace reserved for the identity provider's own endpoints.
pub const AUTH_NAMESPACE: &str = "/api/auth";
/// Public feed and publishing endpoints; POST still checks the session itself.
pub const VIDEOS_PREFIX: &str = "/api/videos";
/// Pages that must stay reachable without a session.
pub const PUBLIC_PAGES: [&str; 3] = ["/", "/login", "/register"];

/// Path prefixes that never reach the policy.
pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 5] =
    ["/static/", "/images/", "/favicon.ico", "/public/", "/health/"];

/// Decide whether a request for `path` may proceed.
///
/// First match wins:
/// 1. anything under [`AUTH_NAMESPACE`];
/// 2. the exact public pages;
/// 3. anything under [`VIDEOS_PREFIX`];
/// 4. everything else needs a session.
///
/// # Examples
/// ```
/// use backend::domain::authorization::{authorize, Decision};
///
/// assert_eq!(authorize("/api/videos", false), Decision::Admit);
/// assert_eq!(authorize("/api/imagekit-auth", false), Decision::Deny);
/// assert_eq!(authorize("/api/imagekit-auth", true), Decision::Admit);
/// ```
#[must_use]
pub fn authorize(path: &str, session_present: bool) -> Decision {
    if path.starts_with(AUTH_NAMESPACE)
        || PUBLIC_PAGES.contains(&path)
        || path.starts_with(VIDEOS_PREFIX)
        || session_present
    {
        Decision::Admit
    } else {
        Decision::Deny
    }
}

/// Which paths the gate evaluates at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    excluded_prefixes: Vec<String>,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES)
    }
}

impl GatePolicy {
    /// Build a policy skipping the given path prefixes.
    pub fn new<I, S>(excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_prefixes: excluded_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// True when `path` bypasses the policy.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Evaluate `path`, admitting excluded paths unconditionally.
    pub fn evaluate(&self, path: &str, session_present: bool) -> Decision {
        if self.is_excluded(path) {
            Decision::Admit
        } else {
            authorize(path, session_present)
        }
    }
}
