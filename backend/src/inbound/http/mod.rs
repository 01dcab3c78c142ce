//! HTTP inbound adapter.

pub mod error;
pub mod gate;
pub mod health;
pub mod identity;
pub mod imagekit_auth;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod videos;

pub use error::ApiResult;
pub use gate::AuthorizationGate;
