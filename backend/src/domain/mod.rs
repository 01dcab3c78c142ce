//! Domain primitives, services and ports.
//!
//! Everything here is transport agnostic. Inbound adapters translate HTTP
//! requests into calls on the driving ports in [`ports`]; outbound adapters
//! implement the driven ports.

pub mod auth;
pub mod authorization;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod upload_credentials;
pub mod user;
pub mod video;
pub mod video_catalog_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::authorization::{Decision, GatePolicy, authorize};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload_credentials::{
    DEFAULT_CREDENTIAL_TTL, MAX_CREDENTIAL_TTL, UploadCredentialService, UploadCredentials,
};
pub use self::user::{UserId, UserIdError};
pub use self::video::{
    CANONICAL_HEIGHT, CANONICAL_WIDTH, DEFAULT_QUALITY, NewVideo, Transformation, Video,
    VideoDraft, VideoField, VideoId, VideoValidationError, sort_newest_first,
};
pub use self::video_catalog_service::VideoCatalogService;
