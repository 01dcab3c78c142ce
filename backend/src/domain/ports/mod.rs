//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod upload_credentials_issuer;
mod upload_signer;
mod video_catalog;
mod video_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use upload_credentials_issuer::MockUploadCredentialsIssuer;
pub use upload_credentials_issuer::UploadCredentialsIssuer;
#[cfg(test)]
pub use upload_signer::MockUploadSigner;
pub use upload_signer::{UploadSigner, UploadSignerError};
#[cfg(test)]
pub use video_catalog::{MockVideoCatalogCommand, MockVideoCatalogQuery};
pub use video_catalog::{VideoCatalogCommand, VideoCatalogQuery};
#[cfg(test)]
pub use video_repository::MockVideoRepository;
pub use video_repository::{VideoRepository, VideoRepositoryError};
