//! Port bundle injected into handlers via `web::Data`.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, UploadCredentialsIssuer, VideoCatalogCommand, VideoCatalogQuery,
};

/// Driving ports used by the HTTP adapter.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check behind `/api/auth/login`.
    pub login: Arc<dyn LoginService>,
    /// Feed reads.
    pub videos: Arc<dyn VideoCatalogQuery>,
    /// Feed writes.
    pub videos_command: Arc<dyn VideoCatalogCommand>,
    /// Direct-upload credentials.
    pub upload_credentials: Arc<dyn UploadCredentialsIssuer>,
}

/// Constructor arguments for [`HttpState`].
pub struct HttpStatePorts {
    /// See [`HttpState::login`].
    pub login: Arc<dyn LoginService>,
    /// See [`HttpState::videos`].
    pub videos: Arc<dyn VideoCatalogQuery>,
    /// See [`HttpState::videos_command`].
    pub videos_command: Arc<dyn VideoCatalogCommand>,
    /// See [`HttpState::upload_credentials`].
    pub upload_credentials: Arc<dyn UploadCredentialsIssuer>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            videos,
            videos_command,
            upload_credentials,
        } = ports;
        Self {
            login,
            videos,
            videos_command,
            upload_credentials,
        }
    }
}

impl HttpState {
    /// Bundle the given ports.
    pub fn new(ports: HttpStatePorts) -> Self {
        ports.into()
    }
}
