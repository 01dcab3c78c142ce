//! What is being uploaded: the file itself and the kind of media it is.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use mime::Mime;

/// The two media kinds the feed accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileKind {
    /// A video clip.
    Video,
    /// A still image, typically a thumbnail.
    #[default]
    Image,
}

impl FileKind {
    /// Name the provider stores the upload under before uniquifying it.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }

    /// Provider folder for this kind.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Video => "/videos",
            Self::Image => "/images",
        }
    }

    /// MIME pattern offered to file pickers.
    #[must_use]
    pub const fn accept(self) -> &'static str {
        match self {
            Self::Video => "video/*",
            Self::Image => "image/*",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Returned when parsing an unknown [`FileKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file kind '{0}'; expected video or image")]
pub struct UnknownFileKind(pub String);

impl FromStr for FileKind {
    type Err = UnknownFileKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "image" => Ok(Self::Image),
            _ => Err(UnknownFileKind(s.to_owned())),
        }
    }
}

/// An in-memory file ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl UploadFile {
    /// Wrap already-loaded contents.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read `path` from disk. Without an explicit `mime_type` the type is
    /// guessed from the extension, falling back to
    /// `application/octet-stream`, which fails validation for either kind.
    ///
    /// # Errors
    /// Returns the I/O error when the file cannot be read.
    pub async fn from_path(path: &Path, mime_type: Option<&str>) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        let mime_type = mime_type.map_or_else(
            || guess_mime(path).map_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string(), |m| m.to_string()),
            str::to_owned,
        );
        Ok(Self::new(name, mime_type, bytes))
    }

    /// Original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }

    /// File contents; cloning is cheap.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }
}

/// Best-effort MIME type from a file extension.
#[must_use]
pub fn guess_mime(path: &Path) -> Option<Mime> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let guessed = match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "webp" => "image/webp".parse().ok()?,
        "mp4" | "m4v" => "video/mp4".parse().ok()?,
        "mov" => "video/quicktime".parse().ok()?,
        "webm" => "video/webm".parse().ok()?,
        "mkv" => "video/x-matroska".parse().ok()?,
        _ => return None,
    };
    Some(guessed)
}
