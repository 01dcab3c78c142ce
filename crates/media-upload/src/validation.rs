//! Local checks run before any bytes leave the machine.

use crate::file::FileKind;

const MIB: u64 = 1024 * 1024;

/// Largest accepted video.
pub const MAX_VIDEO_BYTES: u64 = 100 * MIB;
/// Largest accepted image.
pub const MAX_IMAGE_BYTES: u64 = 5 * MIB;
/// Image types the feed can render.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Why a file was refused. The messages are shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A video slot received something that is not a video.
    #[error("Please upload a valid video file")]
    NotAVideo,
    /// The video exceeds [`MAX_VIDEO_BYTES`].
    #[error("Video size must be less than 100MB")]
    VideoTooLarge,
    /// An image slot received an unsupported type.
    #[error("Please upload a valid image file (JPEG, PNG, or WebP)")]
    UnsupportedImage,
    /// The image exceeds [`MAX_IMAGE_BYTES`].
    #[error("File size must be less than 5MB")]
    ImageTooLarge,
}

/// Check a file's declared type and size against the rules for `kind`.
///
/// Type is checked before size.
///
/// ```
/// use media_upload::{FileKind, ValidationError, validate};
///
/// assert_eq!(validate(FileKind::Image, "image/png", 3 * 1024 * 1024), Ok(()));
/// assert_eq!(
///     validate(FileKind::Video, "video/mp4", 200 * 1024 * 1024),
///     Err(ValidationError::VideoTooLarge)
/// );
/// ```
///
/// # Errors
/// Returns the first rule the file breaks.
pub fn validate(kind: FileKind, mime_type: &str, size: u64) -> Result<(), ValidationError> {
    match kind {
        FileKind::Video => {
            if !mime_type.starts_with("video/") {
                return Err(ValidationError::NotAVideo);
            }
            if size > MAX_VIDEO_BYTES {
                return Err(ValidationError::VideoTooLarge);
            }
        }
        FileKind::Image => {
            if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
                return Err(ValidationError::UnsupportedImage);
            }
            if size > MAX_IMAGE_BYTES {
                return Err(ValidationError::ImageTooLarge);
            }
        }
    }
    Ok(())
}
