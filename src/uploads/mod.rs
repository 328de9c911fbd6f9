mod local;

pub use local::UploadDir;

use thiserror::Error;

/// URL path segment under which the content directory is served.
pub const PUBLIC_PATH: &str = "/uploads";

/// Form field carrying the optional customization picture.
pub const PICTURE_FIELD: &str = "selectedPicture";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected file field: {0}")]
    UnexpectedFile(String),
    #[error("Upload not found: {0}")]
    NotFound(String),
}
