/// OCR backend access
///
/// This module handles:
/// - Wire types for the three endpoints (types.rs)
/// - Tolerant decoding of double-encoded bodies (decode.rs)
/// - The HTTP client and the upload pipeline (client.rs)

pub mod client;
pub mod decode;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{upload_image, OcrClient};
pub use error::{ApiError, UploadError};
pub use types::Recognition;
