use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached (or the connection dropped)
    #[error("{hint}")]
    Transport {
        hint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON we expected
    #[error("Received an invalid response from the server.")]
    InvalidResponse,
}

/// Failures of the pick-read-upload flow
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a PNG or JPEG image", path.display())]
    Unsupported { path: PathBuf },

    #[error(transparent)]
    Api(#[from] ApiError),
}
