/// Convenience result type used across the crate.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error taxonomy for decoding, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// The source image has a zero dimension.
    #[error("source image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The payload is not a recognized image container.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The upload exceeds the accepted size.
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// True for errors caused by the caller's input rather than the process.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, FrameError::Encode(_) | FrameError::Other(_))
    }
}
