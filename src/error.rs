//! Error types for webpx-convert operations.

use std::path::PathBuf;

/// Result type for webpx-convert operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for webpx-convert operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem access failed (listing, reading, or writing).
    #[error("{}: {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Source bytes could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    /// Image format is not handled by the codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// Invalid input parameters (dimensions, buffer size, etc.)
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Encoder setup failed
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// libwebp encoding failed
    #[error("encode failed: {0}")]
    EncodeFailed(EncodingError),
    /// libwebp decoding failed
    #[error("decode failed: {0}")]
    DecodeFailed(DecodingError),
    /// Invalid WebP data
    #[error("invalid WebP data")]
    InvalidWebP,
    /// Writing a progress line failed.
    #[error("writing progress: {0}")]
    Progress(#[source] std::io::Error),
    /// Converting a specific file failed.
    #[error("converting {}: {source}", path.display())]
    Convert {
        /// Source file being converted.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn convert(path: impl Into<PathBuf>, source: Error) -> Self {
        Self::Convert {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// `WebPEncodingError` codes reported by libwebp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum EncodingError {
    #[error("ok")]
    Ok,
    #[error("out of memory")]
    OutOfMemory,
    #[error("bitstream out of memory")]
    BitstreamOutOfMemory,
    #[error("null parameter")]
    NullParameter,
    #[error("invalid configuration")]
    InvalidConfiguration,
    /// Width or height is 0 or above 16383.
    #[error("bad dimension")]
    BadDimension,
    #[error("partition0 overflow")]
    Partition0Overflow,
    #[error("partition overflow")]
    PartitionOverflow,
    #[error("bad write")]
    BadWrite,
    #[error("file too big")]
    FileTooBig,
    #[error("user abort")]
    UserAbort,
    /// Any code libwebp adds after `VP8_ENC_ERROR_LAST`.
    #[error("unknown error")]
    Last,
}

impl From<i32> for EncodingError {
    fn from(code: i32) -> Self {
        use EncodingError::*;
        const BY_CODE: [EncodingError; 11] = [
            Ok,
            OutOfMemory,
            BitstreamOutOfMemory,
            NullParameter,
            InvalidConfiguration,
            BadDimension,
            Partition0Overflow,
            PartitionOverflow,
            BadWrite,
            FileTooBig,
            UserAbort,
        ];
        usize::try_from(code)
            .ok()
            .and_then(|i| BY_CODE.get(i).copied())
            .unwrap_or(Last)
    }
}

/// `VP8StatusCode` values reported by libwebp's decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum DecodingError {
    #[error("ok")]
    Ok,
    #[error("out of memory")]
    OutOfMemory,
    #[error("invalid param")]
    InvalidParam,
    #[error("bitstream error")]
    BitstreamError,
    #[error("unsupported feature")]
    UnsupportedFeature,
    #[error("suspended")]
    Suspended,
    #[error("user abort")]
    UserAbort,
    #[error("not enough data")]
    NotEnoughData,
}

impl From<i32> for DecodingError {
    fn from(code: i32) -> Self {
        use DecodingError::*;
        const BY_CODE: [DecodingError; 7] = [
            Ok,
            OutOfMemory,
            InvalidParam,
            BitstreamError,
            UnsupportedFeature,
            Suspended,
            UserAbort,
        ];
        usize::try_from(code)
            .ok()
            .and_then(|i| BY_CODE.get(i).copied())
            .unwrap_or(NotEnoughData)
    }
}
