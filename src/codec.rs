//! The decode/encode collaborator used by the converter.

use crate::error::{Error, Result};
use crate::format::ImageFormat;
use crate::types::Image;

/// Turns source bytes into pixels and pixels into target bytes.
///
/// [`Converter`](crate::Converter) only talks to the codec through this
/// trait, so tests can swap in an implementation that never touches a real
/// image library.
pub trait ImageCodec {
    /// Decode an image file's bytes.
    fn decode(&self, data: &[u8]) -> Result<Image>;

    /// Encode `image` into `format`.
    fn encode(&self, image: &Image, format: ImageFormat) -> Result<Vec<u8>>;
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn decode(&self, data: &[u8]) -> Result<Image> {
        (**self).decode(data)
    }

    fn encode(&self, image: &Image, format: ImageFormat) -> Result<Vec<u8>> {
        (**self).encode(image, format)
    }
}

/// Codec backed by the `image` crate for PNG/JPEG input and libwebp for
/// WebP output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibWebpCodec;

impl ImageCodec for LibWebpCodec {
    fn decode(&self, data: &[u8]) -> Result<Image> {
        crate::decode::decode_source(data)
    }

    fn encode(&self, image: &Image, format: ImageFormat) -> Result<Vec<u8>> {
        match format {
            ImageFormat::WebP => crate::encode::encode_image(image),
            other => Err(Error::UnsupportedFormat(format!(
                "cannot encode to {other:?}"
            ))),
        }
    }
}
