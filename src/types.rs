//! Core types for image data representation.

use imgref::ImgVec;
use rgb::{RGB8, RGBA8};

use crate::error::{DecodingError, Error, Result};

/// A decoded image held in memory between decode and encode.
///
/// Opaque sources stay three-channel so the encoder does not emit an alpha
/// plane for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// 8-bit RGB pixels.
    Rgb(ImgVec<RGB8>),
    /// 8-bit RGBA pixels.
    Rgba(ImgVec<RGBA8>),
}

impl Image {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            Image::Rgb(img) => img.width() as u32,
            Image::Rgba(img) => img.width() as u32,
        }
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Image::Rgb(img) => img.height() as u32,
            Image::Rgba(img) => img.height() as u32,
        }
    }

    /// Whether the pixels carry an alpha channel.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        matches!(self, Image::Rgba(_))
    }
}

/// Information about a WebP image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether the image has an alpha channel.
    pub has_alpha: bool,
    /// Whether the image is animated.
    pub has_animation: bool,
    /// Bitstream format (lossy or lossless).
    pub format: BitstreamFormat,
}

impl ImageInfo {
    /// Get info from WebP data without decoding.
    pub fn from_webp(data: &[u8]) -> Result<Self> {
        let mut width: i32 = 0;
        let mut height: i32 = 0;

        let result =
            unsafe { libwebp_sys::WebPGetInfo(data.as_ptr(), data.len(), &mut width, &mut height) };

        if result == 0 {
            return Err(Error::InvalidWebP);
        }

        let mut features = core::mem::MaybeUninit::<libwebp_sys::WebPBitstreamFeatures>::uninit();
        let status = unsafe {
            libwebp_sys::WebPGetFeatures(data.as_ptr(), data.len(), features.as_mut_ptr())
        };

        if status != libwebp_sys::VP8StatusCode::VP8_STATUS_OK {
            return Err(Error::DecodeFailed(DecodingError::from(status as i32)));
        }
        // SAFETY: WebPGetFeatures filled the struct on VP8_STATUS_OK.
        let features = unsafe { features.assume_init() };

        let format = match features.format {
            1 => BitstreamFormat::Lossy,
            2 => BitstreamFormat::Lossless,
            _ => BitstreamFormat::Undefined,
        };

        Ok(ImageInfo {
            width: width as u32,
            height: height as u32,
            has_alpha: features.has_alpha != 0,
            has_animation: features.has_animation != 0,
            format,
        })
    }
}

/// Bitstream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BitstreamFormat {
    /// Format not determined (mixed, or animated).
    #[default]
    Undefined,
    /// Lossy compression (VP8).
    Lossy,
    /// Lossless compression (VP8L).
    Lossless,
}
