//! Decoding: PNG/JPEG sources into [`Image`], and WebP output back to pixels.

use image::{DynamicImage, ImageFormat as CodecFormat};
use imgref::ImgVec;
use rgb::{RGB8, RGBA8};

use crate::error::{DecodingError, Error, Result};
use crate::types::Image;

/// Decode PNG or JPEG bytes into an [`Image`].
///
/// The container is detected from the bytes, not from a file name, so a
/// JPEG saved as `.png` still decodes. Content in any other recognised
/// format is rejected with [`Error::UnsupportedFormat`]; unrecognised bytes
/// surface as [`Error::Decode`].
pub fn decode_source(data: &[u8]) -> Result<Image> {
    let format = image::guess_format(data)?;
    if !matches!(format, CodecFormat::Png | CodecFormat::Jpeg) {
        return Err(Error::UnsupportedFormat(format!(
            "{format:?} is not a PNG or JPEG source"
        )));
    }

    let decoded = image::load_from_memory_with_format(data, format)?;
    Ok(into_image(decoded))
}

fn into_image(decoded: DynamicImage) -> Image {
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);

    if decoded.color().has_alpha() {
        let pixels = decoded
            .into_rgba8()
            .pixels()
            .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
            .collect();
        Image::Rgba(ImgVec::new(pixels, width, height))
    } else {
        let pixels = decoded
            .into_rgb8()
            .pixels()
            .map(|p| RGB8::new(p[0], p[1], p[2]))
            .collect();
        Image::Rgb(ImgVec::new(pixels, width, height))
    }
}

/// Decode WebP data to RGBA pixels.
///
/// Returns the decoded pixels and dimensions.
///
/// # Example
///
/// ```rust,no_run
/// let webp_data: &[u8] = &[0u8; 100]; // placeholder
/// let (pixels, width, height) = webpx_convert::decode_rgba(webp_data)?;
/// # Ok::<(), webpx_convert::Error>(())
/// ```
pub fn decode_rgba(data: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let mut width: i32 = 0;
    let mut height: i32 = 0;

    let ptr =
        unsafe { libwebp_sys::WebPDecodeRGBA(data.as_ptr(), data.len(), &mut width, &mut height) };

    if ptr.is_null() {
        return Err(Error::DecodeFailed(DecodingError::BitstreamError));
    }

    let size = (width as usize) * (height as usize) * 4;
    let pixels = unsafe {
        let slice = core::slice::from_raw_parts(ptr, size);
        let vec = slice.to_vec();
        libwebp_sys::WebPFree(ptr as *mut _);
        vec
    };

    Ok((pixels, width as u32, height as u32))
}
