//! WebP encoding at libwebp's default settings.

use imgref::ImgRef;
use rgb::{RGB8, RGBA8};

use crate::error::{EncodingError, Error, Result};
use crate::types::Image;

/// Encode RGBA pixels to WebP.
///
/// # Arguments
///
/// * `data` - RGBA pixel data (4 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Example
///
/// ```rust,no_run
/// let rgba: &[u8] = &[0u8; 640 * 480 * 4]; // placeholder
/// let webp = webpx_convert::encode_rgba(rgba, 640, 480)?;
/// # Ok::<(), webpx_convert::Error>(())
/// ```
pub fn encode_rgba(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    encode_default(data, width, height, 4)
}

/// Encode RGB pixels to WebP (no alpha).
///
/// # Arguments
///
/// * `data` - RGB pixel data (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_rgb(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    encode_default(data, width, height, 3)
}

/// Encode a decoded [`Image`], picking RGB or RGBA import by its layout.
pub fn encode_image(image: &Image) -> Result<Vec<u8>> {
    match image {
        Image::Rgb(img) => encode_rgb(&rgb_bytes(img.as_ref()), image.width(), image.height()),
        Image::Rgba(img) => encode_rgba(&rgba_bytes(img.as_ref()), image.width(), image.height()),
    }
}

fn rgb_bytes(img: ImgRef<'_, RGB8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() * img.height() * 3);
    for px in img.pixels() {
        out.extend_from_slice(&[px.r, px.g, px.b]);
    }
    out
}

fn rgba_bytes(img: ImgRef<'_, RGBA8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() * img.height() * 4);
    for px in img.pixels() {
        out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
    }
    out
}

fn encode_default(data: &[u8], width: u32, height: u32, bpp: u8) -> Result<Vec<u8>> {
    validate_dimensions(width, height)?;
    validate_buffer_size(data.len(), width, height, bpp as u32)?;

    let webp_config = libwebp_sys::WebPConfig::new()
        .map_err(|_| Error::InvalidConfig("failed to init config".into()))?;

    let mut picture = libwebp_sys::WebPPicture::new()
        .map_err(|_| Error::InvalidConfig("failed to init picture".into()))?;

    picture.width = width as i32;
    picture.height = height as i32;
    picture.use_argb = 1;

    let import_ok = if bpp == 4 {
        unsafe {
            libwebp_sys::WebPPictureImportRGBA(&mut picture, data.as_ptr(), (width * 4) as i32)
        }
    } else {
        unsafe {
            libwebp_sys::WebPPictureImportRGB(&mut picture, data.as_ptr(), (width * 3) as i32)
        }
    };

    if import_ok == 0 {
        unsafe { libwebp_sys::WebPPictureFree(&mut picture) };
        return Err(Error::EncodeFailed(EncodingError::OutOfMemory));
    }

    let mut writer = core::mem::MaybeUninit::<libwebp_sys::WebPMemoryWriter>::uninit();
    unsafe { libwebp_sys::WebPMemoryWriterInit(writer.as_mut_ptr()) };
    let mut writer = unsafe { writer.assume_init() };

    picture.writer = Some(libwebp_sys::WebPMemoryWrite);
    picture.custom_ptr = &mut writer as *mut _ as *mut _;

    let ok = unsafe { libwebp_sys::WebPEncode(&webp_config, &mut picture) };

    let result = if ok == 0 {
        Err(Error::EncodeFailed(EncodingError::from(
            picture.error_code as i32,
        )))
    } else if writer.mem.is_null() || writer.size == 0 {
        Err(Error::EncodeFailed(EncodingError::BadWrite))
    } else {
        let slice = unsafe { core::slice::from_raw_parts(writer.mem, writer.size) };
        Ok(slice.to_vec())
    };

    unsafe {
        libwebp_sys::WebPPictureFree(&mut picture);
        libwebp_sys::WebPMemoryWriterClear(&mut writer);
    }

    result
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    const MAX_DIMENSION: u32 = 16383;

    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(
            "width and height must be non-zero".into(),
        ));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidInput(format!(
            "dimensions exceed maximum ({} x {})",
            MAX_DIMENSION, MAX_DIMENSION
        )));
    }
    Ok(())
}

pub(crate) fn validate_buffer_size(size: usize, width: u32, height: u32, bpp: u32) -> Result<()> {
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(bpp as usize);

    if size < expected {
        return Err(Error::InvalidInput(format!(
            "buffer too small: got {}, expected {}",
            size, expected
        )));
    }
    Ok(())
}
