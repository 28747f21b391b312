//! # webpx-convert
//!
//! Batch-convert the PNG and JPEG images in a directory to WebP.
//!
//! The crate scans one directory (never its subdirectories), picks up every
//! file whose name ends in `.png`, `.jpg`, or `.jpeg` (any case), decodes it,
//! and writes a WebP sibling with the extension swapped. Encoding uses
//! libwebp's default configuration; originals are left in place and an
//! existing `.webp` with the same name is overwritten.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! // Prints "Converting a.png to a.webp..." / "Done." for each file.
//! let written = webpx_convert::convert_to_webp("./images")?;
//! for c in &written {
//!     println!("{} -> {} ({} bytes)", c.source.display(), c.target.display(), c.encoded_bytes);
//! }
//! # Ok::<(), webpx_convert::Error>(())
//! ```
//!
//! ## Custom codec
//!
//! [`Converter`] is generic over [`ImageCodec`], so the scan can run against
//! any decode/encode pair:
//!
//! ```rust,no_run
//! use webpx_convert::{Converter, LibWebpCodec};
//!
//! let mut log = Vec::new();
//! Converter::new(LibWebpCodec).run("./images", &mut log)?;
//! # Ok::<(), webpx_convert::Error>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod codec;
mod convert;
mod decode;
mod encode;
mod error;
mod format;
mod types;

pub use codec::{ImageCodec, LibWebpCodec};
pub use convert::{convert_to_webp, target_path, Conversion, Converter};
pub use decode::{decode_rgba, decode_source};
pub use encode::{encode_image, encode_rgb, encode_rgba};
pub use error::{DecodingError, EncodingError, Error, Result};
pub use format::{source_format_of, ImageFormat};
pub use types::{BitstreamFormat, Image, ImageInfo};

/// Version of the linked libwebp encoder as `(major, minor, patch)`.
pub fn version() -> (u32, u32, u32) {
    let v = unsafe { libwebp_sys::WebPGetEncoderVersion() } as u32;
    ((v >> 16) & 0xff, (v >> 8) & 0xff, v & 0xff)
}
