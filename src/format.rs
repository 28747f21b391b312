//! Image formats recognised by file extension.

use core::str::FromStr;

use crate::error::Error;

/// Image formats the converter knows about.
///
/// [`Png`](ImageFormat::Png) and [`Jpeg`](ImageFormat::Jpeg) are accepted as
/// sources; [`WebP`](ImageFormat::WebP) is the only encode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
    /// WebP (lossy or lossless).
    WebP,
}

impl ImageFormat {
    /// Every format that is converted to WebP.
    pub const SOURCES: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

    /// File extensions associated with this format, lowercase, without the dot.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::WebP => &["webp"],
        }
    }

    /// Extension used when writing this format.
    #[must_use]
    pub const fn primary_extension(self) -> &'static str {
        self.extensions()[0]
    }

    /// Whether files of this format are picked up by the converter.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg)
    }

    /// Look up a format by extension (case-insensitive, no leading dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP]
            .into_iter()
            .find(|format| {
                format
                    .extensions()
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            })
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        Self::from_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("unknown extension: {ext}")))
    }
}

/// Return the source format whose suffix `file_name` ends with.
///
/// Only the suffix is inspected. Matching is case-insensitive, so
/// `IMAGE.JPEG` and `image.Jpeg` both match while `image.jpegx` does not.
/// A bare suffix such as `.png` counts as a match.
#[must_use]
pub fn source_format_of(file_name: &str) -> Option<ImageFormat> {
    let lower = file_name.to_ascii_lowercase();
    ImageFormat::SOURCES.into_iter().find(|format| {
        format.extensions().iter().any(|ext| {
            lower
                .strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with('.'))
        })
    })
}
