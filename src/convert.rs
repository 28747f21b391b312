//! Directory scan: pick up PNG/JPEG files and write WebP siblings.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::codec::{ImageCodec, LibWebpCodec};
use crate::error::{Error, Result};
use crate::format::{source_format_of, ImageFormat};

/// One file written by a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Source image that was read.
    pub source: PathBuf,
    /// WebP file that was written next to it.
    pub target: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Size of the encoded WebP in bytes.
    pub encoded_bytes: usize,
}

/// Converts every PNG/JPEG file directly inside a directory to WebP.
///
/// The run is a single sequential pass. The first failure (listing,
/// reading, decoding, encoding, or writing) aborts the rest of the scan;
/// targets already written stay on disk.
///
/// # Example
///
/// ```rust,no_run
/// use webpx_convert::{Converter, LibWebpCodec};
///
/// let mut progress = Vec::new();
/// let written = Converter::new(LibWebpCodec).run("assets/img", &mut progress)?;
/// println!("{} files converted", written.len());
/// # Ok::<(), webpx_convert::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter<C> {
    codec: C,
}

impl<C: ImageCodec> Converter<C> {
    /// Create a converter around `codec`.
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Convert every source file in `directory`, writing progress lines to
    /// `progress`.
    ///
    /// Each file produces `Converting {name} to {new_name}...` once its
    /// source has decoded and `Done.` after the target is written. A source
    /// that fails to decode prints nothing.
    pub fn run<W: Write>(
        &self,
        directory: impl AsRef<Path>,
        progress: &mut W,
    ) -> Result<Vec<Conversion>> {
        let directory = directory.as_ref();
        info!(dir = %directory.display(), "scanning for PNG/JPEG sources");

        let entries = fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;
        let mut converted = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| Error::io(directory, e))?;
            let name = entry.file_name();
            // The suffix is ASCII, so it survives lossy decoding of the name.
            let lossy = name.to_string_lossy();

            let Some(format) = source_format_of(&lossy) else {
                trace!(name = %lossy, "skipping, not a source suffix");
                continue;
            };

            let source = directory.join(&name);
            if source.is_dir() {
                trace!(name = %lossy, "skipping directory");
                continue;
            }

            let target = target_path(&source);
            converted.push(self.convert_one(&source, &target, format, progress)?);
        }

        info!(count = converted.len(), "conversion finished");
        Ok(converted)
    }

    fn convert_one<W: Write>(
        &self,
        source: &Path,
        target: &Path,
        format: ImageFormat,
        progress: &mut W,
    ) -> Result<Conversion> {
        let data = fs::read(source).map_err(|e| Error::io(source, e))?;
        let image = self
            .codec
            .decode(&data)
            .map_err(|e| Error::convert(source, e))?;

        writeln!(
            progress,
            "Converting {} to {}...",
            file_name(source),
            file_name(target)
        )
        .map_err(Error::Progress)?;

        let webp = self
            .codec
            .encode(&image, ImageFormat::WebP)
            .map_err(|e| Error::convert(source, e))?;

        fs::write(target, &webp).map_err(|e| Error::io(target, e))?;
        debug!(
            source = %source.display(),
            ?format,
            width = image.width(),
            height = image.height(),
            bytes = webp.len(),
            "wrote webp"
        );

        writeln!(progress, "Done.").map_err(Error::Progress)?;

        Ok(Conversion {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            width: image.width(),
            height: image.height(),
            encoded_bytes: webp.len(),
        })
    }
}

/// Convert every PNG/JPEG file in `directory` to WebP with [`LibWebpCodec`],
/// printing progress to standard output.
///
/// ```rust,no_run
/// webpx_convert::convert_to_webp("./images")?;
/// # Ok::<(), webpx_convert::Error>(())
/// ```
pub fn convert_to_webp(directory: impl AsRef<Path>) -> Result<Vec<Conversion>> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    Converter::new(LibWebpCodec).run(directory, &mut lock)
}

/// Sibling path with the extension replaced by `webp`.
///
/// `photo.PNG` becomes `photo.webp`; a bare `.png` becomes `.png.webp`.
#[must_use]
pub fn target_path(source: &Path) -> PathBuf {
    source.with_extension(ImageFormat::WebP.primary_extension())
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Image;
    use imgref::ImgVec;
    use rgb::RGB8;
    use std::cell::RefCell;

    /// Codec that treats file contents as `"{w}x{h}"` and "encodes" to a
    /// marker string, recording what it saw.
    #[derive(Default)]
    struct FakeCodec {
        decoded: RefCell<Vec<Vec<u8>>>,
    }

    impl ImageCodec for FakeCodec {
        fn decode(&self, data: &[u8]) -> Result<Image> {
            self.decoded.borrow_mut().push(data.to_vec());
            let text = std::str::from_utf8(data)
                .map_err(|_| Error::InvalidInput("not utf-8".into()))?;
            let (w, h) = text
                .trim()
                .split_once('x')
                .ok_or_else(|| Error::InvalidInput(format!("bad fake image {text:?}")))?;
            let w: usize = w.parse().map_err(|_| Error::InvalidInput(w.into()))?;
            let h: usize = h.parse().map_err(|_| Error::InvalidInput(h.into()))?;
            Ok(Image::Rgb(ImgVec::new(vec![RGB8::default(); w * h], w, h)))
        }

        fn encode(&self, image: &Image, format: ImageFormat) -> Result<Vec<u8>> {
            assert_eq!(format, ImageFormat::WebP);
            Ok(format!("WEBP {}x{}", image.width(), image.height()).into_bytes())
        }
    }

    fn scratch() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_converts_png_with_uppercase_suffix() {
        let dir = scratch();
        fs::write(dir.path().join("photo.PNG"), "3x2").unwrap();

        let codec = FakeCodec::default();
        let mut out = Vec::new();
        let done = Converter::new(&codec).run(dir.path(), &mut out).unwrap();

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].target, dir.path().join("photo.webp"));
        assert_eq!((done[0].width, done[0].height), (3, 2));
        assert_eq!(
            fs::read_to_string(dir.path().join("photo.webp")).unwrap(),
            "WEBP 3x2"
        );
        assert_eq!(fs::read_to_string(dir.path().join("photo.PNG")).unwrap(), "3x2");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Converting photo.PNG to photo.webp...\nDone.\n"
        );
    }

    #[test]
    fn test_ignores_other_suffixes_silently() {
        let dir = scratch();
        for name in ["notes.txt", "image.jpegx", "old.webp", "png", "x.gif"] {
            fs::write(dir.path().join(name), "1x1").unwrap();
        }

        let codec = FakeCodec::default();
        let mut out = Vec::new();
        let done = Converter::new(&codec).run(dir.path(), &mut out).unwrap();

        assert!(done.is_empty());
        assert!(out.is_empty());
        assert!(codec.decoded.borrow().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 5);
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        let dir = scratch();
        for name in ["IMAGE.JPEG", "image.Jpeg", "image.jpeg"] {
            fs::write(dir.path().join(name), "1x1").unwrap();
        }

        let codec = FakeCodec::default();
        let done = Converter::new(&codec).run(dir.path(), &mut io::sink()).unwrap();

        assert_eq!(done.len(), 3);
        let mut targets: Vec<_> = done
            .iter()
            .map(|c| c.target.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        targets.sort();
        assert_eq!(targets, ["IMAGE.webp", "image.webp", "image.webp"]);
    }

    #[test]
    fn test_subdirectories_are_not_entered() {
        let dir = scratch();
        let nested = dir.path().join("nested.png");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.png"), "1x1").unwrap();

        let codec = FakeCodec::default();
        let done = Converter::new(&codec).run(dir.path(), &mut io::sink()).unwrap();

        assert!(done.is_empty());
        assert!(!dir.path().join("nested.webp").exists());
        assert!(!nested.join("inner.webp").exists());
    }

    #[test]
    fn test_decode_failure_aborts_and_keeps_existing_target() {
        let dir = scratch();
        fs::write(dir.path().join("fake.jpg"), "garbage").unwrap();
        fs::write(dir.path().join("fake.webp"), "previous").unwrap();

        let codec = FakeCodec::default();
        let mut out = Vec::new();
        let err = Converter::new(&codec)
            .run(dir.path(), &mut out)
            .unwrap_err();

        assert!(matches!(err, Error::Convert { ref path, .. } if path.ends_with("fake.jpg")));
        assert_eq!(
            fs::read_to_string(dir.path().join("fake.webp")).unwrap(),
            "previous"
        );
        assert!(out.is_empty(), "nothing is announced for an undecodable source");
    }

    // Linux filesystems accept arbitrary bytes in names; APFS does not.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_matched_by_suffix() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = scratch();
        let name = OsStr::from_bytes(b"caf\xe9.png");
        fs::write(dir.path().join(name), "2x2").unwrap();

        let codec = FakeCodec::default();
        let mut out = Vec::new();
        let done = Converter::new(&codec).run(dir.path(), &mut out).unwrap();

        assert_eq!(done.len(), 1);
        let target = dir.path().join(OsStr::from_bytes(b"caf\xe9.webp"));
        assert_eq!(done[0].target, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "WEBP 2x2");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Converting caf\u{fffd}.png to caf\u{fffd}.webp...\nDone.\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_progress_write_failure_is_progress_error() {
        let dir = scratch();
        fs::write(dir.path().join("a.png"), "1x1").unwrap();

        let err = Converter::new(FakeCodec::default())
            .run(dir.path(), &mut BrokenPipe)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Progress(ref e) if e.kind() == io::ErrorKind::BrokenPipe
        ));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = scratch();
        let missing = dir.path().join("nope");
        let err = Converter::new(FakeCodec::default())
            .run(&missing, &mut io::sink())
            .unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == &missing));
    }

    #[test]
    fn test_target_path() {
        assert_eq!(target_path(Path::new("a/photo.PNG")), Path::new("a/photo.webp"));
        assert_eq!(target_path(Path::new("b.tar.jpeg")), Path::new("b.tar.webp"));
        assert_eq!(target_path(Path::new(".png")), Path::new(".png.webp"));
    }
}
