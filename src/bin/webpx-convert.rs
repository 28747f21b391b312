use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Convert every PNG/JPEG image in a directory to WebP.
///
/// Writes `<name>.webp` next to each source, overwriting any existing file
/// of that name. Subdirectories are not visited.
#[derive(Parser, Debug)]
#[command(name = "webpx-convert", version)]
struct Cli {
    /// Directory to convert. Defaults to the directory containing this executable.
    dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let dir = match cli.dir {
        Some(dir) => dir,
        None => default_dir()?,
    };

    let (major, minor, patch) = webpx_convert::version();
    tracing::debug!("libwebp {major}.{minor}.{patch}");

    webpx_convert::convert_to_webp(&dir)
        .with_context(|| format!("convert images in '{}'", dir.display()))?;
    Ok(())
}

fn default_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("locate current executable")?;
    match exe.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => std::env::current_dir().context("read current directory"),
    }
}
