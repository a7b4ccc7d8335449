//! Command-line front end: decode an image file and write the bit-image
//! command stream to a file or stdout.

mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Convert an image into an ESC/POS 24-dot bit-image byte stream
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the source image (PNG, JPEG, ...)
    pub input: PathBuf,

    /// Write the stream here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON device profile
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Printed width in dots
    #[arg(long)]
    pub target_width: Option<u32>,

    /// Luminance threshold (0-255)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Padding around detected content, in source pixels
    #[arg(long)]
    pub margin: Option<u32>,

    /// Print the whole image when no content is detected
    #[arg(long)]
    pub full_image_fallback: bool,

    /// Emit a hex dump instead of raw bytes
    #[arg(long)]
    pub hex: bool,
}

/// Load the first .env found among `candidates`.
///
/// Runs before tracing is set up so `RUST_LOG` may come from the file.
fn load_dotenv(candidates: &[&Path]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|path| dotenvy::from_filename(path).is_ok())
        .map(|path| path.to_path_buf())
}

fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for line in bytes.chunks(16) {
        let row: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv(&[Path::new(".env"), Path::new("../.env")]);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match &dotenv {
        Some(path) => tracing::info!("Loaded .env from: {}", path.display()),
        None => tracing::debug!("No .env file found, using system environment variables"),
    }
    let args = Args::parse();
    let profile = config::resolve(&args)?;
    tracing::debug!(?profile, "Resolved device profile");

    let img = image::open(&args.input)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;
    let stream = escpos_raster::encode_dynamic_image(&img, &profile)
        .with_context(|| format!("Failed to encode {}", args.input.display()))?;

    let payload = if args.hex {
        hex_dump(&stream).into_bytes()
    } else {
        stream
    };

    match &args.output {
        Some(path) => std::fs::write(path, &payload)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&payload)?;
            stdout.flush()?;
        }
    }

    tracing::info!(
        input = %args.input.display(),
        bytes = payload.len(),
        "Bit-image stream written"
    );
    Ok(())
}
