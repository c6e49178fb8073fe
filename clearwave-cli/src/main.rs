//! Clearwave CLI - runs the denoise server, or cleans a file in place.

use anyhow::{bail, Context};
use clap::Parser;
use clearwave_server::{DenoiseServer, ServerConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "clearwave")]
#[command(version)]
#[command(about = "Spectral-subtraction noise cancellation for voice recordings")]
#[command(long_about = "Clearwave removes stationary background noise from mono voice \n\
    recordings using classical spectral subtraction.\n\n\
    EXAMPLES:\n    \
    clearwave                          # serve HTTP on port 8080\n    \
    clearwave --port 9000\n    \
    clearwave -i noisy.wav -o clean.wav # offline, no server")]
struct Args {
    /// Server port
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Bind host
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Input WAV file (offline mode; requires --output)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output WAV file (offline mode)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match (&args.input, &args.output) {
        (Some(input), Some(output)) => denoise_file(input, output),
        (Some(_), None) | (None, Some(_)) => {
            bail!("offline mode needs both --input and --output")
        }
        (None, None) => {
            let server = DenoiseServer::new(ServerConfig {
                bind_address: format!("{}:{}", args.bind, args.port),
                enable_cors: !args.no_cors,
                ..Default::default()
            });
            server.run().await?;
            Ok(())
        }
    }
}

/// Offline mode: decode, denoise, re-encode, all on disk.
fn denoise_file(input: &Path, output: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let audio = clearwave_wav::decode(&data)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    info!(
        samples = audio.samples.len(),
        sample_rate = audio.sample_rate,
        "read {:.2} s of audio from {}",
        audio.duration_secs(),
        input.display()
    );

    let cleaned = clearwave_dsp::denoise(&audio.samples, audio.sample_rate);
    let encoded = clearwave_wav::encode(&cleaned, audio.sample_rate);

    std::fs::write(output, &encoded)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {} bytes to {}", encoded.len(), output.display());

    Ok(())
}
