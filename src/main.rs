use clap::Parser;
use spdlog::info;
use std::{error::Error, path::PathBuf};

mod api;
mod image;
mod prompt;
mod report;
mod reporter;

use crate::api::{GeminiClient, GeminiConfig};
use crate::image::{ImageAttachment, ImageMime};
use crate::report::DownloadFormat;
use crate::reporter::Reporter;

/// Generate a structural defect report from a photo of a structure
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Structure image to analyze (jpeg, jpg or png)
    #[arg(long)]
    image: PathBuf,

    /// Report title
    #[arg(long, default_value = "")]
    title: String,

    /// Report prepared by
    #[arg(long, default_value = "")]
    prepared_by: String,

    /// Report prepared for
    #[arg(long, default_value = "")]
    prepared_for: String,

    // Deliberately not required: a missing key is the service's call to
    // reject, not ours.
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    #[arg(long, default_value = api::client::DEFAULT_MODEL)]
    model: String,

    #[arg(long, default_value = api::client::DEFAULT_BASE_URL)]
    api_url: String,

    /// Directory the report file is written into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mime = ImageMime::from_path(&args.image)
        .ok_or("unsupported image type, expected jpeg, jpg or png")?;
    let bytes = std::fs::read(&args.image)?;

    let client = GeminiClient::new(GeminiConfig {
        base_url: args.api_url,
        api_key: args.api_key,
        model: args.model,
    })?;
    let reporter = Reporter::new(client);

    let request = reporter.build_request(
        &args.title,
        &args.prepared_by,
        &args.prepared_for,
        Some(ImageAttachment::new(bytes, mime)),
    )?;

    info!("Analyzing image and preparing report...");
    let report = reporter.submit(&request).await?;
    info!("Report generated successfully");

    println!("{}", report.text);

    let artifact = report.to_downloadable(&DownloadFormat::default());
    let path = args.output_dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes)?;

    info!("Report saved to {}", path.display());

    Ok(())
}
