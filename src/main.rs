use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

mod error;
mod sku;
mod utils;

use sku::table::Table;
use utils::images::{DownloadOptions, DownloadSummary, FailurePolicy};

/// Download every product image listed in a SKU table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV table of SKU records
    #[arg(short, long, default_value = "processedSKUs_nodups.csv")]
    input: PathBuf,

    /// Directory where images are saved as `{row}_{image}.{ext}`
    #[arg(short, long, default_value = "images_onlyids")]
    output: PathBuf,

    /// Column holding each record's list of image URLs
    #[arg(short, long, default_value = "images")]
    column: String,

    /// Pause after each download, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Stop at the first failure or log it and keep going
    #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
    on_error: FailurePolicy,
}

impl Args {
    fn download_options(&self) -> DownloadOptions {
        DownloadOptions::new(&self.output)
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_policy(self.on_error)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> error::Result<()> {
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());

    let table = Table::load(&args.input, &args.column)?;
    utils::files::ensure_output_dir(&args.output)?;
    if table.is_empty() {
        println!("No records in {}", table.path().display());
        return Ok(());
    }
    println!("Found {} records", table.len());

    let client = utils::http::build_client();
    let summary = utils::images::download_images(&client, &table, &args.download_options()).await?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &DownloadSummary) {
    println!();
    println!(
        "Downloaded {} images ({} bytes)",
        summary.downloaded, summary.bytes
    );
    if summary.skipped_existing > 0 {
        println!("Skipped {} images (already existed)", summary.skipped_existing);
    }
    if summary.skipped_blank > 0 {
        println!("Skipped {} blank URLs", summary.skipped_blank);
    }
    if summary.failed > 0 {
        eprintln!("Warning: {} downloads failed", summary.failed);
    }
    if summary.malformed_rows > 0 {
        eprintln!("Warning: {} rows had malformed image lists", summary.malformed_rows);
    }
}
