use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod detector;
mod report;
mod scan;

use detector::{DetectorConfig, DEFAULT_OFFSET, DEFAULT_SCALE};

#[derive(Debug, Parser)]
#[clap(
    name = "border-scan",
    about = "Flag images that carry a one-pixel contrasting border"
)]
struct Args {
    /// Directory containing the images to scan (not descended recursively).
    #[clap(value_name = "DIR")]
    directory: PathBuf,

    /// Amplification factor applied to raw pixel differences.
    #[clap(long, value_name = "FACTOR", default_value_t = DEFAULT_SCALE)]
    scale: f32,

    /// Offset subtracted after amplification; differences below it count as
    /// background noise.
    #[clap(long, value_name = "OFFSET", default_value_t = DEFAULT_OFFSET)]
    offset: f32,

    /// Report per-file decode failures and keep scanning instead of aborting.
    #[clap(long)]
    keep_going: bool,

    /// Write a JSON report of the scan to this path.
    #[clap(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    scan::run(&scan::ScanOptions {
        directory: args.directory,
        config: DetectorConfig {
            scale: args.scale,
            offset: args.offset,
        },
        keep_going: args.keep_going,
        json: args.json,
    })
}
