//! Command line interface definition

use clap::Parser;
use imgfetch::{Config, Result};
use std::path::PathBuf;

/// imgfetch - compare sequential and concurrent image downloads
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download an image N times sequentially and concurrently and compare the timings")]
#[command(long_about = None)]
pub struct Cli {
    /// Existing directory to save the images into
    #[arg(
        long,
        env = "IMGFETCH_PATH",
        value_name = "DIR",
        required_unless_present = "config"
    )]
    pub path: Option<PathBuf>,

    /// URL of the image to download
    #[arg(
        long,
        env = "IMGFETCH_URL",
        value_name = "URL",
        required_unless_present = "config"
    )]
    pub url: Option<String>,

    /// Number of downloads per strategy [default: 5]
    #[arg(long, env = "IMGFETCH_COUNT", value_name = "N")]
    pub count: Option<usize>,

    /// JSON config file; flags and environment override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge the config file (if any) with flags and environment variables
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(path) = &self.path {
            config.request.target_dir = path.clone();
        }
        if let Some(url) = &self.url {
            config.request.url = url.clone();
        }
        if let Some(count) = self.count {
            config.request.count = count;
        }

        Ok(config)
    }
}
