pub mod collect;
pub mod regions;
pub mod services;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "awsinventory")]
#[command(version)]
#[command(about = "Collects an inventory of AWS assets into a CSV report.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect assets across regions and services
    #[command(alias = "c")]
    Collect(CollectArgs),
    /// List the regions that can be collected
    #[command(alias = "r")]
    Regions,
    /// List the services that can be collected
    #[command(alias = "s")]
    Services,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Regions to collect, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Services to collect, comma separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub services: Vec<String>,

    /// Where to write the CSV report
    #[arg(short = 'o', long, default_value = "inventory.csv")]
    pub output_file: PathBuf,

    /// Sort rows by unique asset identifier before writing
    #[arg(long)]
    pub sort: bool,

    /// Give up on a single collector after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum concurrent describe calls per collector
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Log filter, e.g. `info` or `awsinv_core=debug`
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
