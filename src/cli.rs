use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "compatgen",
    version,
    about = "Compatibility data statistics generator"
)]
pub struct Cli {
    /// Data root containing the category directories
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output path for the statistics artifact (resolved against the root
    /// when relative)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Per-category progress output
    #[arg(long, short)]
    pub verbose: bool,
}
