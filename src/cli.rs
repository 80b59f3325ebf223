use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flvmerge")]
#[command(
    author,
    version,
    about = "Concatenate FLV files while keeping timestamps and duration metadata consistent"
)]
pub struct Cli {
    /// Output file for the merged stream
    pub output: PathBuf,

    /// Input files, merged in the order given
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
