use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropcast", version, about = "Farm weather advisory API")]
pub struct Cli {
    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen port from the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
