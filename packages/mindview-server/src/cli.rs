use clap::Parser;

/// MINDVIEW monitor server
#[derive(Debug, Parser)]
#[command(name = "mindview-server", version, about)]
pub struct Cli {
    /// Override the configured listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Load the synthetic demo record for every kind at startup
    #[arg(long)]
    pub preload_demo: bool,
}
