use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vigil", version, about = "Control surface for security-assessment scans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP control-surface server
    Serve(ServeArgs),
    /// List persisted runs reconstructed from disk artifacts
    Runs(RunsArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Listen port
    #[arg(short, long, default_value = "8787")]
    pub port: u16,

    /// Directory holding persisted run artifacts
    #[arg(long, default_value = "./vigil_runs")]
    pub runs_dir: String,

    /// Settings file path
    #[arg(long, default_value = "./vigil_config.json")]
    pub config: String,
}

#[derive(Args, Clone)]
pub struct RunsArgs {
    /// Directory holding persisted run artifacts
    #[arg(long, default_value = "./vigil_runs")]
    pub runs_dir: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
