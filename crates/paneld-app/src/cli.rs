use clap::Parser;
use std::path::PathBuf;

/// paneld: keeps a desktop shell's lock screen, launcher and bars running.
#[derive(Parser, Debug)]
#[command(name = "paneld", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error). Takes precedence
    /// over `[logging] level` in the config file.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Do not watch the config file for changes.
    #[arg(long)]
    pub no_reload: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
