use std::path::PathBuf;

use clap::Parser;

/// Wall-panel controller for a deCONZ-style lighting bridge.
#[derive(Parser, Debug)]
#[command(name = "dzpanel", version, about)]
pub struct Cli {
    /// Settings file (key=value lines). Defaults to the user config dir.
    #[arg(long, env = "DZPANEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preset file. Defaults to the user config dir.
    #[arg(long, env = "DZPANEL_PRESETS")]
    pub presets: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}
