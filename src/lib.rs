pub mod api;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod hw;
pub mod models;
pub mod panel;
pub mod presets;
pub mod ui;

use std::path::PathBuf;

use config::Settings;
use error::AppError;
use hw::console::{ConsoleDisplay, ConsoleKeypad};
use hw::NoTempSensor;

pub fn run(cli_args: cli::Cli) -> i32 {
    match boot(cli_args) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{}", err);
            err.exit_code()
        }
    }
}

fn boot(cli_args: cli::Cli) -> Result<(), AppError> {
    let config_path = match cli_args.config {
        Some(path) => path,
        None => default_path("system.cfg")?,
    };
    let presets_path = match cli_args.presets {
        Some(path) => path,
        None => default_path("presets.json")?,
    };

    let settings = Settings::load(&config_path)?;
    let mut display = ConsoleDisplay::new();
    let mut keypad = ConsoleKeypad::new();
    panel::run(
        &settings,
        &presets_path,
        &mut display,
        &mut keypad,
        Box::new(NoTempSensor),
    )
}

fn default_path(file: &str) -> Result<PathBuf, AppError> {
    dirs::config_dir()
        .map(|dir| dir.join("dzpanel").join(file))
        .ok_or_else(|| AppError::Config("no config directory on this system".to_string()))
}
