use std::process::ExitCode;

use clap::Parser;
use space_invaders::app;
use space_invaders::cli::Cli;
use space_invaders::config::AppConfig;
use space_invaders::logging::init_logging;

fn main() -> ExitCode {
    let config = AppConfig::from(Cli::parse());
    init_logging(config.logging.clone());

    log::info!("{} - Escape to quit", config.title);

    match app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.site.exit_code())
        }
    }
}
