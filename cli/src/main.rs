mod commands;
mod output;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, collect, regions, services};
use terminal::{logging, print, spinner};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    let level = match &commands.command {
        Commands::Collect(args) => args.log_level.as_str(),
        _ => "warn",
    };
    if let Err(e) = logging::init_logging(level) {
        eprintln!("invalid log filter: {e:#}");
        return ExitCode::FAILURE;
    }

    let result = match commands.command {
        Commands::Collect(args) => {
            print::header("collecting inventory");
            collect::collect(args).await
        }
        Commands::Regions => {
            print::header("known regions");
            regions::regions();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Services => {
            print::header("known services");
            services::services();
            Ok(ExitCode::SUCCESS)
        }
    };

    spinner::progress().finish_and_clear();

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
