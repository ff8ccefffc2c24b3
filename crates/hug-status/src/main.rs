use clap::Parser;
use hug_status::{app, logger, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // --version and usage errors exit here, before anything else starts
    let cli = Cli::parse();
    logger::init();

    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
