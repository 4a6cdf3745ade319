//! wsk-actions entry point

use clap::Parser;
use tracing::debug;
use whisk_cli::{
    cli::Cli,
    commands::ActionCommand,
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing()?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    debug!("wsk-actions v{}", env!("CARGO_PKG_VERSION"));

    let command = ActionCommand::from_cli(&cli)?;
    command.run(cli.command).await
}
