use anyhow::Result;
use clap::Parser;
use cnapp_dash::{cli::Cli, cli::Commands, logging, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = !matches!(cli.command, Some(Commands::Show(_)));
    logging::init(cli.log_file.as_deref(), interactive)?;
    run(cli)
}
