mod cli;
mod command;
mod config;
mod error;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;

    let command_line = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(command_line.log_level())
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = command_line.command else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    let cfg = config::Config::load().wrap_err("Load configuration error")?;
    let cmd: Box<dyn command::Command> = match command {
        cli::Commands::Index {
            folder,
            index,
            dry_run,
        } => Box::new(command::IndexCommand::new(cfg, folder, index, dry_run)),
        cli::Commands::DeleteIndex { index, yes } => {
            Box::new(command::DeleteIndexCommand::new(cfg, index, yes))
        }
    };
    cmd.execute().await?;

    Ok(())
}
