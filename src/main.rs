mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use rucheck::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    rucheck::logger::init_logger();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load()?.unwrap_or_default(),
    };
    ConfigLoader::apply_cli_overrides(&mut config, cli.verbose, cli.no_color);

    if !config.report.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Run) => {
            if !cli::run_once(&config).await {
                std::process::exit(1);
            }
        }
        Some(Commands::List) => cli::list(),
        None => cli::interactive(&config).await?,
    }
    Ok(())
}
