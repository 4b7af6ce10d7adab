pub mod history;
pub mod output;
pub mod prompt;
pub mod today;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use history::{process_history_command, process_toggle_command, HistoryCommand, ToggleCommand};
use output::Painter;
use today::{process_submit_command, process_today_command, SubmitCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    config::ApiConfig,
    gate::HomeController,
    history::view_storage::ViewStateStorage,
    store::rest::RestEntryStore,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "growthlog", version, long_about = None)]
#[command(about = "Daily self-reflection journal", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Base url of the entry service. By default the endpoint chosen at build time"
    )]
    api_url: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Answer today's question")]
    Today,
    #[command(about = "Record today's answer without any questions")]
    Submit {
        #[command(flatten)]
        command: SubmitCommand,
    },
    #[command(about = "Show your progress month by month")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
    #[command(about = "Open or close months in the history")]
    Toggle {
        #[command(flatten)]
        command: ToggleCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)
        .context("Failed to prepare application directory")?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let config = ApiConfig::resolve(args.api_url);
    debug!("Using entry service at {}", config.base_url());
    let store = RestEntryStore::new(&config)?;
    let painter = Painter::new(std::io::stdout().is_terminal());
    let view_storage = ViewStateStorage::new(app_dir);

    match args.commands {
        Commands::Today => {
            process_today_command(HomeController::new(store, DefaultClock), painter).await
        }
        Commands::Submit { command } => {
            process_submit_command(command, HomeController::new(store, DefaultClock), painter)
                .await
        }
        Commands::History { command } => {
            process_history_command(command, store, &view_storage, painter).await
        }
        Commands::Toggle { command } => process_toggle_command(command, &view_storage).await,
    }
}
