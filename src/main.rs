mod api;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod format;
mod logging;
mod runtime;
mod ui;
mod updates;
mod workers;

use crate::api::TradingApi;
use crate::api::client::ApiClient;
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::events::TimeRange;
use crate::runtime::start_runtime;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::sync::Arc;
use std::{error::Error, io};
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Trading server base URL
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,

        /// Initial chart time range (1h, 6h, 24h, 7d, all)
        #[arg(long, value_name = "RANGE", default_value = "1h")]
        time_range: TimeRange,

        /// Disable background colors
        #[arg(long)]
        no_background_color: bool,
    },
    /// Check whether a newer version of the backend is available.
    CheckUpdate,
    /// Clear the saved client configuration.
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            server_url,
            time_range,
            no_background_color,
        } => {
            let config = Config::load_or_default(&config_path);
            let environment = resolve_environment(server_url, &config);
            start(environment, time_range, !no_background_color, config).await
        }
        Command::CheckUpdate => {
            let config = Config::load_or_default(&config_path);
            let environment = resolve_environment(None, &config);
            let client = ApiClient::new(environment);
            let info = updates::verified(client.check_update().await?);
            if info.update_available {
                println!(
                    "Update available: {} -> {}",
                    info.current_version, info.latest_version
                );
                if let Some(url) = info.release_url {
                    println!("Download: {}", url);
                }
            } else {
                println!("Dashboard is up to date ({})", info.current_version);
            }
            Ok(())
        }
        Command::Reset => {
            println!("Clearing client configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Resolution order: CLI flag, then `AITRADE_SERVER`, then the config file,
/// then the local default.
fn resolve_environment(flag: Option<String>, config: &Config) -> Environment {
    if let Some(url) = flag {
        return Environment::from_url(&url);
    }
    if let Ok(url) = std::env::var("AITRADE_SERVER") {
        if let Ok(environment) = url.parse::<Environment>() {
            return environment;
        }
    }
    match &config.server_url {
        Some(url) => Environment::from_url(url),
        None => Environment::default(),
    }
}

/// Starts the dashboard UI and its background workers.
async fn start(
    environment: Environment,
    time_range: TimeRange,
    with_background_color: bool,
    config: Config,
) -> Result<(), Box<dyn Error>> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let api: Arc<dyn TradingApi> = Arc::new(ApiClient::new(environment.clone()));
    let (shutdown_sender, _) = broadcast::channel(1);
    let mut handles = start_runtime(api, shutdown_sender.subscribe()).await;

    let ui_config = ui::UIConfig {
        with_background_color,
        time_range,
        config,
    };
    let app = ui::App::new(
        environment,
        handles.event_receiver,
        handles.action_sender,
        handles.view_sender,
        shutdown_sender,
        ui_config,
    );
    let res = ui::run(&mut terminal, app).await;

    for handle in handles.join_handles.drain(..) {
        handle.abort();
    }

    // Clean up the terminal after running the application.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
