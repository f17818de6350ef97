//! PortPeek CLI - Show active network ports
//!
//! A command-line front end for portpeek-core: lists the ports in use on
//! this host and the processes that own them, once or on a timer.

mod commands;
mod settings;
mod view;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use portpeek_core::{PortStatus, RecordFilter};

use crate::settings::SettingsStore;

#[derive(Parser)]
#[command(name = "portpeek")]
#[command(author, version, about = "Show active network ports and the processes that own them")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to lsof (overrides the settings file)
    #[arg(long, global = true, value_name = "PATH")]
    lsof: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List active ports once
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Rescan periodically and redraw the list
    Watch {
        /// Seconds between scans (defaults to the settings file)
        #[arg(short, long)]
        interval: Option<u64>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// About PortPeek and the status legend
    About,
}

impl Commands {
    /// Whether this command reads or writes the settings file.
    fn uses_settings(&self) -> bool {
        !matches!(self, Commands::About)
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings
    Show,
    /// Set the watch refresh interval in seconds
    SetInterval { secs: u64 },
    /// Set the lsof timeout in seconds
    SetTimeout { secs: u64 },
    /// Restore default settings
    Reset,
}

#[derive(clap::Args, Default)]
struct FilterArgs {
    /// Only show ports in this state
    #[arg(short, long, value_enum)]
    status: Option<StatusArg>,

    /// Filter by port number
    #[arg(short, long)]
    port: Option<u16>,

    /// Filter by command name or PID
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Listening,
    Established,
}

impl From<StatusArg> for PortStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Listening => PortStatus::Listening,
            StatusArg::Established => PortStatus::Established,
        }
    }
}

impl FilterArgs {
    fn into_filter(self) -> RecordFilter {
        RecordFilter::new()
            .with_search(self.name.unwrap_or_default())
            .with_status(self.status.map(PortStatus::from))
            .with_port(self.port)
    }
}

/// Initialize logging to stderr.
///
/// # Verbosity Levels
/// - 0 (default): Only warnings and errors, or `RUST_LOG` if set
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Default: list ports once
    let command = cli.command.unwrap_or(Commands::List {
        filter: FilterArgs::default(),
    });

    if !command.uses_settings() {
        commands::about::show();
        return Ok(ExitCode::SUCCESS);
    }

    let store = SettingsStore::new()?;

    match command {
        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => commands::config::show(&store, cli.json).await?,
                ConfigAction::SetInterval { secs } => {
                    commands::config::set_interval(&store, secs).await?
                }
                ConfigAction::SetTimeout { secs } => {
                    commands::config::set_timeout(&store, secs).await?
                }
                ConfigAction::Reset => commands::config::reset(&store).await?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::About => {
            commands::about::show();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch { interval, filter } => {
            let settings = store.load().await?;
            let mut config = settings.scan_config();
            if let Some(lsof) = cli.lsof {
                config = config.with_program(lsof);
            }

            let interval = interval.unwrap_or(settings.refresh_interval);
            commands::watch::run(config, filter.into_filter(), interval, cli.json).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { filter } => list(&store, cli.lsof, filter, cli.json).await,
    }
}

async fn list(
    store: &SettingsStore,
    lsof: Option<String>,
    filter: FilterArgs,
    json: bool,
) -> Result<ExitCode> {
    let mut config = store.load().await?.scan_config();
    if let Some(lsof) = lsof {
        config = config.with_program(lsof);
    }

    commands::list::run(config, filter.into_filter(), json).await
}
