mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error};
use tessera_core::config::HostConfig;
use tessera_core::kernel::constants::DEFAULT_CONFIG_FILE;
use tessera_core::view::ViewLocation;
use tessera_core::{ExtensionHost, Result};

use persistence_meta::PersistenceMeta;

/// Tessera: an extension host shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit without starting the host
    #[arg(long)]
    ping: bool,

    /// Host configuration file (JSON, YAML or TOML); defaults to ./tessera.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Active locale, overriding the configuration file
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Enable an experiment (repeatable)
    #[arg(long = "enable-experiment", global = true)]
    experiments: Vec<String>,

    /// File where setting values are persisted
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the views registered at a location
    Views {
        #[arg(long, default_value = "settings-view")]
        location: ViewLocation,
    },
    /// Open a view, loading its controller
    Open {
        /// Id of the view
        id: String,
        #[arg(long, default_value = "settings-view")]
        location: ViewLocation,
    },
    /// List command-menu entries, optionally filtered
    Commands {
        query: Option<String>,
    },
    /// List settings with their current values
    Settings {
        /// Filter by title or tag
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the value of a setting
    Get {
        name: String,
    },
    /// Change the value of a setting
    Set {
        name: String,
        value: String,
    },
    /// Restore a setting to its default
    Reset {
        name: String,
    },
    /// Build the context menu for an object
    Menu {
        /// One of ui-source-code, resource, network-request
        kind: String,
        url: String,
    },
}

fn host_config(args: &CliArgs) -> Result<HostConfig> {
    let mut config = match &args.config {
        Some(path) => HostConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => HostConfig::load(Path::new(DEFAULT_CONFIG_FILE))?,
        None => HostConfig::default(),
    };
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }
    config.experiments.extend(args.experiments.iter().cloned());
    if let Some(settings) = &args.settings {
        config.settings_path = Some(settings.clone());
    }
    Ok(config)
}

/// Build the host and install the bundled extensions
fn start_host(args: &CliArgs) -> Result<ExtensionHost> {
    let config = host_config(args)?;
    debug!("Starting host with {:?}", config);
    let host = ExtensionHost::from_config(&config)?;
    host.install(&PersistenceMeta::from_process_cache())?;
    Ok(host)
}

async fn run(args: CliArgs) -> Result<()> {
    let host = start_host(&args)?;

    match args.command {
        Some(Commands::Views { location }) => cli::list_views(&host, location),
        Some(Commands::Open { id, location }) => cli::open_view(&host, location, &id).await,
        Some(Commands::Commands { query }) => cli::list_commands(&host, query.as_deref()),
        Some(Commands::Settings { search }) => cli::list_settings(&host, search.as_deref()),
        Some(Commands::Get { name }) => cli::get_setting(&host, &name),
        Some(Commands::Set { name, value }) => cli::set_setting(&host, &name, value),
        Some(Commands::Reset { name }) => cli::reset_setting(&host, &name),
        Some(Commands::Menu { kind, url }) => cli::show_menu(&host, &kind, url).await,
        None => cli::summary(&host),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();

    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("tessera: {}", e);
            ExitCode::FAILURE
        }
    }
}
