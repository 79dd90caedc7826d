mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use postscout_core::{
    execute, providers::DummyJsonProvider, Action, Config, ListState, PostSource, Store,
};
use postscout_tui::{run_tui, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postscout")]
#[command(version, about = "Search and page through posts from the terminal", long_about = None)]
struct Cli {
    /// Search API host
    #[arg(long, env = "POSTSCOUT_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Rows per page
    #[arg(long, env = "POSTSCOUT_PAGE_SIZE", global = true)]
    page_size: Option<u32>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch one page of results and print it
    Search {
        /// Search text, empty matches everything
        #[arg(default_value = "")]
        query: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    init_logging(cli.command.is_none())?;

    match &cli.command {
        None => run_browser(load_config(&cli)?).await,
        Some(Commands::Search { query, page, json }) => {
            let config = load_config(&cli)?;
            tracing::info!("Searching for {:?} (page {})", query, page);
            run_search(&config, query.clone(), *page, *json).await
        }
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => {
            let config = load_config(&cli)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        // Init replaces the file, so a broken one must not be loaded first
        Some(Commands::Config {
            action: ConfigAction::Init { force },
        }) => {
            let written = init_config(cli.config.as_deref(), *force)?;
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}

fn init_logging(to_file: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postscout=info".into());

    if to_file {
        let path = log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("postscout")
        .join("postscout.log")
}

/// File (or defaults), then env/flag overrides from clap
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(page_size) = cli.page_size {
        config.ui.page_size = page_size;
    }

    config.validate()?;
    Ok(config)
}

async fn run_browser(config: Config) -> anyhow::Result<()> {
    let provider = DummyJsonProvider::from_config(&config.api)?;
    let source: Arc<dyn PostSource> = Arc::new(provider);
    let app = App::new(config.ui.page_size);

    tracing::info!("Browsing posts from {}", config.api.base_url);
    run_tui(app, source, Duration::from_millis(config.ui.tick_rate_ms)).await
}

async fn run_search(config: &Config, query: String, page: u32, json: bool) -> anyhow::Result<()> {
    let provider = DummyJsonProvider::from_config(&config.api)?;
    let state = ListState::new(config.ui.page_size)
        .with_search(query)
        .with_page(page);
    let mut store = Store::from_state(state);

    let command = store.mount();
    if let Action::FetchFinished { seq, result } = execute(&provider, command).await {
        store.complete(seq, result);
    }

    let state = store.state();
    if let Some(err) = state.error() {
        anyhow::bail!("{}", err);
    }

    if json {
        let out = output::SearchOutput::from_state(state);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", output::format_table(state));
    }

    Ok(())
}

/// Write the default config to `path`, or the default location
fn init_config(path: Option<&Path>, force: bool) -> anyhow::Result<PathBuf> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    Config::default().save_to(&target)?;
    Ok(target)
}
