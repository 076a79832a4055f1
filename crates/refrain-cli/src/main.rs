use anyhow::Result;
use clap::Parser;
use refrain_core::AlbumFilter;
use refrain_search::Config;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "refrain", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the lyrics search backend (overrides config and environment)
    #[arg(long, global = true)]
    backend_url: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Search interactively (the default when no command is given)
    ///
    /// Type to search; results refresh once you stop typing for a moment.
    /// Tab and Shift-Tab cycle the album filter, Up and Down scroll the
    /// results, Ctrl-U clears the query, and Esc or Ctrl-C quits.
    Tui,
    /// Search once and print the matching lines
    ///
    /// Each match is printed with its song title and album, the lines around
    /// it, and the searched text highlighted. Matching is done by the
    /// backend; the album filter is applied locally.
    Search {
        /// Text to look for in the lyrics
        query: String,

        /// Only show matches from this album ("all" for every album)
        #[arg(long, default_value = AlbumFilter::ALL)]
        album: AlbumFilter,

        /// Print the matches as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the album filter values
    Albums,
    /// Check that the search backend is reachable
    Ping,
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
    /// Print one setting, or the whole file when no key is given
    Get { key: Option<String> },
    /// Change a setting in the config file
    Set { key: String, value: String },
}

fn load_config(backend_url: Option<String>) -> Result<Config> {
    match backend_url {
        Some(url) => Config::load_with_backend_url(url),
        None => Config::load(),
    }
}

fn init_logging(config: &Config) -> Result<()> {
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.backend_url)?;

    match cli.command.unwrap_or(Commands::Tui) {
        // No logger while the terminal UI owns the screen.
        Commands::Tui => tui::run_tui(config).await?,
        Commands::Search { query, album, json } => {
            init_logging(&config)?;
            commands::run_search(&config, &query, &album, json).await?;
        }
        Commands::Albums => commands::list_albums(&config)?,
        Commands::Ping => {
            init_logging(&config)?;
            commands::ping(&config).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
            ConfigCommand::Get { key } => commands::config::get_config(&config, key)?,
            ConfigCommand::Set { key, value } => commands::config::set_config(key, value)?,
        },
    }

    Ok(())
}
