use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, interactive, search, show};
use popcorn_config::PathManager;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "usePopcorn - search movies, rate them, keep track of what you watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Run one search against OMDb and print the matching movies. Queries shorter than the configured minimum length (2 by default) are not sent.")]
    Search {
        /// Title text to search for
        query: String,
    },
    /// Show details for one movie
    #[command(long_about = "Look up a single movie by its IMDb id (e.g. tt0133093) and print its details.")]
    Show {
        /// IMDb id of the movie
        imdb_id: String,
    },
    /// Start an interactive session
    #[command(long_about = "Search, inspect and rate movies and keep a watched list with summary statistics. The watched list lives only for the session. Logs are written to the log directory instead of the terminal.")]
    Interactive {
        /// Query to run when the session starts (overrides search.initial_query)
        #[arg(long)]
        query: Option<String>,
    },
    /// View or change configuration
    #[command(long_about = "Manage the OMDb API key and search settings. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Change settings; prompts for each one when no flag is given
    Set {
        /// OMDb API key (an empty value clears the stored key)
        #[arg(long)]
        api_key: Option<String>,

        /// OMDb base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Minimum query length before a search is sent
        #[arg(long)]
        min_query_len: Option<usize>,

        /// Delay in milliseconds before a search is sent
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Query to run when an interactive session starts
        #[arg(long)]
        initial_query: Option<String>,
    },
    /// Print the config, credentials and log locations
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Interactive sessions log to a file so lines do not interleave with prompts
    let _log_guard = match cli.command {
        Commands::Interactive { .. } => {
            let path_manager = PathManager::default();
            Some(
                logging::init_file_logging(cli.verbose, &path_manager.session_log_file())
                    .map_err(|e| eyre!("{}", e))?,
            )
        }
        _ => {
            logging::init_logging(cli.verbose, cli.quiet).map_err(|e| eyre!("{}", e))?;
            None
        }
    };

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Show { imdb_id } => show::run_show(imdb_id, &output).await,
        Commands::Interactive { query } => interactive::run_interactive(query, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}
