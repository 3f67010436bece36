use clap::{ArgAction, Parser, Subcommand};
use commands::{add, browse, clear, config, library};
use std::path::PathBuf;
use watchlog_models::ContentType;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "Watchlog - Keep track of the movies and shows you've watched")]
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

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog for movies, shows and people
    Search {
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show what is popular right now
    Popular {
        /// Only movies or only shows (both if omitted)
        #[arg(value_name = "TYPE")]
        content_type: Option<ContentType>,
    },
    /// Add a title you've watched (or want to watch)
    #[command(long_about = "Search the catalog for a title and add the chosen match to your watched list. When nothing matches, or with --manual, the title is added by hand with placeholder metadata.")]
    Add {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Your rating, 1 to 5 stars
        #[arg(short, long)]
        rating: Option<u8>,

        /// Add to the watchlist instead of the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Skip the catalog and enter the title by hand
        #[arg(long, action = ArgAction::SetTrue)]
        manual: bool,

        /// Restrict matches to movies or shows (also the type of a manual entry)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        content_type: Option<ContentType>,

        /// Choose the Nth match (1-based) without prompting
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },
    /// Show details for a title, from your library if tracked
    Show {
        #[arg(value_name = "TYPE")]
        content_type: ContentType,
        id: String,
    },
    /// Mark a catalog title as watched
    Watch {
        #[arg(value_name = "TYPE")]
        content_type: ContentType,
        id: String,

        /// Your rating, 1 to 5 stars
        #[arg(short, long)]
        rating: Option<u8>,
    },
    /// Put a catalog title on the watchlist
    Plan {
        #[arg(value_name = "TYPE")]
        content_type: ContentType,
        id: String,
    },
    /// Remove a title from the watched list (or the watchlist)
    Remove {
        id: String,

        /// Remove from the watchlist instead
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,
    },
    /// Rate a tracked title
    Rate {
        id: String,

        /// 1 to 5 stars
        rating: u8,
    },
    /// List your library
    List {
        /// Show the watchlist instead of the watched list
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "all")]
        watchlist: bool,

        /// Show everything tracked
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Only movies or only shows
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        content_type: Option<ContentType>,

        /// Only titles with this genre
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// List the genres used in your library
    Genres {
        /// Genres of the watchlist instead of the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,
    },
    /// Configure the catalog API key and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear the library or stored credentials
    #[command(long_about = "Clear stored data. Use --library to delete the tracked collection, --credentials to remove the stored API key, or --all for both.")]
    Clear {
        /// Clear the library and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Delete the tracked collection
        #[arg(long, action = ArgAction::SetTrue)]
        library: bool,

        /// Remove stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the TMDB API key
    #[command(long_about = "Store the TMDB v3 API key used for catalog requests. Get one from your TMDB account settings. The WATCHLOG_TMDB_API_KEY environment variable takes precedence over the stored key.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },

    /// Set a single value, e.g. `catalog.timeout_secs 15`
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Search { query } => browse::run_search(&query.join(" "), &output).await,
        Commands::Popular { content_type } => browse::run_popular(content_type, &output).await,
        Commands::Add {
            title,
            rating,
            watchlist,
            manual,
            content_type,
            pick,
        } => {
            let request = add::AddRequest {
                title: title.join(" "),
                rating,
                watchlist,
                manual,
                content_type,
                pick,
            };
            add::run_add(request, &output).await
        }
        Commands::Show { content_type, id } => browse::run_show(content_type, &id, &output).await,
        Commands::Watch {
            content_type,
            id,
            rating,
        } => library::run_track(content_type, &id, rating, false, &output).await,
        Commands::Plan { content_type, id } => library::run_track(content_type, &id, None, true, &output).await,
        Commands::Remove { id, watchlist } => library::run_remove(&id, watchlist, &output),
        Commands::Rate { id, rating } => library::run_rate(&id, rating, &output),
        Commands::List {
            watchlist,
            all,
            content_type,
            genre,
        } => library::run_list(watchlist, all, content_type, genre, &output),
        Commands::Genres { watchlist } => library::run_genres(watchlist, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
        Commands::Clear {
            all,
            library,
            credentials,
        } => clear::run_clear(all, library, credentials, &output),
    };

    // Machine-readable callers get the failure on stdout as well
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(e.to_string());
            std::process::exit(1);
        }
    }
    result
}
