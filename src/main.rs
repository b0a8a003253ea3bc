use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use trackscope::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web front end
    Serve(ServeOptions),

    /// Look up a track from the terminal
    Search(SearchOptions),

    /// Manage the local cache
    Db(DbOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the front end in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Artist name (prefix matches are served from the cache)
    #[clap(long)]
    pub artist: String,

    /// Track name (prefix matches are served from the cache)
    #[clap(long)]
    pub track: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DbOptions {
    #[command(subcommand)]
    pub command: DbSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DbSubcommand {
    /// Drop and recreate all cache tables
    Init,

    /// Show row counts of the cache tables
    Stats,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> config::Config {
    match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trackscope=info")))
        .init();

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    match config::load_env().await {
        Ok(true) => {}
        Ok(false) => warning!("No .env file found, using process environment."),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    match cli.command {
        Command::Serve(opt) => cli::serve(load_config(), opt.open).await,
        Command::Search(opt) => cli::search(&load_config(), &opt.artist, &opt.track).await,
        Command::Db(opt) => match opt.command {
            DbSubcommand::Init => cli::init_db(&load_config()).await,
            DbSubcommand::Stats => cli::db_stats(&load_config()).await,
        },
        Command::Completions(_) => {}
    }
}
