//! # CLI Module
//!
//! Command-line entry points of trackscope. Each command loads what it needs
//! from the [`Config`], talks to the cache and Spotify through the library
//! modules and reports back with the crate's colored output macros.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the web front end
//! - [`search`] - One-shot lookup from the terminal, printed as tables
//! - [`init_db`] - Drops and recreates the cache tables
//! - [`db_stats`] - Shows how many rows each cache table holds
//!
//! ## Usage Patterns
//!
//! ```bash
//! trackscope db init                                  # Create an empty cache
//! trackscope serve --open                             # Start the web front end
//! trackscope search --artist Nirvana --track "Come As"  # Terminal lookup
//! trackscope db stats                                 # Inspect the cache
//! ```
//!
//! Fatal problems (unreadable config, unreachable database) terminate the
//! process through [`error!`](crate::error); everything else is reported
//! and the command carries on.

mod db;
mod search;
mod serve;

pub use db::db_stats;
pub use db::init_db;
pub use search::search;
pub use serve::serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Config, error, management::CacheStore};

async fn open_store(config: &Config) -> CacheStore {
    match CacheStore::open(&config.database_url).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open cache at {}. Err: {}", config.database_url, e),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
