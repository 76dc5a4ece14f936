//! CLI argument definitions for peakwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Fetch and print the watchlist (default) |
//! | `show-config` | Print the effective watchlist as TOML |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | built-in watchlist | TOML watchlist file |
//! | `--request-delay-ms` | from config (500) | Pause between tickers |
//! | `--timeout-ms` | `3000` | Per-request timeout |
//! | `--no-color` | `false` | Disable ANSI colors |
//! | `--verbose` | `false` | Debug logging on stderr |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use peakwatch_core::http_client::DEFAULT_TIMEOUT_MS;

/// Sector-grouped watchlist of price drawdowns from the 52-week high.
#[derive(Debug, Parser)]
#[command(
    name = "peakwatch",
    author,
    version,
    about = "Watchlist drawdowns from the 52-week high",
    long_about = "peakwatch fetches current price, 52-week high and daily change for every \
ticker in a sector-grouped watchlist and prints a color-coded summary per ticker.\n\
\n\
Without --config the built-in watchlist is used. Set RUST_LOG to tune diagnostics."
)]
pub struct Cli {
    /// TOML watchlist file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pause between ticker fetches in milliseconds; overrides the config file.
    #[arg(long, global = true, value_name = "MS")]
    pub request_delay_ms: Option<u64>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Print without ANSI colors. `NO_COLOR` has the same effect.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and print every ticker in the watchlist.
    Run,
    /// Print the effective watchlist as TOML.
    ///
    /// Redirect to a file to start a custom watchlist:
    ///
    ///   peakwatch show-config > watchlist.toml
    ShowConfig,
}
