mod run;
mod show_config;

use peakwatch_core::{Palette, WatchlistConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = effective_config(cli)?;

    match cli.command() {
        Command::Run => run::run(cli, &config).await,
        Command::ShowConfig => show_config::run(&config),
    }
}

/// Config file (or built-in watchlist) with command-line overrides applied.
fn effective_config(cli: &Cli) -> Result<WatchlistConfig, CliError> {
    let mut config = WatchlistConfig::load_or_builtin(cli.config.as_deref())?;
    if let Some(delay_ms) = cli.request_delay_ms {
        config.request_delay_ms = delay_ms;
    }
    Ok(config)
}

/// `--no-color` or a non-empty `NO_COLOR` turns escapes off.
fn palette(no_color_flag: bool, no_color_env: Option<&str>) -> Palette {
    let env_disables = no_color_env.is_some_and(|value| !value.is_empty());
    if no_color_flag || env_disables {
        Palette::plain()
    } else {
        Palette::ansi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn delay_flag_overrides_builtin_default() {
        let cli = Cli::try_parse_from(["peakwatch", "--request-delay-ms", "0"]).expect("parses");

        let config = effective_config(&cli).expect("builtin config");

        assert_eq!(config.request_delay_ms, 0);
        assert_eq!(config.total_tickers(), WatchlistConfig::builtin().total_tickers());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["peakwatch", "--config", "/nonexistent/peakwatch.toml"])
            .expect("parses");

        let error = effective_config(&cli).expect_err("file is missing");

        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn color_switches() {
        assert_eq!(palette(false, None), Palette::ansi());
        assert_eq!(palette(true, None), Palette::plain());
        assert_eq!(palette(false, Some("1")), Palette::plain());
        assert_eq!(palette(false, Some("")), Palette::ansi());
    }
}
