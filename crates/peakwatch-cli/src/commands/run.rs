use std::sync::Arc;

use peakwatch_core::{
    FixedDelay, QuoteFetcher, ReqwestHttpClient, SummaryFormatter, WatchlistConfig,
    WatchlistRunner, YahooProvider,
};

use crate::cli::Cli;
use crate::error::CliError;

use super::palette;

pub async fn run(cli: &Cli, config: &WatchlistConfig) -> Result<(), CliError> {
    let no_color_env = std::env::var("NO_COLOR").ok();
    let palette = palette(cli.no_color, no_color_env.as_deref());

    let provider = YahooProvider::from_env(Arc::new(ReqwestHttpClient::new()))
        .with_timeout_ms(cli.timeout_ms);
    let runner = WatchlistRunner::new(
        QuoteFetcher::new(Arc::new(provider)),
        SummaryFormatter::new(palette),
        Arc::new(FixedDelay::new(config.request_delay())),
    );

    let mut stdout = std::io::stdout();
    let summary = runner.run(&config.tickers, &mut stdout).await?;
    if summary.failures > 0 {
        tracing::warn!(
            failures = summary.failures,
            tickers = summary.tickers,
            "some tickers could not be fetched"
        );
    }

    Ok(())
}
