use std::io::{self, Write};
use std::sync::Arc;

use tracing::info;

use crate::config::SectorTable;
use crate::fetcher::{failure_line, QuoteFetcher};
use crate::formatter::SummaryFormatter;
use crate::pacing::Pacer;
use crate::TickerRecord;

pub const START_BANNER: &str = "Starting watchlist analysis...";
pub const DONE_BANNER: &str = "All analysis complete!";
pub const TICKER_SEPARATOR: &str = "---";

const RULE_WIDTH: usize = 60;

/// Outcome counts for one pass over the watchlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tickers: usize,
    pub failures: usize,
}

/// Walks a [`SectorTable`] in order: fetch, format, print, pause.
///
/// Tickers are processed one at a time and the pause is skipped after the
/// last ticker of the whole table.
pub struct WatchlistRunner {
    fetcher: QuoteFetcher,
    formatter: SummaryFormatter,
    pacer: Arc<dyn Pacer>,
}

impl WatchlistRunner {
    pub fn new(fetcher: QuoteFetcher, formatter: SummaryFormatter, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            fetcher,
            formatter,
            pacer,
        }
    }

    pub async fn run<W: Write>(&self, table: &SectorTable, out: &mut W) -> io::Result<RunSummary> {
        let total = table.total_tickers();
        let mut summary = RunSummary::default();
        let rule = "=".repeat(RULE_WIDTH);

        info!(
            provider = self.fetcher.provider_name(),
            sectors = table.groups().len(),
            tickers = total,
            "watchlist run started"
        );
        writeln!(out, "{START_BANNER}\n")?;

        for group in table.groups() {
            writeln!(out, "\n{rule}")?;
            writeln!(out, "{}", group.sector)?;
            writeln!(out, "{rule}\n")?;

            for (index, ticker) in group.symbols.iter().enumerate() {
                summary.tickers += 1;

                let record = match self.fetcher.try_fetch(ticker).await {
                    Ok(record) => record,
                    Err(error) => {
                        summary.failures += 1;
                        writeln!(out, "{}", failure_line(ticker, &error))?;
                        TickerRecord::unavailable()
                    }
                };
                writeln!(out, "{}", self.formatter.format(&record, ticker))?;

                if index + 1 < group.symbols.len() {
                    writeln!(out, "\n{TICKER_SEPARATOR}")?;
                }
                out.flush()?;

                if summary.tickers < total {
                    self.pacer.pause().await;
                }
            }

            writeln!(out, "\n")?;
        }

        writeln!(out, "{DONE_BANNER}")?;
        out.flush()?;
        info!(
            tickers = summary.tickers,
            failures = summary.failures,
            "watchlist run finished"
        );

        Ok(summary)
    }
}
