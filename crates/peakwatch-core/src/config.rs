//! Watchlist configuration: sector-grouped tickers and the pause between
//! fetches.
//!
//! ```toml
//! request_delay_ms = 500
//!
//! [[tickers]]
//! sector = "Technology"
//! symbols = ["AAPL", "MSFT"]
//! ```
//!
//! Sectors are an array of tables so the file order is the run order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::pacing::DEFAULT_REQUEST_DELAY_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse watchlist TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize watchlist: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid watchlist: {0}")]
    Validation(#[from] ValidationError),
}

/// One display group and its tickers, in run order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorGroup {
    pub sector: String,
    pub symbols: Vec<String>,
}

impl SectorGroup {
    pub fn new<I, S>(sector: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sector: sector.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered sector label to ticker list mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorTable(Vec<SectorGroup>);

impl SectorTable {
    pub fn new(groups: Vec<SectorGroup>) -> Self {
        Self(groups)
    }

    /// Sectors shipped with the binary.
    pub fn builtin() -> Self {
        Self(vec![
            SectorGroup::new(
                "Technology",
                ["AAPL", "MSFT", "GOOGL", "META", "NVDA", "ORCL", "AVGO", "AMD", "PLTR"],
            ),
            SectorGroup::new("Consumer & E-commerce", ["AMZN", "TSLA", "WMT", "WM"]),
            SectorGroup::new("Financial", ["V", "BRK-B"]),
            SectorGroup::new("Industrial & Infrastructure", ["PAVE", "GEV"]),
            SectorGroup::new("Aerospace & Defense", ["RKLB"]),
            SectorGroup::new("Cryptocurrency", ["BITQ", "HOOD"]),
            SectorGroup::new(
                "ETF",
                ["QQQM", "IGV", "XSW", "XLF", "SCHD", "DGRW", "XLV", "MGK", "SPYV"],
            ),
        ])
    }

    pub fn groups(&self) -> &[SectorGroup] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_tickers(&self) -> usize {
        self.0.iter().map(|group| group.symbols.len()).sum()
    }

    /// Every ticker in run order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .flat_map(|group| group.symbols.iter().map(String::as_str))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyWatchlist);
        }

        for group in &self.0 {
            if group.sector.trim().is_empty() {
                return Err(ValidationError::BlankSectorLabel);
            }
            if group.symbols.is_empty() {
                return Err(ValidationError::EmptySector {
                    sector: group.sector.clone(),
                });
            }
            if let Some(index) = group.symbols.iter().position(|s| s.trim().is_empty()) {
                return Err(ValidationError::BlankSymbol {
                    sector: group.sector.clone(),
                    index,
                });
            }
        }

        Ok(())
    }
}

impl From<Vec<SectorGroup>> for SectorTable {
    fn from(groups: Vec<SectorGroup>) -> Self {
        Self(groups)
    }
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

/// Effective run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistConfig {
    #[serde(default = "default_request_delay_ms", alias = "requestDelayMs")]
    pub request_delay_ms: u64,
    #[serde(default = "SectorTable::builtin")]
    pub tickers: SectorTable,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WatchlistConfig {
    pub fn builtin() -> Self {
        Self {
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            tickers: SectorTable::builtin(),
        }
    }

    /// Parses and validates a TOML document. Omitted keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise the built-in watchlist.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tickers.validate()
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn total_tickers(&self) -> usize {
        self.tickers.total_tickers()
    }
}
