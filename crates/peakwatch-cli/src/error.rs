use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Per-ticker fetch failures are not errors here; they are printed inline
/// and the run still exits 0.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] peakwatch_core::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_usage_code() {
        let error = CliError::from(peakwatch_core::ConfigError::Validation(
            peakwatch_core::ValidationError::EmptyWatchlist,
        ));

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "invalid watchlist: watchlist must contain at least one sector"
        );
    }
}
