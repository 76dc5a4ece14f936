use std::io::Write;

use peakwatch_core::WatchlistConfig;

use crate::error::CliError;

pub fn run(config: &WatchlistConfig) -> Result<(), CliError> {
    let text = config.to_toml_string()?;
    let mut stdout = std::io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
