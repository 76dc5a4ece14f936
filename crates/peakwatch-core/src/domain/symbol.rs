use std::fmt::{Display, Formatter};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 32;

/// Ticker as Yahoo spells it: `AAPL`, `BRK-B`, `^GSPC`, `005930.KS`, `EURUSD=X`.
///
/// Only emptiness, length, whitespace and control characters are rejected;
/// anything else goes upstream percent-encoded and Yahoo decides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = trimmed.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some((index, ch)) = trimmed
            .chars()
            .enumerate()
            .find(|(_, ch)| ch.is_whitespace() || ch.is_control())
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
