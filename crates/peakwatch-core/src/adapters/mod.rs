//! Provider adapters implementing [`crate::QuoteProvider`].

pub mod yahoo;

pub use yahoo::YahooProvider;
