use std::time::Duration;

use crate::data_source::ProviderFuture;

/// Default pause between two ticker fetches.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Pause inserted between consecutive ticker fetches.
pub trait Pacer: Send + Sync {
    fn pause<'a>(&'a self) -> ProviderFuture<'a, ()>;
}

/// Sleeps for a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_millis(DEFAULT_REQUEST_DELAY_MS)
    }
}

impl Pacer for FixedDelay {
    fn pause<'a>(&'a self) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        })
    }
}
