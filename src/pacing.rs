//! Settle delays and the per-operation timeout boundary.

use crate::config::TraversalOptions;
use crate::error::{Result, ScrapeError};
use crate::surface::AutomationSurface;
use std::future::Future;

/// Applies [`TraversalOptions`] around page interactions
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    options: TraversalOptions,
}

impl Pacing {
    pub fn new(options: TraversalOptions) -> Self {
        Self { options }
    }

    /// Run `fut` under the configured timeout.
    ///
    /// Expiry surfaces as [`ScrapeError::Timeout`] naming `operation`.
    pub async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.options.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::Timeout {
                operation,
                timeout_ms: self.options.timeout.as_millis(),
            }),
        }
    }

    /// Give the application time to render, then wait for the network to idle.
    pub async fn settle<S>(&self, surface: &S) -> Result<()>
    where
        S: AutomationSurface + ?Sized,
    {
        if !self.options.settle_delay.is_zero() {
            tokio::time::sleep(self.options.settle_delay).await;
        }
        self.bounded("waiting for network idle", surface.wait_for_network_idle())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pacing(timeout_ms: u64) -> Pacing {
        Pacing::new(TraversalOptions {
            settle_delay: Duration::ZERO,
            network_idle: Duration::ZERO,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let value = pacing(1000)
            .bounded("adding", async { Ok::<_, ScrapeError>(2 + 2) })
            .await
            .unwrap();
        assert_eq!(value, 4);
    }

    #[tokio::test]
    async fn test_bounded_reports_timeout() {
        let result = pacing(20)
            .bounded("sleeping", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, ScrapeError>(())
            })
            .await;

        match result {
            Err(ScrapeError::Timeout {
                operation,
                timeout_ms,
            }) => {
                assert_eq!(operation, "sleeping");
                assert_eq!(timeout_ms, 20);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
