//! Network idle detection
//!
//! Chrome has no "network idle" event, so in-flight requests are tracked from
//! the Network domain: a request is in flight from `requestWillBeSent` until
//! `loadingFinished` or `loadingFailed`.

use crate::error::Result;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
struct Activity {
    in_flight: HashSet<String>,
    last_change: Instant,
}

impl Activity {
    fn started(&mut self, request_id: String) {
        self.in_flight.insert(request_id);
        self.last_change = Instant::now();
    }

    fn ended(&mut self, request_id: &str) {
        if self.in_flight.remove(request_id) {
            self.last_change = Instant::now();
        }
    }

    fn idle_for(&self, window: Duration) -> bool {
        self.in_flight.is_empty() && self.last_change.elapsed() >= window
    }
}

/// Background tracker of a page's in-flight requests
pub struct NetworkIdleMonitor {
    activity: Arc<Mutex<Activity>>,
    task: JoinHandle<()>,
}

impl NetworkIdleMonitor {
    /// Enable the Network domain on `page` and start tracking.
    pub async fn attach(page: &Page) -> Result<Self> {
        let mut sent = page.event_listener::<EventRequestWillBeSent>().await?;
        let mut finished = page.event_listener::<EventLoadingFinished>().await?;
        let mut failed = page.event_listener::<EventLoadingFailed>().await?;
        page.execute(EnableParams::default()).await?;

        let activity = Arc::new(Mutex::new(Activity {
            in_flight: HashSet::new(),
            last_change: Instant::now(),
        }));

        let tracked = Arc::clone(&activity);
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(event) = sent.next() => {
                        if let Ok(mut activity) = tracked.lock() {
                            activity.started(event.request_id.inner().clone());
                        }
                    }
                    Some(event) = finished.next() => {
                        if let Ok(mut activity) = tracked.lock() {
                            activity.ended(event.request_id.inner());
                        }
                    }
                    Some(event) = failed.next() => {
                        if let Ok(mut activity) = tracked.lock() {
                            activity.ended(event.request_id.inner());
                        }
                    }
                    else => break,
                }
            }
            log::debug!("Network event streams closed");
        });

        Ok(Self { activity, task })
    }

    /// Resolve once no request has been in flight for `window`.
    ///
    /// Unbounded on its own; callers wrap it in the page timeout.
    pub async fn wait_for_idle(&self, window: Duration) {
        loop {
            let idle = self
                .activity
                .lock()
                .map(|activity| activity.idle_for(window))
                .unwrap_or(true);
            if idle {
                return;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Drop for NetworkIdleMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> Activity {
        Activity {
            in_flight: HashSet::new(),
            last_change: Instant::now() - Duration::from_secs(10),
        }
    }

    #[test]
    fn test_idle_requires_no_requests_in_flight() {
        let mut activity = activity();
        assert!(activity.idle_for(Duration::from_millis(500)));

        activity.started("1".to_string());
        assert!(!activity.idle_for(Duration::ZERO));

        activity.ended("1");
        assert!(activity.idle_for(Duration::ZERO));
        assert!(!activity.idle_for(Duration::from_secs(60)));
    }

    #[test]
    fn test_redirects_share_one_slot() {
        let mut activity = activity();
        activity.started("7".to_string());
        activity.started("7".to_string());
        activity.ended("7");
        assert!(activity.in_flight.is_empty());
    }

    #[test]
    fn test_unknown_request_end_does_not_reset_window() {
        let mut activity = activity();
        activity.ended("never-started");
        assert!(activity.idle_for(Duration::from_secs(5)));
    }
}
