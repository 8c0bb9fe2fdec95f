//! The poll loop: fetch the station page, extract a reading, publish it,
//! then sleep for whatever is left of the configured interval.
//!
//! One station per monitor, strictly sequential cycles, no state carried
//! across iterations and no retries: a failed fetch skips publishing for
//! that cycle, and the next cycle starts on schedule.

use crate::error::CgespError;
use crate::extract::extract_reading;
use crate::fetch::page::PageFetcher;
use crate::publish::hub::{HubClient, PublishSummary};
use bon::bon;
use std::time::{Duration, Instant};
use tokio::sync::watch;

const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Time left until the next cycle is due: the configured interval minus the
/// elapsed cycle time, floored at zero. An overrunning cycle starts the next
/// one immediately; there is no backlog and no skipping.
pub fn remaining_wait(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Polls one CGESP station and republishes its readings to the hub.
pub struct StationMonitor {
    station_code: String,
    fetcher: PageFetcher,
    hub: HubClient,
    interval: Duration,
}

#[bon]
impl StationMonitor {
    /// Builds a monitor for one station.
    ///
    /// # Arguments (builder)
    ///
    /// * `.station_code(String)`: **Required.** The CGESP station code.
    /// * `.hub(HubClient)`: **Required.** The publish target.
    /// * `.interval_secs(u64)`: Optional. Poll interval, default 3600.
    /// * `.fetcher(PageFetcher)`: Optional. Defaults to a fresh fetcher.
    #[builder]
    pub fn new(
        station_code: String,
        hub: HubClient,
        interval_secs: Option<u64>,
        fetcher: Option<PageFetcher>,
    ) -> Self {
        Self {
            station_code,
            fetcher: fetcher.unwrap_or_default(),
            hub,
            interval: Duration::from_secs(interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS)),
        }
    }
}

impl StationMonitor {
    /// Runs one fetch → extract → publish pass.
    ///
    /// # Errors
    ///
    /// Returns [`CgespError::Fetch`] when the station page cannot be
    /// loaded; nothing is published in that case. Extraction and publishing
    /// degrade internally and never fail the cycle.
    pub async fn cycle(&self) -> Result<PublishSummary, CgespError> {
        let html = self.fetcher.fetch_page(&self.station_code).await?;
        let reading = extract_reading(&html, &self.station_code);
        Ok(self.hub.publish_reading(&reading).await)
    }

    /// Runs cycles until the shutdown channel fires.
    ///
    /// Cycle errors are logged and the loop continues; a shutdown signal is
    /// the clean exit path.
    pub async fn run(&self, mut shutdown: watch::Receiver<()>) {
        log::info!(
            "Monitoring station {} every {}s",
            self.station_code,
            self.interval.as_secs()
        );

        loop {
            let start = Instant::now();

            match self.cycle().await {
                Ok(summary) => log::info!(
                    "Cycle finished: published {}/{} channels",
                    summary.published,
                    summary.total()
                ),
                Err(e) => log::error!("No data this cycle: {e}"),
            }

            let elapsed = start.elapsed();
            let wait = remaining_wait(self.interval, elapsed);
            log::info!(
                "Cycle took {:.2}s, waiting {:.2}s until next scan",
                elapsed.as_secs_f64(),
                wait.as_secs_f64()
            );

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = shutdown.changed() => {
                    log::info!("Shutdown requested, stopping monitor");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_is_interval_minus_elapsed() {
        let wait = remaining_wait(
            Duration::from_secs(3600),
            Duration::from_secs_f64(45.2),
        );
        assert!((wait.as_secs_f64() - 3554.8).abs() < 1e-6);
    }

    #[test]
    fn overrun_cycle_waits_zero() {
        let wait = remaining_wait(Duration::from_secs(3600), Duration::from_secs(4000));
        assert_eq!(wait, Duration::ZERO);
    }

    #[test]
    fn builder_applies_default_interval() {
        let monitor = StationMonitor::builder()
            .station_code("1000840".to_string())
            .hub(HubClient::new("http://hub.local:8123", "t"))
            .build();
        assert_eq!(monitor.interval, Duration::from_secs(3600));
    }

    #[test]
    fn builder_accepts_custom_interval() {
        let monitor = StationMonitor::builder()
            .station_code("1000840".to_string())
            .hub(HubClient::new("http://hub.local:8123", "t"))
            .interval_secs(600)
            .build();
        assert_eq!(monitor.interval, Duration::from_secs(600));
    }
}
