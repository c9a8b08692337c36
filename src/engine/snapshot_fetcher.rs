use poll_promise::Promise;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{FetchContext, SnapshotResult};
use crate::domain::AssetSnapshot;
use crate::engine::periodic::PeriodicTask;
use crate::engine::refresh_state::{QueryView, RefreshState};
use crate::utils::app_time::AppInstant;

/// Periodic loop that keeps the current metrics of the tracked assets.
pub struct SnapshotFetcher {
    asset_ids: [&'static str; 3],
    state: RefreshState<Vec<AssetSnapshot>>,
    task: PeriodicTask,
    in_flight: Option<Promise<SnapshotResult>>,
    last_updated: Option<AppInstant>,
}

impl SnapshotFetcher {
    pub fn new(asset_ids: [&'static str; 3], interval: Duration) -> Self {
        Self {
            asset_ids,
            state: RefreshState::Pending,
            task: PeriodicTask::new(interval),
            in_flight: None,
            last_updated: None,
        }
    }

    pub fn asset_ids(&self) -> &[&'static str; 3] {
        &self.asset_ids
    }

    /// Fetches immediately, then on every interval until `stop`.
    pub fn start(&mut self, ctx: &dyn FetchContext, now: AppInstant) {
        if self.task.is_running() {
            return;
        }
        log::info!(
            "Market snapshot loop started ({:?} cadence)",
            self.task.interval()
        );
        self.task.start(now);
        self.poll(ctx, now);
    }

    /// Stops the timer. An in-flight request is dropped and its result ignored.
    pub fn stop(&mut self) {
        self.task.stop();
        if self.in_flight.take().is_some() {
            log::info!("Market snapshot request cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Called once per frame. Applies a finished request, then issues a new
    /// one if the timer is due. Returns true if the state changed.
    pub fn poll(&mut self, ctx: &dyn FetchContext, now: AppInstant) -> bool {
        let changed = self.collect(now);

        if self.task.poll(now) {
            if self.in_flight.is_none() {
                self.issue(ctx);
            } else {
                // Previous request still running; this tick is folded into it
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_fetch_events {
                    log::info!("[snapshots] tick skipped, request in flight");
                }
            }
        }

        changed
    }

    /// Explicit re-fetch; supersedes any request in flight.
    pub fn refetch(&mut self, ctx: &dyn FetchContext) {
        self.issue(ctx);
    }

    pub fn state(&self) -> &RefreshState<Vec<AssetSnapshot>> {
        &self.state
    }

    pub fn view(&self) -> QueryView<'_, Vec<AssetSnapshot>> {
        self.state.view(self.is_fetching())
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_updated(&self) -> Option<AppInstant> {
        self.last_updated
    }

    /// Time until the timer next needs servicing.
    pub fn next_wakeup(&self, now: AppInstant) -> Option<Duration> {
        self.task.until_due(now)
    }

    fn issue(&mut self, ctx: &dyn FetchContext) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!("[snapshots] requesting {:?}", self.asset_ids);
        }
        // Replacing the promise drops the old one, so its result can never land
        self.in_flight = Some(ctx.fetch_snapshots(&self.asset_ids));
    }

    fn collect(&mut self, now: AppInstant) -> bool {
        let Some(promise) = self.in_flight.take() else {
            return false;
        };

        match promise.try_take() {
            Ok(result) => {
                if let Err(e) = &result {
                    log::warn!("Market snapshot refresh failed: {:?}", e);
                }
                self.state.apply(result);
                self.last_updated = Some(now);
                true
            }
            Err(promise) => {
                self.in_flight = Some(promise);
                false
            }
        }
    }
}
