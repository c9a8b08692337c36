use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::FetchContext;
use crate::domain::{ChartSeries, SeriesKey, Timeframe};
use crate::engine::periodic::PeriodicTask;
use crate::engine::refresh_state::QueryView;
use crate::engine::series_cache::SeriesCache;
use crate::utils::app_time::AppInstant;

/// Periodic loop for the price history of one asset at the selected timeframe.
///
/// Each timeframe has its own cache entry. Switching timeframe drops the old
/// key's request, so a slow response for the previous timeframe can never
/// overwrite the one the user is looking at.
pub struct ChartFetcher {
    asset_id: String,
    timeframe: Timeframe,
    cache: SeriesCache,
    task: PeriodicTask,
}

impl ChartFetcher {
    pub fn new(
        asset_id: impl Into<String>,
        timeframe: Timeframe,
        interval: Duration,
        inactive_ttl: Duration,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            timeframe,
            cache: SeriesCache::new(inactive_ttl),
            task: PeriodicTask::new(interval),
        }
    }

    pub fn active_key(&self) -> SeriesKey {
        SeriesKey::new(self.asset_id.clone(), self.timeframe)
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    pub fn start(&mut self, ctx: &dyn FetchContext, now: AppInstant) {
        if self.task.is_running() {
            return;
        }
        log::info!(
            "Chart loop started for {} ({:?} cadence)",
            self.active_key(),
            self.task.interval()
        );
        self.task.start(now);
        self.poll(ctx, now);
    }

    /// Stops the timer and drops every request in flight. Cached series stay.
    pub fn stop(&mut self) {
        self.task.stop();
        self.cache.cancel_all();
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Switches the displayed timeframe. Returns false if it was already selected.
    ///
    /// While running, the new key is fetched at once and the timer restarts
    /// from now.
    pub fn set_timeframe(
        &mut self,
        ctx: &dyn FetchContext,
        timeframe: Timeframe,
        now: AppInstant,
    ) -> bool {
        if timeframe == self.timeframe {
            return false;
        }

        let previous = self.active_key();
        self.cache.cancel_request(&previous);
        self.cache.touch(&previous, now);

        self.timeframe = timeframe;
        let key = self.active_key();
        self.cache.touch(&key, now);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("[chart] timeframe {} -> {}", previous.timeframe, timeframe);
        }

        if self.task.is_running() {
            self.task.reset(now);
            self.issue(ctx, now);
        }
        true
    }

    /// Called once per frame. Returns true if the active view changed.
    pub fn poll(&mut self, ctx: &dyn FetchContext, now: AppInstant) -> bool {
        let changed = self.cache.poll_completions(now);
        let key = self.active_key();

        if self.task.poll(now) && !self.cache.is_fetching(&key) {
            self.issue(ctx, now);
        }

        self.cache.evict_inactive(&key, now);
        changed
    }

    /// Explicit re-fetch of the active key; supersedes any request in flight.
    pub fn refetch(&mut self, ctx: &dyn FetchContext, now: AppInstant) {
        self.issue(ctx, now);
    }

    pub fn view(&self) -> QueryView<'_, ChartSeries> {
        match self.cache.get(&self.active_key()) {
            Some(entry) => entry.view(),
            None => QueryView::pending(false),
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.cache.is_fetching(&self.active_key())
    }

    pub fn last_updated(&self) -> Option<AppInstant> {
        self.cache
            .get(&self.active_key())
            .and_then(|entry| entry.last_updated())
    }

    pub fn next_wakeup(&self, now: AppInstant) -> Option<Duration> {
        self.task.until_due(now)
    }

    fn issue(&mut self, ctx: &dyn FetchContext, now: AppInstant) {
        let key = self.active_key();
        let promise = ctx.fetch_series(&key);
        self.cache.begin_request(&key, promise, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use crate::data::fetch_context::testing::ScriptedFetchContext;
    use crate::domain::PricePoint;
    use crate::utils::app_time::{Clock, ManualClock};

    const CADENCE: Duration = Duration::from_secs(60);
    const TTL: Duration = Duration::from_secs(300);

    fn fetcher() -> ChartFetcher {
        ChartFetcher::new("bitcoin", Timeframe::SevenDays, CADENCE, TTL)
    }

    fn series(timeframe: Timeframe, price: f64) -> ChartSeries {
        ChartSeries::new(
            SeriesKey::new("bitcoin", timeframe),
            vec![
                PricePoint {
                    timestamp_ms: 1_709_600_000_000,
                    price,
                },
                PricePoint {
                    timestamp_ms: 1_709_640_000_000,
                    price: price + 1.0,
                },
            ],
        )
    }

    #[test]
    fn start_requests_default_timeframe() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());

        let keys = ctx.series_keys();
        assert_eq!(keys, [SeriesKey::new("bitcoin", Timeframe::SevenDays)]);
        assert_eq!(keys[0].timeframe.days_param(), "7");
        assert!(chart.view().is_loading);
    }

    #[test]
    fn refreshes_every_sixty_seconds() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 60_000.0)));
        assert!(chart.poll(&ctx, clock.now()));

        clock.advance(Duration::from_secs(59));
        chart.poll(&ctx, clock.now());
        assert_eq!(ctx.series_keys().len(), 1);

        clock.advance(Duration::from_secs(1));
        chart.poll(&ctx, clock.now());
        assert_eq!(ctx.series_keys().len(), 2);
    }

    #[test]
    fn switching_timeframe_fetches_new_key_immediately() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        clock.advance(Duration::from_secs(5));
        assert!(chart.set_timeframe(&ctx, Timeframe::OneDay, clock.now()));

        let keys = ctx.series_keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].timeframe, Timeframe::OneDay);
        assert_eq!(keys[1].timeframe.days_param(), "1");

        // The timer restarted at the switch
        assert_eq!(chart.next_wakeup(clock.now()), Some(CADENCE));
    }

    #[test]
    fn selecting_current_timeframe_is_a_no_op() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        assert!(!chart.set_timeframe(&ctx, Timeframe::SevenDays, clock.now()));
        assert_eq!(ctx.series_keys().len(), 1);
    }

    #[test]
    fn late_response_for_previous_timeframe_is_discarded() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        chart.set_timeframe(&ctx, Timeframe::OneDay, clock.now());

        ctx.complete_series(1, Ok(series(Timeframe::OneDay, 64_000.0)));
        chart.poll(&ctx, clock.now());
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 58_000.0)));
        chart.poll(&ctx, clock.now());

        let view = chart.view();
        let shown = view.data.expect("1d series");
        assert_eq!(shown.key.timeframe, Timeframe::OneDay);
        assert_eq!(shown.points[0].price, 64_000.0);

        let week = SeriesKey::new("bitcoin", Timeframe::SevenDays);
        assert!(chart.cache().get(&week).expect("entry").state().is_pending());
    }

    #[test]
    fn switching_back_shows_cached_series_while_refreshing() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 58_000.0)));
        chart.poll(&ctx, clock.now());

        chart.set_timeframe(&ctx, Timeframe::OneDay, clock.now());
        chart.set_timeframe(&ctx, Timeframe::SevenDays, clock.now());

        let view = chart.view();
        assert!(view.is_fetching);
        assert!(!view.is_loading);
        assert_eq!(view.data.map(|s| s.points[0].price), Some(58_000.0));
        assert_eq!(ctx.series_keys().len(), 3);
    }

    #[test]
    fn chart_failure_only_affects_chart_state() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        ctx.complete_series(0, Err(FetchError::Network("offline".into())));
        chart.poll(&ctx, clock.now());

        let view = chart.view();
        assert!(view.is_error);
        assert!(view.data.is_none());
        assert!(chart.last_updated().is_some());
    }

    #[test]
    fn failed_refresh_keeps_previous_series_on_screen() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 60_000.0)));
        chart.poll(&ctx, clock.now());

        clock.advance(CADENCE);
        chart.poll(&ctx, clock.now());
        ctx.complete_series(1, Err(FetchError::Http { status: 429 }));
        chart.poll(&ctx, clock.now());

        let view = chart.view();
        assert!(view.is_error);
        assert_eq!(view.error, Some(&FetchError::Http { status: 429 }));
        assert_eq!(view.data.map(|s| s.points[0].price), Some(60_000.0));

        // The next success clears the error
        clock.advance(CADENCE);
        chart.poll(&ctx, clock.now());
        ctx.complete_series(2, Ok(series(Timeframe::SevenDays, 61_000.0)));
        chart.poll(&ctx, clock.now());
        let view = chart.view();
        assert!(!view.is_error);
        assert_eq!(view.data.map(|s| s.points[0].price), Some(61_000.0));
    }

    #[test]
    fn abandoned_timeframe_is_evicted_after_ttl() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 58_000.0)));
        chart.poll(&ctx, clock.now());
        chart.set_timeframe(&ctx, Timeframe::OneMonth, clock.now());
        assert_eq!(chart.cache().len(), 2);

        clock.advance(TTL);
        chart.poll(&ctx, clock.now());
        assert_eq!(chart.cache().len(), 1);
        assert!(chart.cache().get(&chart.active_key()).is_some());
    }

    #[test]
    fn refetch_supersedes_request_for_same_key() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        chart.refetch(&ctx, clock.now());
        assert_eq!(ctx.series_keys().len(), 2);

        ctx.complete_series(1, Ok(series(Timeframe::SevenDays, 61_000.0)));
        chart.poll(&ctx, clock.now());
        ctx.complete_series(0, Err(FetchError::Http { status: 502 }));
        chart.poll(&ctx, clock.now());

        assert_eq!(chart.view().data.map(|s| s.points[0].price), Some(61_000.0));
        assert!(!chart.is_fetching());
    }

    #[test]
    fn stop_halts_timer_and_pending_requests() {
        let clock = ManualClock::new();
        let ctx = ScriptedFetchContext::default();
        let mut chart = fetcher();

        chart.start(&ctx, clock.now());
        chart.stop();
        ctx.complete_series(0, Ok(series(Timeframe::SevenDays, 1.0)));

        clock.advance(Duration::from_secs(600));
        assert!(!chart.poll(&ctx, clock.now()));
        assert_eq!(ctx.series_keys().len(), 1);
        assert!(chart.view().is_loading);
    }
}
