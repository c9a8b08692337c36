use eframe::{Frame, egui};
use std::time::Duration;

use crate::config::{COINGECKO, FetchPolicy, REFRESH};
use crate::data::FetchContext;
use crate::domain::Timeframe;
use crate::engine::{ChartFetcher, SnapshotFetcher};
use crate::ui::market_view::{ChartPanel, MarketPanel};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::app_time::{Clock, SystemClock};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// The dashboard: two independent refresh loops and the views over them.
pub struct CryptoDashboardApp {
    fetch_ctx: Box<dyn FetchContext>,
    clock: Box<dyn Clock>,
    pub(super) snapshots: SnapshotFetcher,
    pub(super) chart: ChartFetcher,
    pub(super) plot_view: PlotView,
}

impl CryptoDashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        fetch_ctx: Box<dyn FetchContext>,
        policy: &FetchPolicy,
    ) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        Self::with_clock(fetch_ctx, Box::new(SystemClock), policy)
    }

    /// Builds the app and starts the market loop at `clock.now()`. The chart
    /// loop follows once the market cards are ready.
    pub fn with_clock(
        fetch_ctx: Box<dyn FetchContext>,
        clock: Box<dyn Clock>,
        policy: &FetchPolicy,
    ) -> Self {
        let mut app = Self {
            snapshots: SnapshotFetcher::new(COINGECKO.tracked_ids, REFRESH.snapshot_interval),
            chart: ChartFetcher::new(
                COINGECKO.chart_asset,
                REFRESH.default_timeframe,
                REFRESH.chart_interval,
                policy.inactive_series_ttl,
            ),
            plot_view: PlotView::new(),
            fetch_ctx,
            clock,
        };

        let now = app.clock.now();
        app.snapshots.start(app.fetch_ctx.as_ref(), now);
        app
    }

    /// Services both loops. Returns how long until a timer next needs attention.
    pub fn tick(&mut self) -> Option<Duration> {
        let now = self.clock.now();
        self.snapshots.poll(self.fetch_ctx.as_ref(), now);
        self.sync_chart_loop(now);
        self.chart.poll(self.fetch_ctx.as_ref(), now);

        match (self.snapshots.next_wakeup(now), self.chart.next_wakeup(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The chart only runs while it is on screen, i.e. below ready market
    /// cards. Restarting fetches at once; the cached series stays visible.
    fn sync_chart_loop(&mut self, now: crate::utils::AppInstant) {
        let visible = self.snapshots.is_running() && self.market_panel().shows_chart();
        match (visible, self.chart.is_running()) {
            (true, false) => self.chart.start(self.fetch_ctx.as_ref(), now),
            (false, true) => {
                log::info!("Chart loop paused while the market panel is hidden");
                self.chart.stop();
            }
            _ => {}
        }
    }

    pub(super) fn select_timeframe(&mut self, timeframe: Timeframe) {
        let now = self.clock.now();
        if self.chart.set_timeframe(self.fetch_ctx.as_ref(), timeframe, now) {
            self.plot_view.clear_cache();
        }
    }

    pub fn market_panel(&self) -> MarketPanel {
        MarketPanel::from_view(&self.snapshots.view(), self.snapshots.asset_ids())
    }

    pub fn chart_panel(&self) -> ChartPanel<'_> {
        ChartPanel::from_view(&self.chart.view(), self.chart.timeframe())
    }

    pub(super) fn now(&self) -> crate::utils::AppInstant {
        self.clock.now()
    }

    /// Re-fetches every running panel now, superseding anything in flight.
    pub fn refetch_all(&mut self) {
        let now = self.clock.now();
        log::info!("Manual refresh requested");
        self.snapshots.refetch(self.fetch_ctx.as_ref());
        if self.chart.is_running() {
            self.chart.refetch(self.fetch_ctx.as_ref(), now);
        }
    }

    /// Stops both loops; late responses are dropped.
    pub fn shutdown(&mut self) {
        self.snapshots.stop();
        self.chart.stop();
    }
}

impl eframe::App for CryptoDashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.refetch_all();
        }
        let next_wakeup = self.tick();

        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        // Completed requests wake the UI themselves; timers need a scheduled repaint
        if let Some(wait) = next_wakeup {
            ctx.request_repaint_after(wait);
        }
    }
}
