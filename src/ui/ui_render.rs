use eframe::egui::{
    CentralPanel, Context, CornerRadius, Frame, Margin, RichText, TopBottomPanel, Ui,
};

use crate::ui::market_view::{ChartBody, ChartPanel, MarketPanel};
use crate::ui::ui_panels::{AssetCardsPanel, Panel, TimeframeSelector};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_age, section_heading};
use crate::utils::AppInstant;

use super::app::CryptoDashboardApp;

impl CryptoDashboardApp {
    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(24));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                let market = self.market_panel();
                let cards = match &market {
                    MarketPanel::Ready(cards) => cards,
                    MarketPanel::Loading => {
                        Self::render_centered_message(ui, UI_TEXT.loading_market);
                        return;
                    }
                    MarketPanel::Failed(message) => {
                        ui.centered_and_justified(|ui| ui.label_error(message));
                        return;
                    }
                    MarketPanel::Incomplete => {
                        Self::render_centered_message(ui, UI_TEXT.incomplete_data);
                        return;
                    }
                };

                Self::render_header(ui);
                ui.add_space(16.0);
                AssetCardsPanel::new(cards).render(ui);
                ui.add_space(24.0);
                self.render_chart(ui);
            });
    }

    fn render_header(ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(UI_TEXT.header_title)
                    .size(32.0)
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
            ui.label_subheader(UI_TEXT.header_subtitle);
        });
    }

    fn render_centered_message(ui: &mut Ui, text: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(text).size(16.0).color(UI_CONFIG.colors.heading));
        });
    }

    fn render_chart(&mut self, ui: &mut Ui) {
        let mut selected = Vec::new();

        Frame::new()
            .fill(UI_CONFIG.colors.card_fill)
            .corner_radius(CornerRadius::same(UI_CONFIG.card_rounding))
            .inner_margin(Margin::same(UI_CONFIG.card_padding))
            .show(ui, |ui| {
                // Borrow the fetcher and the plot view separately
                let view = self.chart.view();
                let panel = ChartPanel::from_view(&view, self.chart.timeframe());
                let timeframe = panel.selected;

                ui.horizontal(|ui| {
                    section_heading(ui, &panel.title);
                    ui.add_space(16.0);
                    selected = TimeframeSelector::new(timeframe).render(ui);
                });

                if let ChartBody::Series(series) = panel.body {
                    self.plot_view.show_price_chart(ui, series);
                } else if let Some(message) = panel.message() {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| ui.label_subdued(message));
                    ui.add_space(24.0);
                }
            });

        for timeframe in selected {
            self.select_timeframe(timeframe);
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                let now = self.now();
                ui.horizontal(|ui| {
                    ui.metric(
                        UI_TEXT.status_market,
                        &status_text(
                            self.snapshots.last_updated(),
                            self.snapshots.is_fetching(),
                            now,
                        ),
                        UI_CONFIG.colors.subsection_heading,
                    );
                    ui.separator();
                    ui.metric(
                        &format!("{} ({})", UI_TEXT.status_chart, self.chart.timeframe()),
                        &status_text(self.chart.last_updated(), self.chart.is_fetching(), now),
                        UI_CONFIG.colors.subsection_heading,
                    );
                    if self.snapshots.is_fetching() || self.chart.is_fetching() {
                        ui.separator();
                        ui.spinner();
                    }
                });
            });
    }
}

fn status_text(last_updated: Option<AppInstant>, is_fetching: bool, now: AppInstant) -> String {
    match (last_updated, is_fetching) {
        (Some(at), false) => format_age(now.saturating_duration_since(at)),
        (Some(at), true) => format!(
            "{} ({})",
            format_age(now.saturating_duration_since(at)),
            UI_TEXT.status_refreshing
        ),
        (None, true) => UI_TEXT.status_refreshing.to_string(),
        (None, false) => UI_TEXT.status_never.to_string(),
    }
}
