use eframe::egui::{Align, CornerRadius, Frame, Layout, Margin, RichText, Ui};
use strum::IntoEnumIterator;

use crate::domain::Timeframe;
use crate::ui::config::UI_CONFIG;
use crate::ui::market_view::CardText;
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Row of timeframe buttons above the chart
pub struct TimeframeSelector {
    selected: Timeframe,
}

impl TimeframeSelector {
    pub fn new(selected: Timeframe) -> Self {
        Self { selected }
    }
}

impl Panel for TimeframeSelector {
    type Event = Timeframe;

    fn render(&mut self, ui: &mut Ui) -> Vec<Timeframe> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            for timeframe in Timeframe::iter() {
                let is_selected = self.selected == timeframe;
                if ui
                    .selectable_label(is_selected, timeframe.button_label())
                    .clicked()
                    && !is_selected
                {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Timeframe button clicked: {}", timeframe);
                    }
                    self.selected = timeframe;
                    events.push(timeframe);
                }
            }
        });
        events
    }
}

/// The three asset cards, side by side
pub struct AssetCardsPanel<'a> {
    cards: &'a [CardText; 3],
}

impl<'a> AssetCardsPanel<'a> {
    pub fn new(cards: &'a [CardText; 3]) -> Self {
        Self { cards }
    }

    fn render_card(ui: &mut Ui, card: &CardText) {
        Frame::new()
            .fill(UI_CONFIG.colors.card_fill)
            .corner_radius(CornerRadius::same(UI_CONFIG.card_rounding))
            .inner_margin(Margin::same(UI_CONFIG.card_padding))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label_header(&card.name);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label_subdued(&card.symbol)
                    });
                });
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&card.price)
                        .size(26.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_change(
                    format!("{} {}", card.indicator, card.change),
                    card.change_positive,
                );
                ui.add_space(8.0);
                ui.label_subdued(&card.market_cap);
            });
    }
}

impl Panel for AssetCardsPanel<'_> {
    type Event = ();

    fn render(&mut self, ui: &mut Ui) -> Vec<()> {
        ui.columns(3, |columns| {
            for (column, card) in columns.iter_mut().zip(self.cards.iter()) {
                Self::render_card(column, card);
            }
        });
        Vec::new()
    }
}
