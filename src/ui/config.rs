use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card_fill: Color32,
    pub price_up: Color32,
    pub price_down: Color32,
    pub error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub card_rounding: u8,
    pub card_padding: i8,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(156, 163, 175),
        heading: Color32::WHITE,
        subsection_heading: Color32::from_rgb(209, 213, 219),
        central_panel: Color32::from_rgb(17, 24, 39),
        side_panel: Color32::from_rgb(31, 41, 55),
        card_fill: Color32::from_rgb(31, 41, 55),
        price_up: Color32::from_rgb(74, 222, 128),
        price_down: Color32::from_rgb(248, 113, 113),
        error: Color32::from_rgb(248, 113, 113),
    },
    card_rounding: 8,
    card_padding: 16,
};
