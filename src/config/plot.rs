//! Chart visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Stroke of the price line
    pub price_line_color: Color32,
    pub price_line_width: f32,
    /// Fixed chart height in points
    pub chart_height: f32,
    /// Fraction of the price range added above and below the series
    pub y_padding_pct: f64,
    /// Number of labelled marks on the time axis
    pub x_axis_divisions: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    price_line_color: Color32::from_rgb(136, 132, 216), // Lavender
    price_line_width: 2.0,
    chart_height: 384.0,
    y_padding_pct: 0.02,
    x_axis_divisions: 6,
};
