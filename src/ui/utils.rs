use eframe::egui::{Context, RichText, Ui, Visuals};
use std::time::Duration;

use crate::ui::config::UI_CONFIG;

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    // Slate theme
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_subsection_heading(text).strong());
    ui.add_space(5.0);
}

/// Card price: dollar sign and exactly two decimals, no grouping ("$65000.12").
pub fn format_usd_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// 24h change with two decimals and a percent sign ("-3.46%").
pub fn format_change_pct(change: f64) -> String {
    format!("{:.2}%", change)
}

/// ▲ for a non-negative change, ▼ otherwise.
pub fn change_indicator(change: f64) -> &'static str {
    if change >= 0.0 { "▲" } else { "▼" }
}

/// Compact market cap: "1.23B" from 1e9, "4.50M" from 1e6, otherwise the
/// value with thousands separators and at most three decimals.
pub fn format_market_cap(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        group_thousands(format!("{:.3}", value))
    }
}

/// Trims trailing zeros from a fixed-point string and inserts comma separators.
fn group_thousands(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Y axis and tooltip price ("$64,250"), whole dollars above 100.
pub fn format_axis_price(price: f64) -> String {
    if price.abs() >= 100.0 {
        format!("${}", group_thousands(format!("{:.0}", price)))
    } else {
        format!("${}", group_thousands(format!("{:.2}", price)))
    }
}

/// Short age for the status bar ("12s ago", "3m ago").
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
